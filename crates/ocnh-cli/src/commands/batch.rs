use crate::cli::BatchArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use ocnh::{
    core::io::table::write_summaries,
    engine::{progress::ProgressReporter, record::ExtractionSummary},
    workflows::batch::{self, BatchJob},
};
use std::fs::{self, File};
use std::io::BufWriter;
use tracing::{error, info};

pub fn run(args: BatchArgs) -> Result<()> {
    let altloc = parser::parse_altloc(args.altloc.as_deref())
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let config = build_config(&args.settings)?;

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let jobs: Vec<BatchJob> = args
        .inputs
        .iter()
        .map(|input| BatchJob::new(input, args.chain, altloc, args.output_dir.as_deref()))
        .collect();
    info!("Prepared {} job(s) for chain '{}'.", jobs.len(), args.chain);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let outcomes = batch::run(&jobs, &config, &reporter);

    let mut summaries: Vec<ExtractionSummary> = Vec::with_capacity(outcomes.len());
    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(summary) => {
                println!(
                    "✓ {} -> {} ({} record(s))",
                    outcome.job.input.display(),
                    outcome.job.output.display(),
                    summary.emitted
                );
                summaries.push(summary.clone());
            }
            Err(e) => {
                failed += 1;
                error!("Job for {:?} failed: {}", outcome.job.input, e);
                eprintln!("✗ {}: {}", outcome.job.input.display(), e);
            }
        }
    }

    if let Some(path) = &args.summary {
        info!("Writing {} summary row(s) to {:?}", summaries.len(), path);
        let writer = BufWriter::new(File::create(path)?);
        write_summaries(writer, &summaries).map_err(|e| CliError::FileWriting {
            path: path.clone(),
            source: e.into(),
        })?;
    }

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
