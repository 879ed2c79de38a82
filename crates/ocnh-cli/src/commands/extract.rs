use crate::cli::ExtractArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::parser;
use crate::utils::progress::CliProgressHandler;
use ocnh::{
    core::io::{pdb::PdbFile, table::write_table, traits::StructureFile},
    engine::progress::ProgressReporter,
    workflows::{self, extract::ExtractionRequest, naming::default_output_path},
};
use tracing::{info, warn};

pub fn run(args: ExtractArgs) -> Result<()> {
    let altloc = parser::parse_altloc(args.altloc.as_deref())
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let config = build_config(&args.settings)?;

    info!("Loading input structure from {:?}", &args.input);
    let structure = PdbFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let request = ExtractionRequest::new(args.input.display().to_string(), args.chain, altloc);
    let extraction = workflows::extract::run(&structure, &request, &config, &reporter)?;

    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, args.chain, altloc));

    let summary = &extraction.summary;
    if extraction.records.is_empty() {
        warn!(
            windows = summary.candidate_windows,
            "No torsions could be measured for chain '{}'.", args.chain
        );
    }

    info!("Writing {} record(s) to {:?}", extraction.records.len(), &output_path);
    write_table(&output_path, &extraction.records, &config.output).map_err(|e| {
        CliError::FileWriting {
            path: output_path.clone(),
            source: e.into(),
        }
    })?;

    println!(
        "O-C-N-H dihedral angles written to {} ({} of {} residue pair(s), {} skipped)",
        output_path.display(),
        summary.emitted,
        summary.candidate_windows,
        summary.skipped()
    );
    Ok(())
}
