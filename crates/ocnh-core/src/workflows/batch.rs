use super::extract::{self, ExtractionRequest};
use super::naming::{default_output_path, output_path_in};
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::table::{TableError, write_table};
use crate::core::io::traits::StructureFile;
use crate::engine::config::ExtractionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::record::ExtractionSummary;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to read structure: {0}")]
    Read(#[from] PdbError),
    #[error(transparent)]
    Extract(#[from] EngineError),
    #[error("Failed to write table: {0}")]
    Write(#[from] TableError),
    #[error("Output path '{}' is shared with another job in the batch", .0.display())]
    DuplicateOutput(PathBuf),
}

/// One input file to process, and where its table goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub chain_id: char,
    pub altloc: Option<char>,
}

impl BatchJob {
    /// A job whose output is named after `input`, in `output_dir` if given
    /// or next to the input otherwise.
    pub fn new(input: &Path, chain_id: char, altloc: Option<char>, output_dir: Option<&Path>) -> Self {
        let output = match output_dir {
            Some(dir) => output_path_in(dir, input, chain_id, altloc),
            None => default_output_path(input, chain_id, altloc),
        };
        Self {
            input: input.to_path_buf(),
            output,
            chain_id,
            altloc,
        }
    }

    fn request(&self) -> ExtractionRequest {
        ExtractionRequest::new(self.input.display().to_string(), self.chain_id, self.altloc)
    }
}

#[derive(Debug)]
pub struct BatchOutcome<'a> {
    pub job: &'a BatchJob,
    pub result: Result<ExtractionSummary, JobError>,
}

impl BatchOutcome<'_> {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Reads, extracts and writes one job end to end.
pub fn process(job: &BatchJob, config: &ExtractionConfig) -> Result<ExtractionSummary, JobError> {
    let structure = PdbFile::read_from_path(&job.input)?;
    let extraction = extract::run(&structure, &job.request(), config, &ProgressReporter::new())?;
    write_table(&job.output, &extraction.records, &config.output)?;
    Ok(extraction.summary)
}

/// Runs every job independently and returns their outcomes in job order.
///
/// A failing job never stops the others; its error is kept in its outcome.
/// Jobs that would write to the same output path are not run at all and
/// fail with [`JobError::DuplicateOutput`].
#[instrument(skip_all, name = "batch_workflow", fields(jobs = jobs.len()))]
pub fn run<'a>(
    jobs: &'a [BatchJob],
    config: &ExtractionConfig,
    reporter: &ProgressReporter,
) -> Vec<BatchOutcome<'a>> {
    reporter.report(Progress::BatchStart {
        total_files: jobs.len() as u64,
    });

    let mut targets: HashMap<&Path, usize> = HashMap::new();
    for job in jobs {
        *targets.entry(job.output.as_path()).or_default() += 1;
    }

    let run_job = |job: &'a BatchJob| {
        let result = if targets[job.output.as_path()] > 1 {
            Err(JobError::DuplicateOutput(job.output.clone()))
        } else {
            process(job, config)
        };
        match &result {
            Ok(summary) => info!(
                input = %job.input.display(),
                output = %job.output.display(),
                records = summary.emitted,
                "Job finished."
            ),
            Err(e) => warn!(input = %job.input.display(), error = %e, "Job failed."),
        }
        reporter.report(Progress::FileFinished {
            source: job.input.display().to_string(),
            succeeded: result.is_ok(),
        });
        BatchOutcome { job, result }
    };

    #[cfg(not(feature = "parallel"))]
    let iterator = jobs.iter();

    #[cfg(feature = "parallel")]
    let iterator = jobs.par_iter();

    let outcomes: Vec<BatchOutcome<'a>> = iterator.map(run_job).collect();

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    info!(
        succeeded = outcomes.len() - failed,
        failed, "Batch finished."
    );
    reporter.report(Progress::BatchFinish);
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::extract::tests::chain_pdb;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[test]
    fn job_output_follows_naming_rules() {
        let job = BatchJob::new(Path::new("in/1abc.pdb"), 'A', Some('B'), Some(Path::new("out")));
        assert_eq!(job.output, PathBuf::from("out/1abc_A_OCNH_dihedral_altloc_B.csv"));
        let job = BatchJob::new(Path::new("in/1abc.pdb"), 'A', None, None);
        assert_eq!(job.output, PathBuf::from("in/1abc_A_OCNH_dihedral.csv"));
    }

    #[test]
    fn failures_are_isolated_and_order_is_preserved() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();

        let good_a = dir.path().join("good_a.pdb");
        let wrong_chain = dir.path().join("wrong_chain.pdb");
        let good_b = dir.path().join("good_b.pdb");
        fs::write(&good_a, chain_pdb(&["MET", "LYS", "GLY", "SER"], 'A')).unwrap();
        fs::write(&wrong_chain, chain_pdb(&["ALA"; 4], 'B')).unwrap();
        fs::write(&good_b, chain_pdb(&["ALA"; 6], 'A')).unwrap();
        let missing = dir.path().join("missing.pdb");

        let jobs: Vec<BatchJob> = [&good_a, &missing, &wrong_chain, &good_b]
            .into_iter()
            .map(|p| BatchJob::new(p, 'A', None, Some(out_dir.as_path())))
            .collect();

        let finished = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::FileFinished { .. } = event {
                finished.fetch_add(1, Ordering::SeqCst);
            }
        }));
        let outcomes = run(&jobs, &ExtractionConfig::default(), &reporter);
        drop(reporter);

        assert_eq!(outcomes.len(), 4);
        assert_eq!(finished.load(Ordering::SeqCst), 4);
        for (outcome, job) in outcomes.iter().zip(&jobs) {
            assert_eq!(outcome.job, job);
        }

        assert_eq!(outcomes[0].result.as_ref().unwrap().emitted, 1);
        assert!(matches!(outcomes[1].result, Err(JobError::Read(PdbError::Io(_)))));
        assert!(matches!(
            outcomes[2].result,
            Err(JobError::Extract(EngineError::ChainNotFound { chain_id: 'A', .. }))
        ));
        assert_eq!(outcomes[3].result.as_ref().unwrap().emitted, 3);

        assert!(out_dir.join("good_a_A_OCNH_dihedral.csv").exists());
        assert!(out_dir.join("good_b_A_OCNH_dihedral.csv").exists());
        assert!(!out_dir.join("wrong_chain_A_OCNH_dihedral.csv").exists());
    }

    #[test]
    fn jobs_sharing_an_output_path_are_all_rejected() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("out");
        for sub in ["a", "b", "c"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
        }
        fs::create_dir(&out_dir).unwrap();

        let first = dir.path().join("a").join("x.pdb");
        let second = dir.path().join("b").join("x.pdb");
        let distinct = dir.path().join("c").join("y.pdb");
        fs::write(&first, chain_pdb(&["ALA"; 4], 'A')).unwrap();
        fs::write(&second, chain_pdb(&["ALA"; 8], 'A')).unwrap();
        fs::write(&distinct, chain_pdb(&["ALA"; 4], 'A')).unwrap();

        let jobs: Vec<BatchJob> = [&first, &second, &distinct]
            .into_iter()
            .map(|p| BatchJob::new(p, 'A', None, Some(out_dir.as_path())))
            .collect();
        let outcomes = run(&jobs, &ExtractionConfig::default(), &ProgressReporter::new());

        let shared = out_dir.join("x_A_OCNH_dihedral.csv");
        for outcome in &outcomes[..2] {
            match &outcome.result {
                Err(JobError::DuplicateOutput(path)) => assert_eq!(path, &shared),
                other => panic!("expected duplicate output error, got {:?}", other),
            }
        }
        assert!(!shared.exists());
        assert!(outcomes[2].succeeded());
        assert!(out_dir.join("y_A_OCNH_dihedral.csv").exists());
    }

    #[test]
    fn empty_batch_reports_start_and_finish() {
        let events = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(format!("{:?}", event));
        }));
        let outcomes = run(&[], &ExtractionConfig::default(), &reporter);
        drop(reporter);

        assert!(outcomes.is_empty());
        let events = events.into_inner().unwrap();
        assert_eq!(events, vec!["BatchStart { total_files: 0 }", "BatchFinish"]);
    }
}
