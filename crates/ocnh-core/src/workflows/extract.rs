use crate::core::models::structure::Structure;
use crate::engine::config::ExtractionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::record::{ExtractionSummary, TorsionRecord, WindowOutcome};
use crate::engine::segment::segment;
use crate::engine::window::evaluate_window;
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Residues spanned by the smallest segment that yields a window.
const MIN_WINDOW_SPAN: usize = 4;

/// What to extract from a structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Label used in logs and summaries, usually the input file name.
    pub source: String,
    pub chain_id: char,
    /// Conformer to follow; `None` keeps only atoms without an altLoc code.
    pub altloc: Option<char>,
}

impl ExtractionRequest {
    pub fn new(source: impl Into<String>, chain_id: char, altloc: Option<char>) -> Self {
        Self {
            source: source.into(),
            chain_id,
            altloc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Records in segment order, then residue order within each segment.
    pub records: Vec<TorsionRecord>,
    pub summary: ExtractionSummary,
}

/// Extracts every O-C-N-H torsion of one chain in the first model.
///
/// Windows that cannot be measured are skipped and tallied in the summary
/// rather than failing the run.
///
/// # Errors
///
/// Returns [`EngineError::EmptyStructure`] when the structure has no model and
/// [`EngineError::ChainNotFound`] when the first model lacks the chain.
#[instrument(skip_all, name = "extraction_workflow", fields(source = %request.source, chain = %request.chain_id))]
pub fn run(
    structure: &Structure,
    request: &ExtractionRequest,
    config: &ExtractionConfig,
    reporter: &ProgressReporter,
) -> Result<Extraction, EngineError> {
    let model = structure.first_model().ok_or(EngineError::EmptyStructure)?;
    let chain = model
        .find_chain_by_id(request.chain_id)
        .and_then(|id| model.chain(id))
        .ok_or_else(|| EngineError::ChainNotFound {
            chain_id: request.chain_id,
            available: model.chains().map(|(_, c)| c.id).join(", "),
        })?;

    let mut summary = ExtractionSummary::new(&request.source, request.chain_id, request.altloc);

    reporter.report(Progress::PhaseStart {
        name: "Segmentation",
    });
    let segments = segment(model, chain, &config.segmentation);
    summary.segments = segments.len();
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Torsion Measurement",
    });
    let mut records = Vec::new();
    for seg in segments.iter().filter(|s| s.len() >= MIN_WINDOW_SPAN) {
        for i in 0..=seg.len() - MIN_WINDOW_SPAN {
            let outcome = evaluate_window(
                model,
                chain.id,
                seg.residues[i],
                seg.residues[i + 1],
                request.altloc,
            );
            summary.tally(&outcome);
            match outcome {
                WindowOutcome::Record(record) => records.push(record),
                WindowOutcome::Skipped(reason) => {
                    debug!(window = i, %reason, "Skipping residue pair");
                }
            }
        }
    }
    reporter.report(Progress::PhaseFinish);

    info!(
        segments = summary.segments,
        windows = summary.candidate_windows,
        emitted = summary.emitted,
        missing_atoms = summary.skipped_missing_atoms,
        degenerate = summary.skipped_degenerate,
        nonstandard = summary.skipped_nonstandard,
        "Extraction finished."
    );

    Ok(Extraction { records, summary })
}
