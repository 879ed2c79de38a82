use serde::Serialize;
use std::fmt;

/// One O-C-N-H torsion measured across a donor/acceptor residue pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TorsionRecord {
    /// Identifier of the chain the pair belongs to.
    pub chain_id: char,
    /// `"{altloc}_{resname}"` of residue i.
    pub donor_label: String,
    /// `"{altloc}_{resname}"` of residue i+1.
    pub acceptor_label: String,
    /// Sequence number of the acceptor residue.
    pub residue_id: isize,
    /// Dihedral angle in degrees, unrounded.
    pub angle_degrees: f64,
}

/// Why a candidate window produced no record.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// An atom of the window could not be resolved for the requested conformer.
    MissingAtom { residue: String, atom_name: &'static str },
    /// The four positions do not define a torsion (zero-length or collinear bonds).
    DegenerateGeometry,
    /// At least one flanking residue is not a standard amino acid.
    NonStandardResidue { donor: String, acceptor: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingAtom { residue, atom_name } => {
                write!(f, "missing atom {} in residue {}", atom_name, residue)
            }
            SkipReason::DegenerateGeometry => write!(f, "degenerate geometry"),
            SkipReason::NonStandardResidue { donor, acceptor } => {
                write!(f, "non-standard residue pair {}-{}", donor, acceptor)
            }
        }
    }
}

/// Result of evaluating one residue-pair window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome {
    Record(TorsionRecord),
    Skipped(SkipReason),
}

/// Coverage counters for one extraction run.
///
/// `candidate_windows` always equals `emitted` plus the three skip counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    pub source: String,
    pub chain_id: char,
    pub altloc: Option<char>,
    pub segments: usize,
    pub candidate_windows: usize,
    pub emitted: usize,
    pub skipped_missing_atoms: usize,
    pub skipped_degenerate: usize,
    pub skipped_nonstandard: usize,
}

impl ExtractionSummary {
    pub fn new(source: &str, chain_id: char, altloc: Option<char>) -> Self {
        Self {
            source: source.to_string(),
            chain_id,
            altloc,
            ..Default::default()
        }
    }

    pub(crate) fn tally(&mut self, outcome: &WindowOutcome) {
        self.candidate_windows += 1;
        match outcome {
            WindowOutcome::Record(_) => self.emitted += 1,
            WindowOutcome::Skipped(SkipReason::MissingAtom { .. }) => {
                self.skipped_missing_atoms += 1
            }
            WindowOutcome::Skipped(SkipReason::DegenerateGeometry) => self.skipped_degenerate += 1,
            WindowOutcome::Skipped(SkipReason::NonStandardResidue { .. }) => {
                self.skipped_nonstandard += 1
            }
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_missing_atoms + self.skipped_degenerate + self.skipped_nonstandard
    }
}
