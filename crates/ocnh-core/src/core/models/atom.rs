use super::ids::ResidueId;
use nalgebra::Point3;
use std::fmt;

/// Alternate-location indicator of an atom record.
///
/// A blank indicator means the atom is shared by every conformer of its
/// residue; a code (typically `A`, `B`, ...) marks one of several coexisting
/// coordinate sets for the same atom site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AltLoc {
    /// No alternate conformation (column 17 is blank).
    #[default]
    Blank,
    /// A specific alternate-conformation code.
    Code(char),
}

impl AltLoc {
    /// Interprets the raw altLoc column character.
    pub fn from_column(c: char) -> Self {
        if c == ' ' || c == '\0' {
            AltLoc::Blank
        } else {
            AltLoc::Code(c)
        }
    }

    /// Two variants can coexist in one conformer when their codes match or
    /// either one is blank.
    pub fn is_compatible_with(&self, other: &AltLoc) -> bool {
        match (self, other) {
            (AltLoc::Blank, _) | (_, AltLoc::Blank) => true,
            (AltLoc::Code(a), AltLoc::Code(b)) => a == b,
        }
    }
}

impl fmt::Display for AltLoc {
    /// Blank renders as the empty string, codes as themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltLoc::Blank => Ok(()),
            AltLoc::Code(c) => write!(f, "{}", c),
        }
    }
}

/// A single atom record placed in the structure hierarchy.
///
/// Atoms sharing a name inside one residue but differing in [`AltLoc`] are
/// variants of the same logical atom site; see
/// [`AtomSite`](super::residue::AtomSite).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name (e.g., "CA", "O", "H").
    pub name: String,
    /// Alternate-location indicator.
    pub alt_loc: AltLoc,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Serial number from the source record (0 when it could not be read).
    pub serial: usize,
    /// Occupancy from the source record.
    pub occupancy: f64,
    /// Whether the source record was a HETATM.
    pub is_hetero: bool,
}

impl Atom {
    /// Creates an atom with a blank altLoc, full occupancy and no serial.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            alt_loc: AltLoc::Blank,
            residue_id,
            position,
            serial: 0,
            occupancy: 1.0,
            is_hetero: false,
        }
    }

    pub fn with_alt_loc(mut self, alt_loc: AltLoc) -> Self {
        self.alt_loc = alt_loc;
        self
    }
}
