//! Pure helpers shared across the library: torsion and distance geometry,
//! and residue-name classification.

pub mod geometry;
pub mod identifiers;
