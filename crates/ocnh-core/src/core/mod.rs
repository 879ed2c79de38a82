//! # Core Module
//!
//! Stateless building blocks of the torsion extraction pipeline.
//!
//! - **Structure Representation** ([`models`]) - Structure, model, chain, residue and atom types
//! - **File I/O** ([`io`]) - Fixed-column coordinate parsing and tabular output
//! - **Utilities** ([`utils`]) - Dihedral geometry and amino-acid classification

pub mod io;
pub mod models;
pub mod utils;
