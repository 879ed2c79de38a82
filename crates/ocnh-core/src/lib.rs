//! # OCNH Core Library
//!
//! Extraction of backbone O-C-N-H torsion angles from macromolecular
//! coordinate files, with explicit control over alternate conformations.
//!
//! ## Architectural Philosophy
//!
//! The library is organized in three layers.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Model`,
//!   `Residue`, `Atom`), fixed-column PDB parsing, table output and pure geometry.
//!
//! - **[`engine`]: The Logic Core.** Peptide segmentation, alternate-location
//!   resolution and per-window torsion measurement, with validated configuration
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete procedures for a single chain
//!   or a batch of files, returning ordered records and coverage summaries.

pub mod core;
pub mod engine;
pub mod workflows;
