//! # Workflows Module
//!
//! Top-level entry points that tie the `core` readers and writers to the
//! `engine` logic.
//!
//! - **Extraction Workflow** ([`extract`]) - All O-C-N-H torsions of one chain in a parsed structure
//! - **Batch Workflow** ([`batch`]) - Independent read, extract and write jobs over many files
//! - **Output Naming** ([`naming`]) - Default table paths derived from input paths

pub mod batch;
pub mod extract;
pub mod naming;
