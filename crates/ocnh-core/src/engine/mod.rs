//! # Engine Module
//!
//! The per-chain logic of torsion extraction: splitting a chain into bonded
//! segments, picking the right conformer of each atom, and turning residue
//! pairs into torsion records.
//!
//! ## Architecture
//!
//! - **Segmentation** ([`segment`]) - Peptide-bond detection and chain splitting
//! - **Conformer Selection** ([`altloc`]) - Alternate-location resolution and residue labels
//! - **Window Evaluation** ([`window`]) - One O-C-N-H measurement per residue pair
//! - **Records** ([`record`]) - Torsion records, skip reasons and run summaries
//! - **Configuration** ([`config`]) - Validated extraction and output settings
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod altloc;
pub mod config;
pub mod error;
pub mod progress;
pub mod record;
pub mod segment;
pub mod window;
