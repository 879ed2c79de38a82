//! # Core Models Module
//!
//! Data structures representing a parsed protein structure.
//!
//! ## Overview
//!
//! A [`structure::Structure`] is an ordered sequence of [`structure::Model`]s.
//! Each model exclusively owns its chains, residues and atoms, stored in slot
//! maps and addressed through the handle types in [`ids`]. Children refer to
//! their parents through handles rather than references, so the hierarchy is
//! free of ownership cycles and stays read-only once built.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom records and the [`atom::AltLoc`] indicator
//! - [`residue`] - Residues and their per-name [`residue::AtomSite`] variant groups
//! - [`chain`] - Ordered residue lists per chain identifier
//! - [`structure`] - Models and structures
//! - [`builder`] - Assembly of parsed records into the hierarchy
//! - [`ids`] - Handle types for atoms, residues and chains
//!
//! ## Usage
//!
//! ```ignore
//! use ocnh::core::models::builder::StructureBuilder;
//!
//! let mut builder = StructureBuilder::new();
//! builder.add_record(&record)?;
//! let structure = builder.build();
//! let model = structure.first_model().unwrap();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod structure;
