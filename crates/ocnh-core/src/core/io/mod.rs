//! Reading structure files and writing torsion tables.
//!
//! [`record`] parses individual fixed-column atom lines, [`pdb`] turns a
//! whole coordinate file into a [`Structure`](crate::core::models::structure::Structure)
//! through the [`traits::StructureFile`] interface, and [`table`] serializes
//! extraction results as delimited text.

pub mod pdb;
pub mod record;
pub mod table;
pub mod traits;
