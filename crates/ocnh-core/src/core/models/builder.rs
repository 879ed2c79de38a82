use super::atom::{AltLoc, Atom};
use super::ids::ResidueId;
use super::structure::{Model, Structure};
use crate::core::io::record::AtomRecord;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error(
        "Duplicate atom '{atom_name}' (altloc '{alt_loc}') in residue {residue_name} {residue} of chain '{chain_id}'"
    )]
    DuplicateAtom {
        chain_id: char,
        residue: String,
        residue_name: String,
        atom_name: String,
        alt_loc: AltLoc,
    },
}

/// Assembles parsed atom records into a [`Structure`].
///
/// Records are consumed in file order. Each call to [`start_model`](Self::start_model)
/// opens a new model; records added before the first call land in an implicit
/// first model.
#[derive(Debug, Default)]
pub struct StructureBuilder {
    models: Vec<Model>,
    current: Option<Model>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_model(&mut self) -> &mut Self {
        if let Some(model) = self.current.take() {
            self.models.push(model);
        }
        self.current = Some(Model::new());
        self
    }

    /// Closes the current model; records added afterwards open a new one.
    fn end_model(&mut self) -> &mut Self {
        if let Some(model) = self.current.take() {
            self.models.push(model);
        }
        self
    }

    /// Files one atom record under its chain, residue and atom site.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateAtom`] when the residue already holds an
    /// atom with the same name and altLoc.
    pub fn add_record(&mut self, record: &AtomRecord) -> Result<&mut Self, BuildError> {
        let model = self.current.get_or_insert_with(Model::new);

        let chain_id = model.add_chain(record.chain_id);
        let residue_id = model
            .add_residue(
                chain_id,
                record.seq_num,
                record.insertion_code,
                &record.residue_name,
            )
            .expect("chain was created above");

        check_residue_name(model, residue_id, record);

        let atom = Atom {
            name: record.name.clone(),
            alt_loc: record.alt_loc,
            residue_id,
            position: record.position,
            serial: record.serial,
            occupancy: record.occupancy,
            is_hetero: record.is_hetero,
        };

        if model.add_atom_to_residue(residue_id, atom).is_none() {
            let residue = model.residue(residue_id).map(|r| (r.display_id(), r.name.clone()));
            let (residue, residue_name) = residue.unwrap_or_default();
            return Err(BuildError::DuplicateAtom {
                chain_id: record.chain_id,
                residue,
                residue_name,
                atom_name: record.name.clone(),
                alt_loc: record.alt_loc,
            });
        }
        Ok(self)
    }

    pub fn build(mut self) -> Structure {
        self.end_model();
        Structure::new(self.models)
    }
}

fn check_residue_name(model: &Model, residue_id: ResidueId, record: &AtomRecord) {
    if let Some(residue) = model.residue(residue_id) {
        if residue.name != record.residue_name {
            warn!(
                chain = %record.chain_id,
                residue = %residue.display_id(),
                kept = %residue.name,
                ignored = %record.residue_name,
                "Residue name changes within one residue; keeping the first name."
            );
        }
    }
}
