use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use slotmap::SlotMap;
use std::collections::HashMap;

/// One model of a structure: the chains, residues and atoms it owns.
///
/// Components live in slot maps and refer to their parents through handles
/// ([`ResidueId`], [`ChainId`]), so the hierarchy carries no ownership cycles.
/// Chains are kept in the order they first appear in the source file.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in file order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
    /// Lookup map for finding residues by chain, sequence number and insertion code.
    residue_id_map: HashMap<(ChainId, isize, Option<char>), ResidueId>,
}

impl Model {
    /// Creates a new, empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Retrieves a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns the chains of the model in file order.
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Finds a chain ID by its single-character identifier.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Adds a new chain to the model or returns the existing one.
    ///
    /// This method is idempotent; a chain identifier seen again later in the
    /// file resolves to the chain created on first sight.
    pub(crate) fn add_chain(&mut self, id: char) -> ChainId {
        *self.chain_id_map.entry(id).or_insert_with(|| {
            let chain_id = self.chains.insert(Chain::new(id));
            self.chain_order.push(chain_id);
            chain_id
        })
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain
    /// does not exist).
    pub(crate) fn add_residue(
        &mut self,
        chain_id: ChainId,
        seq_num: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, seq_num, insertion_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(seq_num, insertion_code, name, chain_id);
            let residue_id = self.residues.insert(residue);
            chain.residues.push(residue_id);
            residue_id
        });

        Some(residue_id)
    }

    /// Adds an atom to a residue, filing it under its name and altLoc.
    ///
    /// # Return
    ///
    /// Returns `None` when the residue does not exist or already holds a
    /// variant with the same name and altLoc.
    pub(crate) fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get(residue_id)?;
        let duplicate = residue
            .site(&atom.name)
            .is_some_and(|site| site.variant(atom.alt_loc).is_some());
        if duplicate {
            return None;
        }

        let name = atom.name.clone();
        let alt_loc = atom.alt_loc;
        let atom_id = self.atoms.insert(Atom { residue_id, ..atom });

        let residue = self.residues.get_mut(residue_id)?;
        residue.add_atom(&name, alt_loc, atom_id);
        Some(atom_id)
    }
}

/// A parsed structure file: an ordered sequence of models.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    models: Vec<Model>,
}

impl Structure {
    pub fn new(models: Vec<Model>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// The model every analysis operates on.
    pub fn first_model(&self) -> Option<&Model> {
        self.models.first()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AltLoc;
    use nalgebra::Point3;

    fn atom(name: &str, alt_loc: AltLoc) -> Atom {
        Atom::new(name, ResidueId::default(), Point3::origin()).with_alt_loc(alt_loc)
    }

    #[test]
    fn add_chain_is_idempotent_and_preserves_order() {
        let mut model = Model::new();
        let b = model.add_chain('B');
        let a = model.add_chain('A');
        assert_eq!(model.add_chain('B'), b);

        let order: Vec<char> = model.chains().map(|(_, c)| c.id).collect();
        assert_eq!(order, vec!['B', 'A']);
        assert_eq!(model.find_chain_by_id('A'), Some(a));
        assert_eq!(model.find_chain_by_id('Z'), None);
    }

    #[test]
    fn add_residue_reuses_existing_key() {
        let mut model = Model::new();
        let chain_id = model.add_chain('A');
        let r1 = model.add_residue(chain_id, 1, None, "ALA").unwrap();
        let r1_again = model.add_residue(chain_id, 1, None, "ALA").unwrap();
        let r1_ins = model.add_residue(chain_id, 1, Some('A'), "GLY").unwrap();

        assert_eq!(r1, r1_again);
        assert_ne!(r1, r1_ins);
        assert_eq!(model.chain(chain_id).unwrap().residues(), &[r1, r1_ins]);
    }

    #[test]
    fn add_atom_sets_back_reference_to_residue() {
        let mut model = Model::new();
        let chain_id = model.add_chain('A');
        let residue_id = model.add_residue(chain_id, 3, None, "SER").unwrap();
        let atom_id = model
            .add_atom_to_residue(residue_id, atom("CA", AltLoc::Blank))
            .unwrap();

        assert_eq!(model.atom(atom_id).unwrap().residue_id, residue_id);
        assert_eq!(
            model.residue(residue_id).unwrap().site("CA").unwrap().blank(),
            Some(atom_id)
        );
        assert_eq!(model.atom_count(), 1);
    }

    #[test]
    fn add_atom_rejects_duplicate_variant() {
        let mut model = Model::new();
        let chain_id = model.add_chain('A');
        let residue_id = model.add_residue(chain_id, 3, None, "SER").unwrap();
        assert!(model.add_atom_to_residue(residue_id, atom("OG", AltLoc::Code('A'))).is_some());
        assert!(model.add_atom_to_residue(residue_id, atom("OG", AltLoc::Code('B'))).is_some());
        assert!(model.add_atom_to_residue(residue_id, atom("OG", AltLoc::Code('A'))).is_none());
        assert_eq!(model.atom_count(), 2);
    }

    #[test]
    fn add_residue_to_missing_chain_returns_none() {
        let mut model = Model::new();
        assert!(model.add_residue(ChainId::default(), 1, None, "ALA").is_none());
    }

    #[test]
    fn structure_exposes_first_model() {
        let mut first = Model::new();
        first.add_chain('A');
        let structure = Structure::new(vec![first, Model::new()]);
        assert_eq!(structure.models().len(), 2);
        assert_eq!(structure.first_model().unwrap().chain_count(), 1);
        assert!(Structure::default().first_model().is_none());
    }
}
