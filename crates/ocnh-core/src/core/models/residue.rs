use super::atom::AltLoc;
use super::ids::{AtomId, ChainId};
use std::collections::HashMap;

/// All alternate-location variants recorded for one atom name in a residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSite {
    pub name: String,
    variants: Vec<(AltLoc, AtomId)>, // File order, at most one entry per AltLoc
}

impl AtomSite {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            variants: Vec::new(),
        }
    }

    pub fn variants(&self) -> &[(AltLoc, AtomId)] {
        &self.variants
    }

    pub fn variant(&self, alt_loc: AltLoc) -> Option<AtomId> {
        self.variants
            .iter()
            .find(|(loc, _)| *loc == alt_loc)
            .map(|(_, id)| *id)
    }

    /// The atom shared by every conformer, if the site has one.
    pub fn blank(&self) -> Option<AtomId> {
        self.variant(AltLoc::Blank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub seq_num: isize,                 // Residue sequence number from source file
    pub insertion_code: Option<char>,   // Insertion code, if any
    pub name: String,                   // Name of the residue (e.g., "ALA", "HOH")
    pub chain_id: ChainId,              // ID of the parent chain
    sites: Vec<AtomSite>,               // Atom sites in first-seen order
    site_index: HashMap<String, usize>, // Map from atom name to its position in `sites`
}

impl Residue {
    pub(crate) fn new(
        seq_num: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            seq_num,
            insertion_code,
            name: name.to_string(),
            chain_id,
            sites: Vec::new(),
            site_index: HashMap::new(),
        }
    }

    /// Registers an atom variant under its name.
    ///
    /// Returns `false` without modifying the residue when a variant with the
    /// same name and altLoc is already present.
    pub(crate) fn add_atom(&mut self, atom_name: &str, alt_loc: AltLoc, atom_id: AtomId) -> bool {
        let idx = match self.site_index.get(atom_name) {
            Some(&idx) => idx,
            None => {
                self.sites.push(AtomSite::new(atom_name));
                let idx = self.sites.len() - 1;
                self.site_index.insert(atom_name.to_string(), idx);
                idx
            }
        };

        let site = &mut self.sites[idx];
        if site.variant(alt_loc).is_some() {
            return false;
        }
        site.variants.push((alt_loc, atom_id));
        true
    }

    pub fn sites(&self) -> &[AtomSite] {
        &self.sites
    }

    pub fn site(&self, atom_name: &str) -> Option<&AtomSite> {
        self.site_index.get(atom_name).map(|&idx| &self.sites[idx])
    }

    /// Sequence number plus insertion code, e.g. `52` or `52A`.
    pub fn display_id(&self) -> String {
        match self.insertion_code {
            Some(icode) => format!("{}{}", self.seq_num, icode),
            None => self.seq_num.to_string(),
        }
    }
}
