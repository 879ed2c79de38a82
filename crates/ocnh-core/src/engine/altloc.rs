use crate::core::models::atom::{AltLoc, Atom};
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::residue::AtomSite;
use crate::core::models::structure::Model;

/// Outcome of looking up one named atom for a requested conformer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Atom),
    Missing,
}

impl<'a> Resolution<'a> {
    pub fn atom(self) -> Option<&'a Atom> {
        match self {
            Resolution::Found(atom) => Some(atom),
            Resolution::Missing => None,
        }
    }
}

/// Picks the variant of `site` that belongs to the requested conformer.
///
/// Without a request only the blank variant qualifies. With a requested code
/// the matching variant wins, and the blank variant stands in when the site
/// has no such code. Anything else is `None`.
pub fn select_variant(site: &AtomSite, requested: Option<char>) -> Option<AtomId> {
    match requested {
        None => site.blank(),
        Some(code) => site.variant(AltLoc::Code(code)).or_else(|| site.blank()),
    }
}

/// Resolves `atom_name` in `residue` for the requested conformer.
pub fn resolve<'a>(
    model: &'a Model,
    residue: ResidueId,
    atom_name: &str,
    requested: Option<char>,
) -> Resolution<'a> {
    model
        .residue(residue)
        .and_then(|r| r.site(atom_name))
        .and_then(|site| select_variant(site, requested))
        .and_then(|id| model.atom(id))
        .map_or(Resolution::Missing, Resolution::Found)
}

/// The conformer tag written in front of a residue name.
///
/// Equals the requested code when the residue's `CA` carries that code, and
/// is empty otherwise (including when no conformer was requested).
pub fn altloc_label(model: &Model, residue: ResidueId, requested: Option<char>) -> String {
    let Some(code) = requested else {
        return String::new();
    };
    let has_code = model
        .residue(residue)
        .and_then(|r| r.site("CA"))
        .is_some_and(|site| site.variant(AltLoc::Code(code)).is_some());
    if has_code {
        code.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn residue_with(atoms: &[(&str, AltLoc, f64)]) -> (Model, ResidueId) {
        let mut model = Model::new();
        let chain = model.add_chain('A');
        let residue = model.add_residue(chain, 10, None, "SER").unwrap();
        for &(name, alt_loc, x) in atoms {
            let atom = Atom::new(name, residue, Point3::new(x, 0.0, 0.0)).with_alt_loc(alt_loc);
            model.add_atom_to_residue(residue, atom).unwrap();
        }
        (model, residue)
    }

    fn resolved_x(model: &Model, residue: ResidueId, name: &str, requested: Option<char>) -> Option<f64> {
        resolve(model, residue, name, requested)
            .atom()
            .map(|a| a.position.x)
    }

    #[test]
    fn no_request_selects_only_blank_variant() {
        let (model, residue) = residue_with(&[
            ("N", AltLoc::Blank, 1.0),
            ("OG", AltLoc::Code('A'), 2.0),
            ("OG", AltLoc::Code('B'), 3.0),
        ]);
        assert_eq!(resolved_x(&model, residue, "N", None), Some(1.0));
        assert_eq!(resolve(&model, residue, "OG", None), Resolution::Missing);
    }

    #[test]
    fn requested_code_wins_over_blank() {
        let (model, residue) = residue_with(&[
            ("OG", AltLoc::Blank, 1.0),
            ("OG", AltLoc::Code('B'), 3.0),
        ]);
        assert_eq!(resolved_x(&model, residue, "OG", Some('B')), Some(3.0));
    }

    #[test]
    fn requested_code_falls_back_to_blank() {
        let (model, residue) = residue_with(&[("H", AltLoc::Blank, 1.0)]);
        assert_eq!(resolved_x(&model, residue, "H", Some('A')), Some(1.0));
    }

    #[test]
    fn requested_code_absent_everywhere_is_missing() {
        let (model, residue) = residue_with(&[("H", AltLoc::Code('A'), 1.0)]);
        assert_eq!(resolve(&model, residue, "H", Some('B')), Resolution::Missing);
    }

    #[test]
    fn unknown_atom_name_is_missing() {
        let (model, residue) = residue_with(&[("CA", AltLoc::Blank, 1.0)]);
        assert_eq!(resolve(&model, residue, "H", Some('A')), Resolution::Missing);
        assert_eq!(resolve(&model, residue, "H", None), Resolution::Missing);
    }

    #[test]
    fn label_reflects_requested_code_on_ca() {
        let (model, residue) = residue_with(&[
            ("CA", AltLoc::Code('A'), 1.0),
            ("CA", AltLoc::Code('B'), 2.0),
        ]);
        assert_eq!(altloc_label(&model, residue, Some('A')), "A");
        assert_eq!(altloc_label(&model, residue, Some('C')), "");
        assert_eq!(altloc_label(&model, residue, None), "");
    }

    #[test]
    fn label_is_empty_for_blank_ca_even_when_code_requested() {
        let (model, residue) = residue_with(&[("CA", AltLoc::Blank, 1.0)]);
        assert_eq!(altloc_label(&model, residue, Some('A')), "");
    }
}
