use super::altloc::{altloc_label, resolve};
use super::record::{SkipReason, TorsionRecord, WindowOutcome};
use crate::core::models::ids::ResidueId;
use crate::core::models::structure::Model;
use crate::core::utils::geometry::dihedral;
use crate::core::utils::identifiers::is_standard_amino_acid;

/// Measures the O(i)-C(i)-N(i+1)-H(i+1) torsion across one bonded residue pair.
///
/// Atom resolution is checked first, then geometry, then residue identity;
/// the first failure determines the [`SkipReason`].
pub fn evaluate_window(
    model: &Model,
    chain_id: char,
    donor: ResidueId,
    acceptor: ResidueId,
    requested: Option<char>,
) -> WindowOutcome {
    match measure(model, chain_id, donor, acceptor, requested) {
        Ok(record) => WindowOutcome::Record(record),
        Err(reason) => WindowOutcome::Skipped(reason),
    }
}

fn measure(
    model: &Model,
    chain_id: char,
    donor: ResidueId,
    acceptor: ResidueId,
    requested: Option<char>,
) -> Result<TorsionRecord, SkipReason> {
    let find = |residue: ResidueId, atom_name: &'static str| {
        resolve(model, residue, atom_name, requested)
            .atom()
            .ok_or_else(|| SkipReason::MissingAtom {
                residue: residue_label(model, residue),
                atom_name,
            })
    };
    let o = find(donor, "O")?;
    let c = find(donor, "C")?;
    let n = find(acceptor, "N")?;
    let h = find(acceptor, "H")?;

    let angle_degrees = dihedral(&o.position, &c.position, &n.position, &h.position)
        .map_err(|_| SkipReason::DegenerateGeometry)?;

    let donor_name = residue_name(model, donor);
    let acceptor_name = residue_name(model, acceptor);
    if !is_standard_amino_acid(donor_name) || !is_standard_amino_acid(acceptor_name) {
        return Err(SkipReason::NonStandardResidue {
            donor: donor_name.to_string(),
            acceptor: acceptor_name.to_string(),
        });
    }

    Ok(TorsionRecord {
        chain_id,
        donor_label: format!("{}_{}", altloc_label(model, donor, requested), donor_name),
        acceptor_label: format!(
            "{}_{}",
            altloc_label(model, acceptor, requested),
            acceptor_name
        ),
        residue_id: model.residue(acceptor).map_or(0, |r| r.seq_num),
        angle_degrees,
    })
}

fn residue_name(model: &Model, id: ResidueId) -> &str {
    model.residue(id).map_or("", |r| r.name.as_str())
}

fn residue_label(model: &Model, id: ResidueId) -> String {
    model
        .residue(id)
        .map(|r| format!("{} {}", r.name, r.display_id()))
        .unwrap_or_default()
}
