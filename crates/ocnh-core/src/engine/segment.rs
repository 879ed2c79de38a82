use super::config::SegmentationConfig;
use crate::core::models::chain::Chain;
use crate::core::models::ids::ResidueId;
use crate::core::models::structure::Model;
use crate::core::utils::geometry::distance;
use crate::core::utils::identifiers::sequence_string;
use itertools::Itertools;
use tracing::{debug, trace};

/// A maximal run of consecutive residues joined by peptide bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeptideSegment<'a> {
    pub residues: &'a [ResidueId],
}

impl PeptideSegment<'_> {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Splits `chain` into peptide-bonded segments, in chain order.
///
/// Every residue of the chain lands in exactly one segment; an unbonded
/// residue forms a segment of its own.
pub fn segment<'a>(
    model: &Model,
    chain: &'a Chain,
    config: &SegmentationConfig,
) -> Vec<PeptideSegment<'a>> {
    let residues = chain.residues();
    if residues.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for (idx, (&prev, &next)) in residues.iter().tuple_windows().enumerate() {
        if !is_peptide_bonded(model, prev, next, config.bond_threshold) {
            trace!(
                chain = %chain.id,
                after = %residue_label(model, prev),
                before = %residue_label(model, next),
                "Chain break"
            );
            segments.push(PeptideSegment {
                residues: &residues[start..=idx],
            });
            start = idx + 1;
        }
    }
    segments.push(PeptideSegment {
        residues: &residues[start..],
    });

    for seg in &segments {
        let names = seg
            .residues
            .iter()
            .filter_map(|&id| model.residue(id))
            .map(|r| r.name.as_str());
        debug!(
            chain = %chain.id,
            length = seg.len(),
            sequence = %sequence_string(names),
            "Peptide segment"
        );
    }

    segments
}

/// Whether `prev`'s carbonyl carbon and `next`'s amide nitrogen are close
/// enough to be bonded in some conformer.
///
/// Every pair of `C`/`N` variants with compatible altLocs is tested; a
/// missing `C` or `N` never bonds.
fn is_peptide_bonded(model: &Model, prev: ResidueId, next: ResidueId, threshold: f64) -> bool {
    let c_site = model.residue(prev).and_then(|r| r.site("C"));
    let n_site = model.residue(next).and_then(|r| r.site("N"));
    let (Some(c_site), Some(n_site)) = (c_site, n_site) else {
        return false;
    };

    c_site
        .variants()
        .iter()
        .cartesian_product(n_site.variants().iter())
        .filter(|((c_loc, _), (n_loc, _))| c_loc.is_compatible_with(n_loc))
        .filter_map(|((_, c_id), (_, n_id))| Some((model.atom(*c_id)?, model.atom(*n_id)?)))
        .any(|(c, n)| distance(&c.position, &n.position) < threshold)
}

fn residue_label(model: &Model, id: ResidueId) -> String {
    model
        .residue(id)
        .map(|r| format!("{} {}", r.name, r.display_id()))
        .unwrap_or_default()
}
