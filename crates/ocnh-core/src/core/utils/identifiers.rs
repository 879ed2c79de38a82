use phf::{Map, phf_map};

/// The twenty standard amino acids, three-letter code to one-letter code.
static STANDARD_AMINO_ACIDS: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "CYS" => 'C', "ASP" => 'D', "GLU" => 'E', "PHE" => 'F',
    "GLY" => 'G', "HIS" => 'H', "ILE" => 'I', "LYS" => 'K', "LEU" => 'L',
    "MET" => 'M', "ASN" => 'N', "PRO" => 'P', "GLN" => 'Q', "ARG" => 'R',
    "SER" => 'S', "THR" => 'T', "VAL" => 'V', "TRP" => 'W', "TYR" => 'Y',
};

/// Whether `residue_name` is one of the twenty standard amino-acid codes.
///
/// Matching is exact: modified residues (e.g. `MSE`), waters and ligands
/// are not standard.
pub fn is_standard_amino_acid(residue_name: &str) -> bool {
    STANDARD_AMINO_ACIDS.contains_key(residue_name.trim())
}

pub fn one_letter_code(residue_name: &str) -> Option<char> {
    STANDARD_AMINO_ACIDS.get(residue_name.trim()).copied()
}

/// One-letter sequence of the given residue names, `X` for anything non-standard.
pub fn sequence_string<'a>(residue_names: impl IntoIterator<Item = &'a str>) -> String {
    residue_names
        .into_iter()
        .map(|name| one_letter_code(name).unwrap_or('X'))
        .collect()
}
