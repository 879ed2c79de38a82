use std::path::{Path, PathBuf};

const OUTPUT_TAG: &str = "OCNH_dihedral";
const OUTPUT_EXTENSION: &str = "csv";

/// The table path written next to `input` when no output path is given.
///
/// `structures/1abc.pdb` with chain `A` becomes
/// `structures/1abc_A_OCNH_dihedral.csv`, or
/// `structures/1abc_A_OCNH_dihedral_altloc_B.csv` when conformer `B` is requested.
pub fn default_output_path(input: &Path, chain_id: char, altloc: Option<char>) -> PathBuf {
    input.with_file_name(output_file_name(input, chain_id, altloc))
}

/// Same file name as [`default_output_path`], placed in `dir` instead.
pub fn output_path_in(dir: &Path, input: &Path, chain_id: char, altloc: Option<char>) -> PathBuf {
    dir.join(output_file_name(input, chain_id, altloc))
}

fn output_file_name(input: &Path, chain_id: char, altloc: Option<char>) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match altloc {
        Some(code) => format!("{stem}_{chain_id}_{OUTPUT_TAG}_altloc_{code}.{OUTPUT_EXTENSION}"),
        None => format!("{stem}_{chain_id}_{OUTPUT_TAG}.{OUTPUT_EXTENSION}"),
    }
}
