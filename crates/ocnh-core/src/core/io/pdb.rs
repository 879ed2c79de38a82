use crate::core::io::record::{AtomRecord, PdbParseErrorKind};
use crate::core::io::traits::StructureFile;
use crate::core::models::builder::{BuildError, StructureBuilder};
use crate::core::models::structure::Structure;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data on line {line}: {source}")]
    Build {
        line: usize,
        #[source]
        source: BuildError,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

/// Reader for fixed-column PDB coordinate files.
///
/// Only `ATOM`, `HETATM`, `MODEL`, `ENDMDL` and `END` records are
/// interpreted; everything else is skipped. Reading stops at the first
/// `ENDMDL`, so later models are never parsed.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut builder = StructureBuilder::new();
        let mut atom_count = 0usize;
        let mut in_model = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = line.get(0..6.min(line.len())).unwrap_or("").trim_end();
            match record_type {
                "ATOM" | "HETATM" => {
                    let record = AtomRecord::parse(&line)
                        .map_err(|kind| PdbError::Parse {
                            line: line_num,
                            kind,
                        })?
                        .ok_or_else(|| PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField { columns: "1-6" },
                        })?;
                    builder
                        .add_record(&record)
                        .map_err(|source| PdbError::Build {
                            line: line_num,
                            source,
                        })?;
                    atom_count += 1;
                }
                "MODEL" if in_model => break,
                "MODEL" => {
                    in_model = true;
                    builder.start_model();
                }
                "ENDMDL" => break,
                "END" => break,
                _ => {}
            }
        }

        if atom_count == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }

        let structure = builder.build();
        debug!(
            chains = structure.first_model().map_or(0, |m| m.chain_count()),
            atoms = atom_count,
            "Parsed PDB structure."
        );
        Ok(structure)
    }
}
