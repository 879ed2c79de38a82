use crate::core::models::atom::AltLoc;
use nalgebra::Point3;
use thiserror::Error;

/// Minimum line length able to hold the z coordinate (columns 47-54).
const MIN_ATOM_LINE_LEN: usize = 54;

/// Columns past the occupancy field (55-60) are never read.
const LAST_READ_COLUMN: usize = 60;

/// Why a single ATOM/HETATM line could not be read.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short for an ATOM/HETATM record (must be at least 54 chars, got {0})")]
    LineTooShort(usize),
    #[error("Record contains non-ASCII characters in columns 1-60")]
    NonAscii,
}

/// One parsed ATOM or HETATM record.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub is_hetero: bool,
    pub serial: usize,
    pub name: String,
    pub alt_loc: AltLoc,
    pub residue_name: String,
    pub chain_id: char,
    pub seq_num: isize,
    pub insertion_code: Option<char>,
    pub position: Point3<f64>,
    pub occupancy: f64,
}

/// Byte-slice of `line` between 0-based `start` and `end`, trimmed.
fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, idx: usize) -> char {
    line.as_bytes().get(idx).map(|&b| b as char).unwrap_or(' ')
}

fn parse_float(line: &str, start: usize, end: usize, columns: &'static str) -> Result<f64, PdbParseErrorKind> {
    let raw = slice_and_trim(line, start, end);
    raw.parse().map_err(|_| PdbParseErrorKind::InvalidFloat {
        columns,
        value: raw.to_string(),
    })
}

impl AtomRecord {
    /// Parses one line of a fixed-column coordinate file.
    ///
    /// # Return
    ///
    /// `Ok(None)` for lines that are not ATOM/HETATM records, `Ok(Some(_))`
    /// for a well-formed atom record.
    ///
    /// # Errors
    ///
    /// Returns a [`PdbParseErrorKind`] when the residue sequence number or a
    /// coordinate is not numeric, the atom name is blank, or the line ends
    /// before the coordinate columns.
    pub fn parse(line: &str) -> Result<Option<Self>, PdbParseErrorKind> {
        let is_hetero = if line.starts_with("ATOM") {
            false
        } else if line.starts_with("HETATM") {
            true
        } else {
            return Ok(None);
        };

        if line.len() < MIN_ATOM_LINE_LEN {
            return Err(PdbParseErrorKind::LineTooShort(line.len()));
        }
        if !line.as_bytes()[..line.len().min(LAST_READ_COLUMN)].is_ascii() {
            // Column slicing below assumes one byte per column.
            return Err(PdbParseErrorKind::NonAscii);
        }

        let name = slice_and_trim(line, 12, 16);
        if name.is_empty() {
            return Err(PdbParseErrorKind::MissingRequiredField { columns: "13-16" });
        }

        // Hybrid-36 and overflowed serials are informational only.
        let serial = slice_and_trim(line, 6, 11).parse().unwrap_or(0);

        let seq_str = slice_and_trim(line, 22, 26);
        let seq_num: isize = seq_str.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
            columns: "23-26",
            value: seq_str.to_string(),
        })?;

        let x = parse_float(line, 30, 38, "31-38")?;
        let y = parse_float(line, 38, 46, "39-46")?;
        let z = parse_float(line, 46, 54, "47-54")?;

        let occupancy = match slice_and_trim(line, 54, 60) {
            "" => 1.0,
            raw => raw.parse().map_err(|_| PdbParseErrorKind::InvalidFloat {
                columns: "55-60",
                value: raw.to_string(),
            })?,
        };

        let insertion_code = match column_char(line, 26) {
            ' ' => None,
            c => Some(c),
        };

        Ok(Some(Self {
            is_hetero,
            serial,
            name: name.to_string(),
            alt_loc: AltLoc::from_column(column_char(line, 16)),
            residue_name: slice_and_trim(line, 17, 20).to_string(),
            chain_id: column_char(line, 21),
            seq_num,
            insertion_code,
            position: Point3::new(x, y, z),
            occupancy,
        }))
    }
}
