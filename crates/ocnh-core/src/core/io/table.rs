use crate::engine::config::OutputConfig;
use crate::engine::record::{ExtractionSummary, TorsionRecord};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

const CHAIN_COLUMN: &str = "Chain_ID";
const TORSION_COLUMNS: [&str; 4] = [
    "Residue_i",
    "Residue_i+1",
    "Residue_ID",
    "Dihedral_Angle_Degrees",
];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes torsion records as a delimited table.
///
/// The header is emitted before the first row, or on [`finish`](Self::finish)
/// when no rows were written, so an empty extraction still yields a valid table.
pub struct TableWriter<W: Write> {
    inner: csv::Writer<W>,
    precision: usize,
    include_chain_column: bool,
    header_written: bool,
}

impl TableWriter<File> {
    pub fn create<P: AsRef<Path>>(path: P, config: &OutputConfig) -> Result<Self, TableError> {
        let file = File::create(path)?;
        Ok(Self::new(file, config))
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W, config: &OutputConfig) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(false)
            .from_writer(writer);
        Self {
            inner,
            precision: config.precision,
            include_chain_column: config.include_chain_column,
            header_written: false,
        }
    }

    fn ensure_header(&mut self) -> Result<(), TableError> {
        if self.header_written {
            return Ok(());
        }
        if self.include_chain_column {
            self.inner
                .write_record(std::iter::once(CHAIN_COLUMN).chain(TORSION_COLUMNS))?;
        } else {
            self.inner.write_record(TORSION_COLUMNS)?;
        }
        self.header_written = true;
        Ok(())
    }

    pub fn write_record(&mut self, record: &TorsionRecord) -> Result<(), TableError> {
        self.ensure_header()?;

        let residue_id = record.residue_id.to_string();
        let angle = format_angle(record.angle_degrees, self.precision);
        if self.include_chain_column {
            let chain = record.chain_id.to_string();
            self.inner.write_record([
                chain.as_str(),
                &record.donor_label,
                &record.acceptor_label,
                &residue_id,
                &angle,
            ])?;
        } else {
            self.inner.write_record([
                record.donor_label.as_str(),
                &record.acceptor_label,
                &residue_id,
                &angle,
            ])?;
        }
        Ok(())
    }

    pub fn write_all<'r>(
        &mut self,
        records: impl IntoIterator<Item = &'r TorsionRecord>,
    ) -> Result<(), TableError> {
        self.ensure_header()?;
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flushes pending rows and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, TableError> {
        self.ensure_header()?;
        self.inner
            .into_inner()
            .map_err(|e| TableError::Io(e.into_error()))
    }
}

/// Writes `records` to a new file at `path`, replacing any existing file.
pub fn write_table<P: AsRef<Path>>(
    path: P,
    records: &[TorsionRecord],
    config: &OutputConfig,
) -> Result<(), TableError> {
    let mut writer = TableWriter::create(path, config)?;
    writer.write_all(records)?;
    writer.finish()?.flush()?;
    Ok(())
}

/// Writes one row per summary, headed by the summary field names.
pub fn write_summaries<W: Write>(
    writer: W,
    summaries: &[ExtractionSummary],
) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for summary in summaries {
        csv_writer.serialize(summary)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Fixed-point rendering that never produces a signed zero such as `-0.000`.
fn format_angle(angle: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, angle);
    match formatted.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(donor: &str, acceptor: &str, residue_id: isize, angle: f64) -> TorsionRecord {
        TorsionRecord {
            chain_id: 'A',
            donor_label: donor.to_string(),
            acceptor_label: acceptor.to_string(),
            residue_id,
            angle_degrees: angle,
        }
    }

    fn render(records: &[TorsionRecord], config: &OutputConfig) -> String {
        let mut writer = TableWriter::new(Vec::new(), config);
        writer.write_all(records).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn writes_header_and_rows_with_default_config() {
        let records = [
            record("_ALA", "_GLY", 2, 179.98765),
            record("_GLY", "_SER", 3, -3.5),
        ];
        let out = render(&records, &OutputConfig::default());
        assert_eq!(
            out,
            "Residue_i,Residue_i+1,Residue_ID,Dihedral_Angle_Degrees\n\
             _ALA,_GLY,2,179.988\n\
             _GLY,_SER,3,-3.500\n"
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let out = render(&[], &OutputConfig::default());
        assert_eq!(out, "Residue_i,Residue_i+1,Residue_ID,Dihedral_Angle_Degrees\n");
    }

    #[test]
    fn chain_column_and_delimiter_are_honored() {
        let config = OutputConfig {
            precision: 1,
            delimiter: b'\t',
            include_chain_column: true,
        };
        let out = render(&[record("A_LYS", "A_VAL", -4, 12.34)], &config);
        assert_eq!(
            out,
            "Chain_ID\tResidue_i\tResidue_i+1\tResidue_ID\tDihedral_Angle_Degrees\n\
             A\tA_LYS\tA_VAL\t-4\t12.3\n"
        );
    }

    #[test]
    fn format_angle_suppresses_negative_zero() {
        assert_eq!(format_angle(-0.0001, 3), "0.000");
        assert_eq!(format_angle(-0.0, 0), "0");
        assert_eq!(format_angle(-0.0006, 3), "-0.001");
        assert_eq!(format_angle(180.0, 3), "180.000");
    }

    #[test]
    fn write_table_is_byte_identical_across_runs() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        let records = vec![record("_MET", "_LYS", 2, -178.2)];

        write_table(&first, &records, &OutputConfig::default()).unwrap();
        write_table(&second, &records, &OutputConfig::default()).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn summaries_serialize_with_field_header() {
        let mut summary = ExtractionSummary::new("1abc.pdb", 'A', Some('B'));
        summary.segments = 2;
        summary.candidate_windows = 5;
        summary.emitted = 4;
        summary.skipped_missing_atoms = 1;

        let mut buf = Vec::new();
        write_summaries(&mut buf, &[summary]).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "source,chain_id,altloc,segments,candidate_windows,emitted,\
             skipped_missing_atoms,skipped_degenerate,skipped_nonstandard"
        );
        assert_eq!(lines.next().unwrap(), "1abc.pdb,A,B,2,5,4,1,0,0");
        assert!(lines.next().is_none());
    }
}
