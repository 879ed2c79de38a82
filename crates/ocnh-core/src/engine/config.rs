use thiserror::Error;

/// Default upper bound on the C(i)–N(i+1) distance of a peptide bond, in Angstroms.
pub const DEFAULT_BOND_THRESHOLD: f64 = 1.8;
/// Default number of decimal places written for angles.
pub const DEFAULT_PRECISION: usize = 3;
pub const DEFAULT_DELIMITER: u8 = b',';

const MAX_PRECISION: usize = 12;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Bond threshold must be a positive, finite distance (got {0})")]
    InvalidBondThreshold(f64),
    #[error("Precision must be at most {max} decimal places (got {value})")]
    InvalidPrecision { value: usize, max: usize },
    #[error("Delimiter must be a single printable ASCII character other than '\"' (got {0:?})")]
    InvalidDelimiter(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationConfig {
    pub bond_threshold: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            bond_threshold: DEFAULT_BOND_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub precision: usize,
    pub delimiter: u8,
    pub include_chain_column: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            delimiter: DEFAULT_DELIMITER,
            include_chain_column: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionConfig {
    pub segmentation: SegmentationConfig,
    pub output: OutputConfig,
}

#[derive(Default)]
pub struct ExtractionConfigBuilder {
    bond_threshold: Option<f64>,
    precision: Option<usize>,
    delimiter: Option<char>,
    include_chain_column: Option<bool>,
}

impl ExtractionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_threshold(mut self, threshold: f64) -> Self {
        self.bond_threshold = Some(threshold);
        self
    }
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
    pub fn include_chain_column(mut self, include: bool) -> Self {
        self.include_chain_column = Some(include);
        self
    }

    pub fn build(self) -> Result<ExtractionConfig, ConfigError> {
        let bond_threshold = self.bond_threshold.unwrap_or(DEFAULT_BOND_THRESHOLD);
        if !bond_threshold.is_finite() || bond_threshold <= 0.0 {
            return Err(ConfigError::InvalidBondThreshold(bond_threshold));
        }

        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        if precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision {
                value: precision,
                max: MAX_PRECISION,
            });
        }

        let delimiter = match self.delimiter {
            None => DEFAULT_DELIMITER,
            Some(c) if c == '\t' || (c.is_ascii_graphic() && c != '"') => c as u8,
            Some(c) => return Err(ConfigError::InvalidDelimiter(c)),
        };

        Ok(ExtractionConfig {
            segmentation: SegmentationConfig { bond_threshold },
            output: OutputConfig {
                precision,
                delimiter,
                include_chain_column: self.include_chain_column.unwrap_or(false),
            },
        })
    }
}
