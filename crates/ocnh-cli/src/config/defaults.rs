use ocnh::engine::config::{DEFAULT_BOND_THRESHOLD, DEFAULT_DELIMITER, DEFAULT_PRECISION};

pub struct DefaultsConfig {
    pub bond_threshold: f64,
    pub precision: usize,
    pub delimiter: char,
    pub include_chain_column: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            bond_threshold: DEFAULT_BOND_THRESHOLD,
            precision: DEFAULT_PRECISION,
            delimiter: DEFAULT_DELIMITER as char,
            include_chain_column: false,
        }
    }
}
