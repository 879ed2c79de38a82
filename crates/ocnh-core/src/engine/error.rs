use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure contains no models")]
    EmptyStructure,

    #[error("Chain '{chain_id}' not found in structure (available: {available})")]
    ChainNotFound { chain_id: char, available: String },
}
