use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxSheetError {
    #[error("Invalid cell reference '{cell}': {reason}")]
    InvalidCell { cell: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TaxSheetError {
    fn from(e: serde_json::Error) -> Self {
        TaxSheetError::SerializationError(e.to_string())
    }
}
