use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinketError {
    #[error("{field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid content catalog: {0}")]
    CatalogParse(serde_json::Error),

    #[error("content catalog {section}[{index}]: {reason}")]
    CatalogInvalid {
        section: &'static str,
        index: usize,
        reason: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FinketError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        FinketError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinketError>;
