use thiserror::Error;

/// Failures surfaced by the ledger model, its stores, and the report pipeline.
///
/// None of these are fatal: each is reported at the interaction that raised it.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Asset unavailable: {0}")]
    AssetLoad(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        LedgerError::NotFound(message.into())
    }

    pub fn backend(message: impl Into<String>) -> Self {
        LedgerError::Backend(message.into())
    }

    /// Whether the failure came from the backing store rather than user input.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            LedgerError::Backend(_) | LedgerError::Io(_) | LedgerError::Serde(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
