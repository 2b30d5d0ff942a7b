use thiserror::Error;

/// Core error type shared across ddlsmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text is not valid JSON.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON document does not have the physical model structure.
    #[error("invalid model format: {0}")]
    ModelFormat(String),
}

/// Convenience alias for results returned by ddlsmith crates.
pub type Result<T> = std::result::Result<T, Error>;
