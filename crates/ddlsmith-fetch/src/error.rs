use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unauthorized (HTTP {status}): check the API token")]
    Unauthorized { status: u16 },
    #[error("model {model_id} not found")]
    NotFound { model_id: String },
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },
}
