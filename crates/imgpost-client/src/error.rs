use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid upload endpoint: {0}")]
    InvalidEndpoint(String),
    /// A transport refused the request before any network I/O.
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
