use async_trait::async_trait;

use imgpost_core::{UploadRequest, UploadResponse, UPLOAD_PATH};

use crate::UploadError;

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub upload_path: String,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            upload_path: UPLOAD_PATH.to_string(),
        }
    }

    pub fn with_upload_path(mut self, path: impl Into<String>) -> Self {
        self.upload_path = path.into();
        self
    }
}

/// One request/response round trip. Implementations resolve or fail exactly
/// once per call and never retry.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn post(&self, request: UploadRequest) -> Result<UploadResponse, UploadError>;
}
