use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use tracing::debug;

use imgpost_core::{FilePart, UploadRequest, UploadResponse, FILE_FIELD};

use crate::transport::{TransportConfig, UploadTransport};
use crate::UploadError;

/// Posts upload requests as `multipart/form-data` over HTTP.
///
/// The underlying client has no timeout configured: a request that never
/// completes never resolves.
#[derive(Debug, Clone)]
pub struct HttpUploadClient {
    endpoint: Url,
    client: reqwest::Client,
}

fn join_endpoint(base_url: &str, path: &str) -> Result<Url, UploadError> {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    let raw = format!("{base}/{path}");
    let url = Url::parse(&raw).map_err(|e| UploadError::InvalidEndpoint(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(UploadError::InvalidEndpoint(format!(
            "{raw}: unsupported scheme '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

fn build_form(request: UploadRequest) -> Result<Form, UploadError> {
    let form = match request.into_part() {
        FilePart::Present(file) => {
            let len = file.len() as u64;
            let part = Part::stream_with_length(file.data().clone(), len)
                .file_name(file.name().to_string())
                .mime_str(file.media_type().as_ref())?;
            Form::new().part(FILE_FIELD, part)
        }
        FilePart::Missing => Form::new().text(FILE_FIELD, ""),
    };
    Ok(form)
}

impl HttpUploadClient {
    pub fn new(config: &TransportConfig) -> Result<Self, UploadError> {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(
        config: &TransportConfig,
        client: reqwest::Client,
    ) -> Result<Self, UploadError> {
        let endpoint = join_endpoint(&config.base_url, &config.upload_path)?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UploadTransport for HttpUploadClient {
    async fn post(&self, request: UploadRequest) -> Result<UploadResponse, UploadError> {
        debug!(
            endpoint = %self.endpoint,
            file = request.file().map(|f| f.name()).unwrap_or("<none>"),
            "posting upload"
        );
        let form = build_form(request)?;
        let resp = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        // Like fetch, an HTTP error status is still a response; only the body
        // decode decides success.
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok(UploadResponse::new(status, body))
    }
}
