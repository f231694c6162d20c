use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use imgpost_core::{FileSelection, UploadRequest};

use crate::control::{Activation, ActivationStream, FileInput};
use crate::log::{DiagnosticLog, LogEntry};
use crate::transport::UploadTransport;

/// How one upload ended. Both variants have already been written to the
/// diagnostic log by the time the task resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Success(Value),
    Failure(String),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success(_))
    }
}

/// Turns submit activations into multipart uploads.
///
/// Every activation suppresses its default action, reads the file input,
/// and starts an independent upload task. Nothing is shared between tasks:
/// overlapping uploads are not queued, deduplicated or ordered.
#[derive(Clone)]
pub struct UploadHandler {
    input: Arc<dyn FileInput>,
    transport: Arc<dyn UploadTransport>,
    log: Arc<dyn DiagnosticLog>,
}

impl UploadHandler {
    pub fn new(
        input: Arc<dyn FileInput>,
        transport: Arc<dyn UploadTransport>,
        log: Arc<dyn DiagnosticLog>,
    ) -> Self {
        Self {
            input,
            transport,
            log,
        }
    }

    /// React to a single activation. Returns as soon as the upload task is
    /// spawned; the handle resolves once the outcome has been logged.
    pub fn handle_activation(&self, activation: &Activation) -> JoinHandle<UploadOutcome> {
        tokio::spawn(self.activation_task(activation))
    }

    /// Upload the first entry of `selection` in a new task.
    pub fn submit_upload(&self, selection: &FileSelection) -> JoinHandle<UploadOutcome> {
        tokio::spawn(self.upload_task(selection))
    }

    /// Listen on `stream` until every submit control handle is dropped, then
    /// wait for the uploads still in flight. Resolves to the number of
    /// activations handled.
    pub fn bind(self, mut stream: ActivationStream) -> JoinHandle<usize> {
        tokio::spawn(async move {
            let mut inflight = JoinSet::new();
            let mut handled = 0usize;

            while let Some(activation) = stream.next().await {
                inflight.spawn(self.activation_task(&activation));
                handled += 1;
                while inflight.try_join_next().is_some() {}
            }

            debug!(handled, pending = inflight.len(), "submit control closed");
            while inflight.join_next().await.is_some() {}
            handled
        })
    }

    fn activation_task(
        &self,
        activation: &Activation,
    ) -> impl Future<Output = UploadOutcome> + Send + 'static {
        activation.prevent_default();
        let selection = self.input.selection();
        debug!(
            activation = activation.id(),
            selected = selection.len(),
            "submit activated"
        );
        self.upload_task(&selection)
    }

    fn upload_task(
        &self,
        selection: &FileSelection,
    ) -> impl Future<Output = UploadOutcome> + Send + 'static {
        let request = UploadRequest::from_selection(selection);
        let transport = Arc::clone(&self.transport);
        let log = Arc::clone(&self.log);
        async move { run_upload(transport.as_ref(), log.as_ref(), request).await }
    }
}

async fn run_upload(
    transport: &dyn UploadTransport,
    log: &dyn DiagnosticLog,
    request: UploadRequest,
) -> UploadOutcome {
    let file = request.file().map(|f| f.name().to_string());
    match transport.post(request).await {
        Ok(response) => {
            info!(status = response.status, file = ?file, "upload completed");
            let body = response.into_body();
            log.record(LogEntry::Response(body.clone()));
            UploadOutcome::Success(body)
        }
        Err(err) => {
            warn!(file = ?file, "upload failed: {err}");
            let reason = err.to_string();
            log.record(LogEntry::Error(reason.clone()));
            UploadOutcome::Failure(reason)
        }
    }
}
