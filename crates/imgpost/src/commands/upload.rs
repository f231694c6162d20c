use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::{info, warn};

use imgpost_client::{
    ConsoleLog, DiagnosticLog, FileInputControl, HttpUploadClient, SubmitControl,
    TransportConfig, UploadHandler,
};

use super::read_selection;
use crate::config::transport_config;
use crate::output;

#[derive(Args)]
pub struct UploadArgs {
    /// Files to select; only the first one is read and uploaded
    files: Vec<PathBuf>,
    /// Number of times to activate the submit control
    #[arg(short = 'n', long, default_value_t = 1)]
    repeat: usize,
}

pub async fn run(args: UploadArgs, server: Option<&str>) -> anyhow::Result<()> {
    let handled = execute(args, &transport_config(server), Arc::new(ConsoleLog)).await?;
    info!("finished {}", output::count(handled, "upload"));
    Ok(())
}

/// Fire `args.repeat` activations against `config` and wait until every
/// upload has been logged. Returns the number of activations handled.
pub async fn execute(
    args: UploadArgs,
    config: &TransportConfig,
    log: Arc<dyn DiagnosticLog>,
) -> anyhow::Result<usize> {
    let selection = read_selection(&args.files)?;
    if selection.is_empty() {
        warn!("no file selected; the request will carry an empty file part");
    }

    let client = HttpUploadClient::new(config)?;
    info!(endpoint = %client.endpoint(), "uploading");

    let input = Arc::new(FileInputControl::new());
    input.select(selection);
    let handler = UploadHandler::new(input, Arc::new(client), log);

    let (control, stream) = SubmitControl::new();
    let bound = handler.bind(stream);
    let mut fired = 0;
    for _ in 0..args.repeat {
        if control.activate().is_none() {
            break;
        }
        fired += 1;
    }
    drop(control);

    let handled = bound.await?;
    if handled < fired {
        anyhow::bail!("upload handler stopped after {handled} of {fired} activations");
    }
    Ok(handled)
}
