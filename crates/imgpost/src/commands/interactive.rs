use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use imgpost_client::{
    ConsoleLog, DiagnosticLog, FileInputControl, HttpUploadClient, SubmitControl,
    TransportConfig, UploadHandler,
};

use super::read_selection;
use crate::config::transport_config;
use crate::output;

/// Parse one input line into the paths it selects. Blank lines select nothing.
fn parse_selection_line(line: &str) -> Vec<PathBuf> {
    line.split_whitespace().map(PathBuf::from).collect()
}

pub async fn run(server: Option<&str>) -> anyhow::Result<()> {
    let config = transport_config(server);
    let endpoint = HttpUploadClient::new(&config)?.endpoint().to_string();
    eprintln!("{}", output::header("imgpost interactive"));
    eprintln!("{}", output::kv("endpoint", &endpoint));
    eprintln!("enter file paths and press return to submit; ctrl-d to quit");

    let handled = session(
        BufReader::new(tokio::io::stdin()),
        &config,
        Arc::new(ConsoleLog),
    )
    .await?;
    info!("session ended after {}", output::count(handled, "activation"));
    Ok(())
}

/// Treat every line of `reader` as a new selection plus one activation.
///
/// A read error ends the session, but only after every upload already started
/// has been logged.
pub async fn session<R>(
    reader: R,
    config: &TransportConfig,
    log: Arc<dyn DiagnosticLog>,
) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let client = HttpUploadClient::new(config)?;
    let input = Arc::new(FileInputControl::new());
    let handler = UploadHandler::new(input.clone(), Arc::new(client), log);
    let (control, stream) = SubmitControl::new();
    let bound = handler.bind(stream);

    let mut lines = reader.lines();
    let mut read_error = None;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!("stopped reading input: {err}");
                read_error = Some(err);
                break;
            }
        };
        match read_selection(&parse_selection_line(&line)) {
            Ok(selection) => input.select(selection),
            Err(err) => {
                eprintln!("error: {err:#}");
                continue;
            }
        }
        if control.activate().is_none() {
            break;
        }
    }
    drop(control);

    let handled = bound.await?;
    if let Some(err) = read_error {
        return Err(anyhow::Error::new(err).context(format!(
            "input ended early after {}",
            output::count(handled, "activation")
        )));
    }
    Ok(handled)
}
