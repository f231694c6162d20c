pub mod config;
pub mod interactive;
pub mod upload;

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use tracing::warn;

use imgpost_core::{FileSelection, SelectedFile};

#[derive(Subcommand)]
pub enum Commands {
    /// Upload the first of FILES, once per activation
    Upload(upload::UploadArgs),
    /// Read selections from stdin; each line fires one activation
    Interactive,
    /// Show or change the stored configuration
    Config(config::ConfigArgs),
}

impl Commands {
    pub async fn run(self, server: Option<String>) -> anyhow::Result<()> {
        match self {
            Commands::Upload(args) => upload::run(args, server.as_deref()).await,
            Commands::Interactive => interactive::run(server.as_deref()).await,
            Commands::Config(args) => config::run(args, server.as_deref()),
        }
    }
}

/// Build the file-input selection from `paths`.
///
/// Only the first path is ever uploaded, so it is the only one read; the rest
/// are reported and dropped without touching the filesystem.
pub(crate) fn read_selection(paths: &[PathBuf]) -> anyhow::Result<FileSelection> {
    let Some((first, rest)) = paths.split_first() else {
        return Ok(FileSelection::empty());
    };
    if !rest.is_empty() {
        warn!(ignored = rest.len(), "only the first selected file is uploaded");
    }
    let file = SelectedFile::read(first)
        .with_context(|| format!("could not read {}", first.display()))?;
    Ok(FileSelection::from(vec![file]))
}
