use clap::{Args, Subcommand};

use imgpost_client::{HttpUploadClient, TransportConfig};

use crate::config::{load_settings, save_settings, settings_path, transport_config};
use crate::output::{header, kv};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the stored settings and the resolved upload endpoint
    Show,
    /// Store the server base URL
    SetServer {
        /// Base URL, e.g. http://127.0.0.1:5000
        url: String,
    },
    /// Store the upload path
    SetPath {
        /// Path relative to the server, e.g. /api/image_upload
        path: String,
    },
}

pub fn run(args: ConfigArgs, server: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => run_show(server),
        ConfigCommand::SetServer { url } => {
            let mut settings = load_settings();
            settings.server = url;
            // Reject anything the client could not post to.
            HttpUploadClient::new(&TransportConfig::new(settings.server.clone()))?;
            save_settings(&settings)?;
            println!("server set to {}", settings.server);
            Ok(())
        }
        ConfigCommand::SetPath { path } => {
            let mut settings = load_settings();
            settings.upload_path = path;
            save_settings(&settings)?;
            println!("upload path set to {}", settings.upload_path);
            Ok(())
        }
    }
}

fn run_show(server: Option<&str>) -> anyhow::Result<()> {
    let settings = load_settings();
    let endpoint = HttpUploadClient::new(&transport_config(server))
        .map(|c| c.endpoint().to_string())
        .unwrap_or_else(|e| format!("<{e}>"));

    println!("{}", header("imgpost config"));
    println!("{}", kv("file", &settings_path()?.display().to_string()));
    println!("{}", kv("server", &settings.server));
    println!("{}", kv("upload path", &settings.upload_path));
    println!("{}", kv("endpoint", &endpoint));
    Ok(())
}
