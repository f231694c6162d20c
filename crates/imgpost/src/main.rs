use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

use commands::Commands;

#[derive(Parser)]
#[command(name = "imgpost", version, about = "Upload images as multipart form posts")]
struct Cli {
    /// Server base URL (overrides IMGPOST_SERVER and the config file)
    #[arg(long, global = true)]
    server: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.command.run(cli.server).await {
        eprintln!("{}", error::format_error(&err));
        std::process::exit(1);
    }
}
