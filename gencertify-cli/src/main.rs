//! GenCertify CLI
//!
//! Command-line interface for the GenCertify compliance API: submit an
//! organization, run readiness evaluations, generate certification documents
//! and watch those jobs until they finish.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gencertify")]
#[command(about = "GenCertify compliance CLI", long_about = None)]
struct Cli {
    /// GenCertify API URL
    #[arg(long, env = "GENCERTIFY_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Organization ID to act on
    #[arg(long, env = "GENCERTIFY_ORGANIZATION_ID")]
    organization: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gencertify_cli=info,gencertify_poller=info,gencertify_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.api_url, cli.organization)?;

    handle_command(cli.command, &config).await
}
