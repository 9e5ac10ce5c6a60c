//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod chat;
mod documents;
mod evaluation;
mod intake;
mod org;
mod watch;

pub use chat::ChatCommands;
pub use documents::DocumentCommands;
pub use evaluation::EvaluationCommands;
pub use org::OrgCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the API is reachable
    Health,
    /// List the certifications that can be evaluated
    Certifications,
    /// Organization management
    Org {
        #[command(subcommand)]
        command: OrgCommands,
    },
    /// Talk to the compliance assistant
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
    /// Readiness evaluations
    Evaluation {
        #[command(subcommand)]
        command: EvaluationCommands,
    },
    /// Certification document generation
    Documents {
        #[command(subcommand)]
        command: DocumentCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Health => intake::check_health(config).await,
        Commands::Certifications => intake::list_certifications(config).await,
        Commands::Org { command } => org::handle_org_command(command, config).await,
        Commands::Chat { command } => chat::handle_chat_command(command, config).await,
        Commands::Evaluation { command } => {
            evaluation::handle_evaluation_command(command, config).await
        }
        Commands::Documents { command } => {
            documents::handle_document_command(command, config).await
        }
    }
}
