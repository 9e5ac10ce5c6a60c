//! Chat command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use gencertify_core::dto::chat::ChatRole;

use crate::config::Config;

/// Chat subcommands
#[derive(Subcommand)]
pub enum ChatCommands {
    /// Send a message to the compliance assistant
    Send {
        /// Message text
        message: String,

        /// Continue an earlier conversation
        #[arg(long)]
        session: Option<String>,
    },
    /// Show the messages of an earlier conversation
    History {
        /// Session ID printed by `chat send`
        session: String,
    },
}

/// Handle chat commands
pub async fn handle_chat_command(command: ChatCommands, config: &Config) -> Result<()> {
    match command {
        ChatCommands::Send { message, session } => send_message(config, &message, session).await,
        ChatCommands::History { session } => show_history(config, &session).await,
    }
}

async fn send_message(config: &Config, message: &str, session: Option<String>) -> Result<()> {
    let organization_id = config.organization()?;
    let client = config.client();

    let reply = client
        .send_chat_message(organization_id, message, session)
        .await?;

    println!("{}", "Assistant:".bold());
    println!("{}", reply.message);
    println!();
    println!("{}", format!("Session: {}", reply.session_id).dimmed());

    if let Some(metadata) = &reply.metadata {
        if let Ok(pretty) = serde_json::to_string_pretty(metadata) {
            println!("{}", pretty.dimmed());
        }
    }

    Ok(())
}

async fn show_history(config: &Config, session_id: &str) -> Result<()> {
    let organization_id = config.organization()?;
    let client = config.client();

    let Some(session) = client.chat_history(organization_id, session_id).await? else {
        println!(
            "{}",
            format!("No conversation {} for this organization.", session_id).yellow()
        );
        return Ok(());
    };

    if session.messages.is_empty() {
        println!("{}", "No messages in this conversation.".yellow());
        return Ok(());
    }

    println!("{}", format!("Conversation {}:", session_id).bold());
    println!("{}", "─".repeat(80).dimmed());
    for message in &session.messages {
        let speaker = match message.role {
            ChatRole::User => "You".cyan().bold(),
            ChatRole::Assistant => "Assistant".green().bold(),
            ChatRole::System => "System".dimmed(),
        };
        println!("{}: {}", speaker, message.content);
    }
    println!("{}", "─".repeat(80).dimmed());

    Ok(())
}
