//! Document command handlers
//!
//! Handles generating certification documents from an evaluation, watching
//! the generation and listing what was produced.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use gencertify_client::BackendClient;
use gencertify_core::domain::document::DocumentType;
use gencertify_core::domain::job::JobHandle;
use gencertify_poller::{DocumentStatusFetcher, SessionState};
use std::sync::Arc;

use super::watch::watch_job;
use crate::config::Config;
use crate::render::print_documents;

/// Document subcommands
#[derive(Subcommand)]
pub enum DocumentCommands {
    /// Generate documents from a completed evaluation and wait for them
    Generate {
        /// Evaluation to draft the documents from
        #[arg(long)]
        evaluation: String,

        /// Document type to generate (repeatable), e.g. risk_assessment, system_description
        #[arg(long = "type", required = true)]
        document_types: Vec<DocumentType>,

        /// Print the generation ID and return without waiting
        #[arg(long)]
        no_wait: bool,
    },
    /// Watch a running document generation until it finishes
    Watch {
        /// Document generation ID
        id: String,
    },
    /// List generated documents
    List,
    /// Print the download link of a generated document
    Url {
        /// Document generation ID
        id: String,

        /// Document type
        document_type: DocumentType,
    },
}

/// Handle document commands
///
/// # Arguments
/// * `command` - The document command to execute
/// * `config` - The CLI configuration
pub async fn handle_document_command(command: DocumentCommands, config: &Config) -> Result<()> {
    let organization_id = config.organization()?;
    let client = config.client();

    match command {
        DocumentCommands::Generate {
            evaluation,
            document_types,
            no_wait,
        } => {
            generate_documents(
                config,
                client,
                organization_id,
                JobHandle::new(evaluation),
                document_types,
                no_wait,
            )
            .await
        }
        DocumentCommands::Watch { id } => {
            watch_generation(config, client, organization_id, JobHandle::new(id)).await
        }
        DocumentCommands::List => {
            let documents = client.list_documents(organization_id).await?;
            print_documents(&documents);
            Ok(())
        }
        DocumentCommands::Url { id, document_type } => {
            let url =
                client.document_download_url(organization_id, &JobHandle::new(id), document_type)?;
            println!("{}", url);
            Ok(())
        }
    }
}

async fn generate_documents(
    config: &Config,
    client: Arc<BackendClient>,
    organization_id: &str,
    evaluation_id: JobHandle,
    document_types: Vec<DocumentType>,
    no_wait: bool,
) -> Result<()> {
    let count = document_types.len();
    let started = client
        .generate_documents(organization_id, &evaluation_id, document_types)
        .await?;

    println!(
        "{} Generating {} document(s) from evaluation {}",
        "✓".green(),
        count,
        evaluation_id.to_string().bold()
    );
    println!("  ID: {}", started.document_id.to_string().cyan());

    if no_wait {
        println!();
        println!(
            "{}",
            format!("Follow it with: gencertify documents watch {}", started.document_id)
                .dimmed()
        );
        return Ok(());
    }

    println!();
    watch_generation(config, client, organization_id, started.document_id).await
}

async fn watch_generation(
    config: &Config,
    client: Arc<BackendClient>,
    organization_id: &str,
    document_id: JobHandle,
) -> Result<()> {
    let fetcher = DocumentStatusFetcher::new(Arc::clone(&client), organization_id);
    let state = watch_job(config, "Documents", document_id, fetcher).await?;

    if state == SessionState::Succeeded {
        println!();
        let documents = client.list_documents(organization_id).await?;
        print_documents(&documents);
    }

    Ok(())
}
