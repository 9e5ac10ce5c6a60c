//! Evaluation command handlers
//!
//! Handles starting readiness evaluations, watching them and displaying
//! their per-certification results.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use gencertify_client::BackendClient;
use gencertify_core::domain::certification::CertificationType;
use gencertify_core::domain::job::JobHandle;
use gencertify_poller::{EvaluationStatusFetcher, SessionState};
use std::sync::Arc;

use super::watch::watch_job;
use crate::config::Config;
use crate::render::print_results;

/// Evaluation subcommands
#[derive(Subcommand)]
pub enum EvaluationCommands {
    /// Start a readiness evaluation and wait for its results
    Start {
        /// Certification to evaluate (repeatable), e.g. iso_27001, soc_2
        #[arg(long = "cert", required = true)]
        certifications: Vec<CertificationType>,

        /// Print the evaluation ID and return without waiting
        #[arg(long)]
        no_wait: bool,
    },
    /// Watch a running evaluation until it finishes
    Watch {
        /// Evaluation ID
        id: String,
    },
    /// Show the results of a completed evaluation
    Results {
        /// Evaluation ID
        id: String,
    },
}

/// Handle evaluation commands
///
/// # Arguments
/// * `command` - The evaluation command to execute
/// * `config` - The CLI configuration
pub async fn handle_evaluation_command(command: EvaluationCommands, config: &Config) -> Result<()> {
    let organization_id = config.organization()?;
    let client = config.client();

    match command {
        EvaluationCommands::Start {
            certifications,
            no_wait,
        } => start_evaluation(config, client, organization_id, certifications, no_wait).await,
        EvaluationCommands::Watch { id } => {
            watch_evaluation(config, client, organization_id, JobHandle::new(id)).await
        }
        EvaluationCommands::Results { id } => {
            let results = client
                .evaluation_results(organization_id, &JobHandle::new(id))
                .await?;
            print_results(&results);
            Ok(())
        }
    }
}

async fn start_evaluation(
    config: &Config,
    client: Arc<BackendClient>,
    organization_id: &str,
    certifications: Vec<CertificationType>,
    no_wait: bool,
) -> Result<()> {
    let names: Vec<&str> = certifications.iter().map(|c| c.display_name()).collect();
    let started = client
        .start_evaluation(organization_id, certifications)
        .await?;

    println!(
        "{} Evaluation started for {}",
        "✓".green(),
        names.join(", ").bold()
    );
    println!("  ID: {}", started.evaluation_id.to_string().cyan());

    if no_wait {
        println!();
        println!(
            "{}",
            format!("Follow it with: gencertify evaluation watch {}", started.evaluation_id)
                .dimmed()
        );
        return Ok(());
    }

    println!();
    watch_evaluation(config, client, organization_id, started.evaluation_id).await
}

async fn watch_evaluation(
    config: &Config,
    client: Arc<BackendClient>,
    organization_id: &str,
    evaluation_id: JobHandle,
) -> Result<()> {
    let fetcher = EvaluationStatusFetcher::new(Arc::clone(&client), organization_id);
    let state = watch_job(config, "Evaluation", evaluation_id.clone(), fetcher).await?;

    if state == SessionState::Succeeded {
        println!();
        let results = client
            .evaluation_results(organization_id, &evaluation_id)
            .await?;
        print_results(&results);
    }

    Ok(())
}
