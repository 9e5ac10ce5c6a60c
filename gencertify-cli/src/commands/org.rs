//! Organization command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use gencertify_core::domain::certification::CertificationType;
use gencertify_core::dto::organization::SubmitOrganization;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Organization subcommands
#[derive(Subcommand)]
pub enum OrgCommands {
    /// Submit organization details and receive an organization ID
    Create {
        /// Organization name
        #[arg(long)]
        name: String,

        /// Industry the organization operates in
        #[arg(long)]
        industry: String,

        /// Organization size (e.g. Small, Medium, Large)
        #[arg(long)]
        size: String,

        /// Annual revenue bracket
        #[arg(long)]
        annual_revenue: Option<String>,

        /// Systems and processes the certification should cover
        #[arg(long)]
        scope: String,

        /// Certification to pursue (repeatable), e.g. iso_27001, soc_2
        #[arg(long = "cert", required = true)]
        certifications: Vec<CertificationType>,
    },
    /// Upload a supporting document (policy, procedure, audit report...)
    Upload {
        /// File to upload
        file: PathBuf,

        /// What kind of document this is, e.g. policy, procedure, audit_report
        #[arg(long = "type")]
        document_type: String,

        /// Short description stored with the file
        #[arg(long)]
        description: Option<String>,
    },
}

/// Handle organization commands
pub async fn handle_org_command(command: OrgCommands, config: &Config) -> Result<()> {
    match command {
        OrgCommands::Create {
            name,
            industry,
            size,
            annual_revenue,
            scope,
            certifications,
        } => {
            let organization = SubmitOrganization {
                name,
                industry,
                size,
                annual_revenue,
                certification_scope: scope,
                selected_certifications: certifications,
            };
            create_organization(config, &organization).await
        }
        OrgCommands::Upload {
            file,
            document_type,
            description,
        } => upload_document(config, &file, &document_type, description).await,
    }
}

async fn create_organization(config: &Config, organization: &SubmitOrganization) -> Result<()> {
    let client = config.client();
    let submitted = client.submit_organization(organization).await?;

    println!(
        "{} Organization '{}' submitted",
        "✓".green(),
        organization.name.bold()
    );
    println!("  ID: {}", submitted.organization_id.cyan());
    if let Some(message) = &submitted.message {
        println!("  {}", message.dimmed());
    }
    println!();
    println!(
        "{}",
        format!(
            "Use it with: export GENCERTIFY_ORGANIZATION_ID={}",
            submitted.organization_id
        )
        .dimmed()
    );

    Ok(())
}

async fn upload_document(
    config: &Config,
    file: &Path,
    document_type: &str,
    description: Option<String>,
) -> Result<()> {
    let organization_id = config.organization()?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Not a file path: {}", file.display()))?;
    let contents = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let size = contents.len();

    let client = config.client();
    let uploaded = client
        .upload_document(organization_id, document_type, file_name, contents, description)
        .await?;

    println!(
        "{} Uploaded {} ({} bytes)",
        "✓".green(),
        file_name.bold(),
        size
    );
    println!("  Stored at: {}", uploaded.file_url.cyan());
    if let Some(message) = &uploaded.message {
        println!("  {}", message.dimmed());
    }

    Ok(())
}
