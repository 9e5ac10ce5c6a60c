//! Health and catalog command handlers

use anyhow::Result;
use colored::*;

use crate::config::Config;
use crate::render::print_certifications;

/// Check that the API answers and reports itself healthy
pub async fn check_health(config: &Config) -> Result<()> {
    let client = config.client();
    let health = client.health().await?;

    if health.is_healthy() {
        println!("{} API at {} is healthy", "✓".green(), config.api_url);
    } else {
        println!(
            "{} API at {} reported status '{}'",
            "✗".red(),
            config.api_url,
            health.status.yellow()
        );
    }

    Ok(())
}

/// List the certifications the backend can evaluate
pub async fn list_certifications(config: &Config) -> Result<()> {
    let client = config.client();
    let certifications = client.list_certifications().await?;

    println!(
        "{}",
        format!("Available certifications ({}):", certifications.len()).bold()
    );
    println!();
    print_certifications(&certifications);

    Ok(())
}
