//! Configuration module
//!
//! Handles CLI configuration: backend URL, the organization commands act on
//! and the polling settings used when watching jobs.

use anyhow::{Context, Result};
use gencertify_client::BackendClient;
use gencertify_poller::PollConfig;
use std::sync::Arc;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the GenCertify API
    pub api_url: String,

    /// Organization that evaluation, document and chat commands act on
    pub organization_id: Option<String>,

    /// Polling settings for `watch` and waiting `start`/`generate` commands
    pub poll: PollConfig,
}

impl Config {
    /// Builds the configuration, reading polling settings from the environment
    pub fn load(api_url: String, organization_id: Option<String>) -> Result<Self> {
        let poll = PollConfig::from_env().context("Failed to read polling settings")?;
        poll.validate().context("Invalid polling settings")?;

        Ok(Self {
            api_url,
            organization_id,
            poll,
        })
    }

    /// The selected organization, or an error telling the user how to pick one
    pub fn organization(&self) -> Result<&str> {
        self.organization_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .context(
                "No organization selected. Pass --organization or set GENCERTIFY_ORGANIZATION_ID \
                 (create one with `gencertify org create`)",
            )
    }

    pub fn client(&self) -> Arc<BackendClient> {
        Arc::new(BackendClient::new(self.api_url.as_str()))
    }
}
