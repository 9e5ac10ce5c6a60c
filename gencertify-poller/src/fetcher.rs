//! Status fetchers
//!
//! A fetcher is the capability the poller calls on every tick. The two
//! backend workflows differ only in the endpoint they read and the payload
//! shape, so each gets a thin fetcher that reduces its payload to a
//! [`JobStatus`].

use async_trait::async_trait;
use gencertify_client::BackendClient;
use gencertify_core::domain::job::{JobHandle, JobStatus, StatusReport};
use std::sync::Arc;
use tracing::debug;

use crate::error::TransportError;

/// Capability that reads the current status of a job
#[async_trait]
pub trait StatusFetcher: Send + Sync + 'static {
    /// Fetches the status of `handle` once
    ///
    /// # Returns
    /// The observed status, or a transport error if no status could be read
    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobStatus, TransportError>;
}

#[async_trait]
impl<T> StatusFetcher for Arc<T>
where
    T: StatusFetcher + ?Sized,
{
    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobStatus, TransportError> {
        (**self).fetch_status(handle).await
    }
}

/// Reads evaluation status for one organization
#[derive(Debug, Clone)]
pub struct EvaluationStatusFetcher {
    client: Arc<BackendClient>,
    organization_id: String,
}

impl EvaluationStatusFetcher {
    pub fn new(client: Arc<BackendClient>, organization_id: impl Into<String>) -> Self {
        Self {
            client,
            organization_id: organization_id.into(),
        }
    }
}

#[async_trait]
impl StatusFetcher for EvaluationStatusFetcher {
    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobStatus, TransportError> {
        let response = self
            .client
            .evaluation_status(&self.organization_id, handle)
            .await?;

        let status = response.job_status();
        debug!("Evaluation {} reported {}", handle, status);
        Ok(status)
    }
}

/// Reads document generation status for one organization
#[derive(Debug, Clone)]
pub struct DocumentStatusFetcher {
    client: Arc<BackendClient>,
    organization_id: String,
}

impl DocumentStatusFetcher {
    pub fn new(client: Arc<BackendClient>, organization_id: impl Into<String>) -> Self {
        Self {
            client,
            organization_id: organization_id.into(),
        }
    }
}

#[async_trait]
impl StatusFetcher for DocumentStatusFetcher {
    async fn fetch_status(&self, handle: &JobHandle) -> Result<JobStatus, TransportError> {
        let response = self
            .client
            .document_status(&self.organization_id, handle)
            .await?;

        let status = response.job_status();
        debug!("Document generation {} reported {}", handle, status);
        Ok(status)
    }
}
