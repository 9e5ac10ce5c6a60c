//! Error types for job polling

use gencertify_client::ClientError;
use gencertify_core::domain::job::JobHandle;
use std::time::Duration;
use thiserror::Error;

/// A status request that did not produce a status
///
/// Covers network failures, non-2xx responses, unparseable bodies and
/// fetches that exceeded the configured timeout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    status: Option<u16>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn timed_out(after: Duration) -> Self {
        Self::new(format!("status request timed out after {:?}", after))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status, when the backend answered at all
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl From<ClientError> for TransportError {
    fn from(err: ClientError) -> Self {
        let status = err.status();
        Self {
            message: err.to_string(),
            status,
        }
    }
}

/// Errors produced by the job poller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// A status request failed during a tick
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The handle already has an active poll session
    #[error("job {0} is already being polled")]
    AlreadyPolling(JobHandle),

    /// The backend reported the job as failed
    #[error("job failed: {}", .reason.as_deref().unwrap_or("no reason given"))]
    TerminalFailed { reason: Option<String> },

    #[error("job handle cannot be empty")]
    InvalidHandle,

    #[error("poll interval must be greater than zero")]
    InvalidInterval,
}

impl PollError {
    /// Reason reported by the backend for a failed job
    pub fn reason(&self) -> Option<&str> {
        match self {
            PollError::TerminalFailed { reason } => reason.as_deref(),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PollError::Transport(_))
    }
}
