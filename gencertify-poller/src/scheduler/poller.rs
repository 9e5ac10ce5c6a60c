//! Job poller
//!
//! Starts poll sessions and keeps track of which jobs are being polled.
//! Each session runs in its own task and removes itself from the registry
//! when it ends, whatever the reason.

use gencertify_core::domain::job::JobHandle;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use super::registry::SessionRegistry;
use super::session::{CancelToken, Session, SessionState};
use crate::config::PollConfig;
use crate::error::PollError;
use crate::fetcher::StatusFetcher;
use crate::observer::PollObserver;

/// Starts poll sessions and enforces one session per job
///
/// Cloning is cheap; clones share the same registry.
#[derive(Debug, Clone)]
pub struct JobPoller {
    config: PollConfig,
    sessions: SessionRegistry,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(config: PollConfig) -> Self {
        Self {
            config,
            sessions: SessionRegistry::default(),
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Starts polling `handle` at the configured interval
    ///
    /// See [`JobPoller::start_polling_every`].
    pub fn start_polling<F, O>(
        &self,
        handle: JobHandle,
        fetcher: F,
        observer: O,
    ) -> Result<CancelToken, PollError>
    where
        F: StatusFetcher,
        O: PollObserver,
    {
        self.start_polling_every(handle, fetcher, observer, self.config.interval)
    }

    /// Starts polling `handle` every `interval`
    ///
    /// The first status request happens one interval after this call, never
    /// immediately. Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// - [`PollError::InvalidHandle`] if the handle is empty
    /// - [`PollError::InvalidInterval`] if `interval` is zero
    /// - [`PollError::AlreadyPolling`] if `handle` already has an active
    ///   session. The existing session is left untouched.
    pub fn start_polling_every<F, O>(
        &self,
        handle: JobHandle,
        fetcher: F,
        observer: O,
        interval: Duration,
    ) -> Result<CancelToken, PollError>
    where
        F: StatusFetcher,
        O: PollObserver,
    {
        if handle.is_empty() {
            return Err(PollError::InvalidHandle);
        }
        if interval.is_zero() {
            return Err(PollError::InvalidInterval);
        }

        let session_id = Uuid::new_v4();
        if !self.sessions.claim(&handle, session_id) {
            debug!("Job {} already has an active poll session", handle);
            return Err(PollError::AlreadyPolling(handle));
        }

        let token = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let cancel = CancelToken::new(
            handle.clone(),
            session_id,
            token.clone(),
            state_rx,
            self.sessions.clone(),
        );

        info!("Starting poll session for job {} (interval: {:?})", handle, interval);

        let session = Session {
            handle: handle.clone(),
            fetcher,
            observer,
            config: self.config.clone().with_interval(interval),
            token,
            state: state_tx,
        };

        let sessions = self.sessions.clone();
        tokio::spawn(async move {
            let (outcome, state) = session.run().await;

            // Already released if the session was cancelled
            sessions.release(&handle, session_id);

            debug!("Poll session for job {} ended: {}", handle, outcome);
            state.send_replace(outcome);
        });

        Ok(cancel)
    }

    /// Whether `handle` currently has an active poll session
    pub fn is_polling(&self, handle: &JobHandle) -> bool {
        self.sessions.contains(handle)
    }

    /// Number of active poll sessions
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for JobPoller {
    fn default() -> Self {
        Self::new(PollConfig::default())
    }
}
