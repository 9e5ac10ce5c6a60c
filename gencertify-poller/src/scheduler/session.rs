//! Poll session
//!
//! One session tracks one job: it fetches the job's status at a fixed
//! cadence until a terminal status is observed, a transport error is fatal,
//! or the caller cancels.

use gencertify_core::domain::job::{JobHandle, JobStatus};
use tokio::sync::watch;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::registry::SessionRegistry;
use crate::config::PollConfig;
use crate::error::{PollError, TransportError};
use crate::fetcher::StatusFetcher;
use crate::observer::PollObserver;

/// Lifecycle of a poll session
///
/// `Idle -> Polling -> {Succeeded, Failed, Cancelled}`. The last three are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Polling,
    Succeeded,
    Failed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Succeeded | SessionState::Failed | SessionState::Cancelled
        )
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Polling => write!(f, "Polling"),
            SessionState::Succeeded => write!(f, "Succeeded"),
            SessionState::Failed => write!(f, "Failed"),
            SessionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Handle for stopping a poll session and observing how it ended
///
/// Cloning is cheap; every clone controls the same session.
#[derive(Debug, Clone)]
pub struct CancelToken {
    handle: JobHandle,
    session_id: Uuid,
    token: CancellationToken,
    state: watch::Receiver<SessionState>,
    registry: SessionRegistry,
}

impl CancelToken {
    pub(crate) fn new(
        handle: JobHandle,
        session_id: Uuid,
        token: CancellationToken,
        state: watch::Receiver<SessionState>,
        registry: SessionRegistry,
    ) -> Self {
        Self {
            handle,
            session_id,
            token,
            state,
            registry,
        }
    }

    /// Stops the session
    ///
    /// No callback that has not already started will fire afterwards, even if
    /// a status request is in flight. The job is released immediately and can
    /// be polled again as soon as this returns. Calling this more than once,
    /// or after the session ended on its own, does nothing.
    pub fn cancel(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if self.registry.release(&self.handle, self.session_id) {
            info!("Cancelled poll session for job {}", self.handle);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The job this session tracks
    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }

    /// Current state of the session
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Waits until the session reaches a terminal state and returns it
    pub async fn wait(&self) -> SessionState {
        let mut state = self.state.clone();
        loop {
            let current = *state.borrow_and_update();
            if current.is_terminal() {
                return current;
            }
            if state.changed().await.is_err() {
                // The session task is gone without publishing an outcome,
                // which only happens when its runtime shuts down.
                return *state.borrow();
            }
        }
    }
}

/// State owned by a running session task
pub(crate) struct Session<F, O> {
    pub(crate) handle: JobHandle,
    pub(crate) fetcher: F,
    pub(crate) observer: O,
    pub(crate) config: PollConfig,
    pub(crate) token: CancellationToken,
    pub(crate) state: watch::Sender<SessionState>,
}

impl<F, O> Session<F, O>
where
    F: StatusFetcher,
    O: PollObserver,
{
    /// Runs the session to completion and returns its terminal state
    ///
    /// The caller publishes the returned state once it has released the
    /// session's registry entry.
    pub(crate) async fn run(mut self) -> (SessionState, watch::Sender<SessionState>) {
        self.state.send_replace(SessionState::Polling);

        let interval = self.config.interval;
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks: u32 = 0;
        let mut failures: u32 = 0;
        let mut last_progress: Option<u8> = None;

        let outcome = loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break SessionState::Cancelled,
                _ = ticker.tick() => {}
            }

            ticks += 1;
            debug!("Polling status of job {} (tick {})", self.handle, ticks);

            let result = tokio::select! {
                biased;
                _ = self.token.cancelled() => break SessionState::Cancelled,
                result = fetch_once(&self.fetcher, &self.handle, self.config.fetch_timeout) => result,
            };

            if self.token.is_cancelled() {
                break SessionState::Cancelled;
            }

            match result {
                Ok(JobStatus::Pending { progress }) => {
                    failures = 0;
                    if let (Some(previous), Some(current)) = (last_progress, progress) {
                        if current < previous {
                            debug!(
                                "Progress of job {} went back from {}% to {}%",
                                self.handle, previous, current
                            );
                        }
                    }
                    last_progress = progress.or(last_progress);
                    self.observer.on_progress(progress);
                }
                Ok(JobStatus::Completed) => {
                    info!("Job {} completed after {} tick(s)", self.handle, ticks);
                    self.observer.on_success();
                    break SessionState::Succeeded;
                }
                Ok(JobStatus::Failed { reason }) => {
                    warn!(
                        "Job {} failed: {}",
                        self.handle,
                        reason.as_deref().unwrap_or("no reason given")
                    );
                    self.observer.on_failure(PollError::TerminalFailed { reason });
                    break SessionState::Failed;
                }
                Err(e) if failures < self.config.transport_retries => {
                    failures += 1;
                    let delay = self.config.backoff_delay(failures);
                    warn!(
                        "Status request for job {} failed (attempt {}/{}): {}. Retrying in {:?}",
                        self.handle, failures, self.config.transport_retries, e, delay
                    );
                    ticker.reset_after(delay);
                }
                Err(e) => {
                    warn!("Status request for job {} failed: {}", self.handle, e);
                    self.observer.on_failure(PollError::Transport(e));
                    break SessionState::Failed;
                }
            }
        };

        if outcome == SessionState::Cancelled {
            debug!("Poll session for job {} cancelled after {} tick(s)", self.handle, ticks);
        }

        (outcome, self.state)
    }
}

/// Fetches once, turning an elapsed timeout into a transport error
///
/// Takes the fetcher rather than the session so the observer, which is only
/// `Send`, is never borrowed across an await.
async fn fetch_once<F: StatusFetcher>(
    fetcher: &F,
    handle: &JobHandle,
    timeout: Option<Duration>,
) -> Result<JobStatus, TransportError> {
    match timeout {
        Some(limit) => time::timeout(limit, fetcher.fetch_status(handle))
            .await
            .unwrap_or_else(|_| Err(TransportError::timed_out(limit))),
        None => fetcher.fetch_status(handle).await,
    }
}
