//! Poll observers
//!
//! An observer receives the outcome of every tick. The poller itself never
//! renders anything; presentation happens inside the observer.

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::PollError;

/// Receives progress and the final outcome of a poll session
///
/// Within one session, `on_progress` may fire any number of times, followed
/// by at most one of `on_success` or `on_failure`. Nothing fires after the
/// session has been cancelled.
pub trait PollObserver: Send + 'static {
    /// The job is still running. `progress` is absent when the workflow does
    /// not report it.
    fn on_progress(&mut self, progress: Option<u8>);

    /// The job completed
    fn on_success(&mut self);

    /// The job failed, or its status could not be read
    fn on_failure(&mut self, error: PollError);
}

/// Observer built from three closures
///
/// The terminal callbacks are `FnOnce`: each can only ever run once.
pub struct CallbackObserver<P, S, F> {
    on_progress: P,
    on_success: Option<S>,
    on_failure: Option<F>,
}

impl<P, S, F> CallbackObserver<P, S, F>
where
    P: FnMut(Option<u8>) + Send + 'static,
    S: FnOnce() + Send + 'static,
    F: FnOnce(PollError) + Send + 'static,
{
    pub fn new(on_progress: P, on_success: S, on_failure: F) -> Self {
        Self {
            on_progress,
            on_success: Some(on_success),
            on_failure: Some(on_failure),
        }
    }
}

impl<P, S, F> PollObserver for CallbackObserver<P, S, F>
where
    P: FnMut(Option<u8>) + Send + 'static,
    S: FnOnce() + Send + 'static,
    F: FnOnce(PollError) + Send + 'static,
{
    fn on_progress(&mut self, progress: Option<u8>) {
        (self.on_progress)(progress);
    }

    fn on_success(&mut self) {
        self.on_failure = None;
        if let Some(on_success) = self.on_success.take() {
            on_success();
        }
    }

    fn on_failure(&mut self, error: PollError) {
        self.on_success = None;
        if let Some(on_failure) = self.on_failure.take() {
            on_failure(error);
        }
    }
}

/// Event forwarded by [`ChannelObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    Progress(Option<u8>),
    Succeeded,
    Failed(PollError),
}

impl PollEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollEvent::Progress(_))
    }
}

/// Observer that forwards every callback as a [`PollEvent`] on a channel
///
/// Lets an async caller consume the session as a stream of events instead of
/// reacting inside callbacks. The channel closes when the session ends.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<PollEvent>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PollEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: PollEvent) {
        if self.tx.send(event).is_err() {
            debug!("Poll event receiver dropped, discarding event");
        }
    }
}

impl PollObserver for ChannelObserver {
    fn on_progress(&mut self, progress: Option<u8>) {
        self.forward(PollEvent::Progress(progress));
    }

    fn on_success(&mut self) {
        self.forward(PollEvent::Succeeded);
    }

    fn on_failure(&mut self, error: PollError) {
        self.forward(PollEvent::Failed(error));
    }
}
