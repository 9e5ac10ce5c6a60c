use async_trait::async_trait;
use gencertify_core::domain::job::{JobHandle, JobStatus};
use gencertify_poller::{
    CallbackObserver, CancelToken, ChannelObserver, JobPoller, PollConfig, PollError, PollEvent,
    SessionState, StatusFetcher, TransportError,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

enum Step {
    Status(JobStatus),
    Transport(&'static str),
    Slow(Duration, JobStatus),
    Hang,
}

/// Fetcher that replays a fixed script and records when it was called
///
/// Once the script runs out every further call reports a pending job.
struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<Instant>>,
    resolved: AtomicUsize,
}

impl ScriptedFetcher {
    fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
            resolved: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    fn resolved(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusFetcher for ScriptedFetcher {
    async fn fetch_status(&self, _handle: &JobHandle) -> Result<JobStatus, TransportError> {
        self.calls.lock().unwrap().push(Instant::now());
        let step = self.steps.lock().unwrap().pop_front();

        let result = match step {
            Some(Step::Status(status)) => Ok(status),
            Some(Step::Transport(message)) => Err(TransportError::new(message)),
            Some(Step::Slow(delay, status)) => {
                tokio::time::sleep(delay).await;
                Ok(status)
            }
            Some(Step::Hang) => std::future::pending().await,
            None => Ok(JobStatus::Pending { progress: None }),
        };

        self.resolved.fetch_add(1, Ordering::SeqCst);
        result
    }
}

async fn drain(mut events: UnboundedReceiver<PollEvent>) -> Vec<PollEvent> {
    let mut collected = Vec::new();
    while let Some(event) = events.recv().await {
        collected.push(event);
    }
    collected
}

#[tokio::test(start_paused = true)]
async fn test_evaluation_reports_progress_then_success() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![
        Step::Status(JobStatus::pending(25)),
        Step::Status(JobStatus::pending(60)),
        Step::Status(JobStatus::Completed),
    ]);
    let (observer, events) = ChannelObserver::channel();
    let handle = JobHandle::new("eval-1");

    let started = Instant::now();
    let token = poller
        .start_polling(handle.clone(), Arc::clone(&fetcher), observer)
        .unwrap();
    assert!(poller.is_polling(&handle));

    assert_eq!(token.wait().await, SessionState::Succeeded);
    assert_eq!(
        drain(events).await,
        vec![
            PollEvent::Progress(Some(25)),
            PollEvent::Progress(Some(60)),
            PollEvent::Succeeded,
        ]
    );

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0] - started >= Duration::from_millis(2000));
    for pair in calls.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_millis(2000));
    }

    assert!(!poller.is_polling(&handle));
    assert_eq!(token.state(), SessionState::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn test_document_failure_carries_reason() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![
        Step::Status(JobStatus::Pending { progress: None }),
        Step::Status(JobStatus::failed("render error")),
    ]);
    let (observer, events) = ChannelObserver::channel();

    let token = poller
        .start_polling(JobHandle::new("doc-9"), Arc::clone(&fetcher), observer)
        .unwrap();

    assert_eq!(token.wait().await, SessionState::Failed);
    assert_eq!(
        drain(events).await,
        vec![
            PollEvent::Progress(None),
            PollEvent::Failed(PollError::TerminalFailed {
                reason: Some("render error".to_string()),
            }),
        ]
    );
    assert_eq!(fetcher.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_is_fatal_by_default() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![
        Step::Transport("connection refused"),
        Step::Status(JobStatus::Completed),
    ]);
    let (observer, events) = ChannelObserver::channel();
    let handle = JobHandle::new("eval-1");

    let token = poller
        .start_polling(handle.clone(), Arc::clone(&fetcher), observer)
        .unwrap();

    assert_eq!(token.wait().await, SessionState::Failed);
    assert_eq!(
        drain(events).await,
        vec![PollEvent::Failed(PollError::Transport(TransportError::new(
            "connection refused"
        )))]
    );
    assert_eq!(fetcher.calls().len(), 1);
    assert!(!poller.is_polling(&handle));
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_retried_when_configured() {
    let poller = JobPoller::new(PollConfig::default().with_transport_retries(2));
    let fetcher = ScriptedFetcher::new(vec![
        Step::Transport("connection reset"),
        Step::Status(JobStatus::Completed),
    ]);
    let (observer, events) = ChannelObserver::channel();

    let token = poller
        .start_polling(JobHandle::new("eval-1"), Arc::clone(&fetcher), observer)
        .unwrap();

    assert_eq!(token.wait().await, SessionState::Succeeded);
    assert_eq!(drain(events).await, vec![PollEvent::Succeeded]);

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1] - calls[0] >= Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_fetch_times_out() {
    let poller = JobPoller::new(
        PollConfig::default().with_fetch_timeout(Some(Duration::from_secs(5))),
    );
    let fetcher = ScriptedFetcher::new(vec![Step::Hang]);
    let (observer, events) = ChannelObserver::channel();

    let token = poller
        .start_polling(JobHandle::new("eval-1"), Arc::clone(&fetcher), observer)
        .unwrap();

    assert_eq!(token.wait().await, SessionState::Failed);
    assert_eq!(
        drain(events).await,
        vec![PollEvent::Failed(PollError::Transport(
            TransportError::timed_out(Duration::from_secs(5))
        ))]
    );
    assert_eq!(fetcher.resolved(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_delays_next_tick() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![
        Step::Slow(Duration::from_secs(3), JobStatus::pending(10)),
        Step::Status(JobStatus::Completed),
    ]);
    let (observer, events) = ChannelObserver::channel();

    let token = poller
        .start_polling(JobHandle::new("eval-1"), Arc::clone(&fetcher), observer)
        .unwrap();

    assert_eq!(token.wait().await, SessionState::Succeeded);
    assert_eq!(
        drain(events).await,
        vec![PollEvent::Progress(Some(10)), PollEvent::Succeeded]
    );

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1] - calls[0] >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_tick() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![Step::Status(JobStatus::Completed)]);
    let (observer, events) = ChannelObserver::channel();
    let handle = JobHandle::new("eval-1");

    let token = poller
        .start_polling(handle.clone(), Arc::clone(&fetcher), observer)
        .unwrap();
    token.cancel();

    assert_eq!(token.wait().await, SessionState::Cancelled);
    assert!(drain(events).await.is_empty());
    assert!(fetcher.calls().is_empty());
    assert!(!poller.is_polling(&handle));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_fetch_suppresses_result() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![Step::Slow(
        Duration::from_secs(10),
        JobStatus::Completed,
    )]);
    let (observer, events) = ChannelObserver::channel();

    let token = poller
        .start_polling(JobHandle::new("eval-1"), Arc::clone(&fetcher), observer)
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(fetcher.calls().len(), 1);
    assert_eq!(token.state(), SessionState::Polling);

    token.cancel();

    assert_eq!(token.wait().await, SessionState::Cancelled);
    assert!(drain(events).await.is_empty());
    assert_eq!(fetcher.resolved(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_twice_is_noop() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![]);
    let (observer, _events) = ChannelObserver::channel();

    let token = poller
        .start_polling(JobHandle::new("eval-1"), fetcher, observer)
        .unwrap();

    token.cancel();
    token.clone().cancel();

    assert!(token.is_cancelled());
    assert_eq!(token.wait().await, SessionState::Cancelled);

    token.cancel();
    assert_eq!(token.state(), SessionState::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_completion_is_noop() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![Step::Status(JobStatus::Completed)]);
    let (observer, _events) = ChannelObserver::channel();

    let token = poller
        .start_polling(JobHandle::new("eval-1"), fetcher, observer)
        .unwrap();

    assert_eq!(token.wait().await, SessionState::Succeeded);
    token.cancel();
    assert_eq!(token.state(), SessionState::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn test_second_session_for_same_handle_rejected() {
    let poller = JobPoller::default();
    let first = ScriptedFetcher::new(vec![
        Step::Status(JobStatus::pending(10)),
        Step::Status(JobStatus::Completed),
    ]);
    let second = ScriptedFetcher::new(vec![Step::Status(JobStatus::Completed)]);
    let handle = JobHandle::new("eval-1");

    let (observer, events) = ChannelObserver::channel();
    let token = poller
        .start_polling(handle.clone(), Arc::clone(&first), observer)
        .unwrap();

    let (duplicate_observer, duplicate_events) = ChannelObserver::channel();
    let result = poller.start_polling(handle.clone(), Arc::clone(&second), duplicate_observer);
    assert_eq!(result.unwrap_err(), PollError::AlreadyPolling(handle.clone()));

    assert_eq!(token.wait().await, SessionState::Succeeded);
    assert_eq!(
        drain(events).await,
        vec![PollEvent::Progress(Some(10)), PollEvent::Succeeded]
    );
    assert!(drain(duplicate_events).await.is_empty());
    assert!(second.calls().is_empty());

    // Once the first session ended the handle is free again
    let (observer, events) = ChannelObserver::channel();
    let token = poller
        .start_polling(handle, Arc::clone(&second), observer)
        .unwrap();
    assert_eq!(token.wait().await, SessionState::Succeeded);
    assert_eq!(drain(events).await, vec![PollEvent::Succeeded]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_from_progress_callback() {
    let poller = JobPoller::default();
    let fetcher = ScriptedFetcher::new(vec![
        Step::Status(JobStatus::pending(5)),
        Step::Status(JobStatus::Completed),
    ]);

    let slot: Arc<OnceLock<CancelToken>> = Arc::new(OnceLock::new());
    let progress_calls = Arc::new(AtomicUsize::new(0));
    let terminal_called = Arc::new(AtomicBool::new(false));

    let observer = {
        let slot = Arc::clone(&slot);
        let progress_calls = Arc::clone(&progress_calls);
        let on_success = Arc::clone(&terminal_called);
        let on_failure = Arc::clone(&terminal_called);
        CallbackObserver::new(
            move |_progress: Option<u8>| {
                progress_calls.fetch_add(1, Ordering::SeqCst);
                if let Some(token) = slot.get() {
                    token.cancel();
                }
            },
            move || on_success.store(true, Ordering::SeqCst),
            move |_error: PollError| on_failure.store(true, Ordering::SeqCst),
        )
    };

    let token = poller
        .start_polling(JobHandle::new("eval-1"), Arc::clone(&fetcher), observer)
        .unwrap();
    slot.set(token.clone()).unwrap();

    assert_eq!(token.wait().await, SessionState::Cancelled);
    assert_eq!(progress_calls.load(Ordering::SeqCst), 1);
    assert!(!terminal_called.load(Ordering::SeqCst));
    assert_eq!(fetcher.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_arguments_rejected() {
    let poller = JobPoller::default();

    let (observer, _events) = ChannelObserver::channel();
    let result = poller.start_polling(JobHandle::new("  "), ScriptedFetcher::new(vec![]), observer);
    assert_eq!(result.unwrap_err(), PollError::InvalidHandle);

    let (observer, _events) = ChannelObserver::channel();
    let result = poller.start_polling_every(
        JobHandle::new("eval-1"),
        ScriptedFetcher::new(vec![]),
        observer,
        Duration::ZERO,
    );
    assert_eq!(result.unwrap_err(), PollError::InvalidInterval);

    assert_eq!(poller.active_sessions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sessions_for_different_jobs_are_independent() {
    let poller = JobPoller::default();
    let evaluation = ScriptedFetcher::new(vec![
        Step::Status(JobStatus::pending(50)),
        Step::Status(JobStatus::Completed),
    ]);
    let documents = ScriptedFetcher::new(vec![]);

    let (eval_observer, eval_events) = ChannelObserver::channel();
    let (doc_observer, doc_events) = ChannelObserver::channel();

    let eval_token = poller
        .start_polling(JobHandle::new("eval-1"), Arc::clone(&evaluation), eval_observer)
        .unwrap();
    let doc_token = poller
        .start_polling_every(
            JobHandle::new("doc-9"),
            Arc::clone(&documents),
            doc_observer,
            Duration::from_millis(500),
        )
        .unwrap();
    assert_eq!(poller.active_sessions(), 2);

    tokio::time::sleep(Duration::from_millis(1200)).await;
    doc_token.cancel();

    assert_eq!(doc_token.wait().await, SessionState::Cancelled);
    assert_eq!(
        drain(doc_events).await,
        vec![PollEvent::Progress(None), PollEvent::Progress(None)]
    );

    assert_eq!(eval_token.wait().await, SessionState::Succeeded);
    assert_eq!(
        drain(eval_events).await,
        vec![PollEvent::Progress(Some(50)), PollEvent::Succeeded]
    );
    assert_eq!(poller.active_sessions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_releases_handle_immediately() {
    let poller = JobPoller::default();
    let handle = JobHandle::new("eval-1");
    let first = ScriptedFetcher::new(vec![]);
    let second = ScriptedFetcher::new(vec![Step::Status(JobStatus::Completed)]);

    let (observer, first_events) = ChannelObserver::channel();
    let first_token = poller
        .start_polling(handle.clone(), Arc::clone(&first), observer)
        .unwrap();

    first_token.cancel();
    assert!(!poller.is_polling(&handle));

    // Restart without yielding to the cancelled session's task
    let (observer, second_events) = ChannelObserver::channel();
    let second_token = poller
        .start_polling(handle.clone(), Arc::clone(&second), observer)
        .unwrap();
    assert!(poller.is_polling(&handle));

    assert_eq!(first_token.wait().await, SessionState::Cancelled);
    // The cancelled session ending must not release the new session's claim
    assert!(poller.is_polling(&handle));
    assert!(drain(first_events).await.is_empty());
    assert!(first.calls().is_empty());

    assert_eq!(second_token.wait().await, SessionState::Succeeded);
    assert_eq!(drain(second_events).await, vec![PollEvent::Succeeded]);
    assert!(!poller.is_polling(&handle));
}

#[tokio::test(start_paused = true)]
async fn test_stale_token_does_not_cancel_newer_session() {
    let poller = JobPoller::default();
    let handle = JobHandle::new("doc-9");

    let (observer, _events) = ChannelObserver::channel();
    let stale = poller
        .start_polling(
            handle.clone(),
            ScriptedFetcher::new(vec![Step::Status(JobStatus::Completed)]),
            observer,
        )
        .unwrap();
    assert_eq!(stale.wait().await, SessionState::Succeeded);

    let (observer, events) = ChannelObserver::channel();
    let current = poller
        .start_polling(
            handle.clone(),
            ScriptedFetcher::new(vec![
                Step::Status(JobStatus::pending(70)),
                Step::Status(JobStatus::Completed),
            ]),
            observer,
        )
        .unwrap();

    stale.cancel();
    assert!(poller.is_polling(&handle));
    assert!(!current.is_cancelled());

    assert_eq!(current.wait().await, SessionState::Succeeded);
    assert_eq!(
        drain(events).await,
        vec![PollEvent::Progress(Some(70)), PollEvent::Succeeded]
    );
}
