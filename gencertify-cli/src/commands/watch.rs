//! Watching a job until it finishes
//!
//! Shared by the evaluation and document commands. Progress is rendered as
//! it arrives; Ctrl-C cancels the poll session instead of killing the
//! process mid-request.

use anyhow::Result;
use colored::*;
use gencertify_core::domain::job::JobHandle;
use gencertify_poller::{ChannelObserver, JobPoller, PollEvent, SessionState, StatusFetcher};
use tracing::warn;

use crate::config::Config;
use crate::render::progress_bar;

/// Polls `handle` until it completes, fails or the user presses Ctrl-C
///
/// # Returns
/// `Succeeded` or `Cancelled`. A failed job is returned as an error.
pub async fn watch_job<F>(
    config: &Config,
    label: &str,
    handle: JobHandle,
    fetcher: F,
) -> Result<SessionState>
where
    F: StatusFetcher,
{
    let poller = JobPoller::new(config.poll.clone());
    let (observer, mut events) = ChannelObserver::channel();
    let token = poller.start_polling(handle.clone(), fetcher, observer)?;

    println!(
        "{}",
        format!(
            "Watching {} {} (every {:?}, Ctrl-C to stop)...",
            label, handle, config.poll.interval
        )
        .dimmed()
    );

    let interrupt = {
        let token = token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => token.cancel(),
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
        })
    };

    let mut failure = None;
    while let Some(event) = events.recv().await {
        match event {
            PollEvent::Progress(progress) => {
                println!("  {} {}", label, progress_bar(progress).cyan());
            }
            PollEvent::Succeeded => {
                println!("  {} {}", label, progress_bar(Some(100)).green());
                println!("{} {} {} completed", "✓".green(), label, handle);
            }
            PollEvent::Failed(error) => failure = Some(error),
        }
    }
    interrupt.abort();

    let state = token.wait().await;
    match (state, failure) {
        (SessionState::Failed, Some(error)) => {
            println!("{} {} {} failed", "✗".red(), label, handle);
            Err(error.into())
        }
        (SessionState::Cancelled, _) => {
            println!("{}", format!("Stopped watching {} {}", label, handle).yellow());
            Ok(state)
        }
        (state, _) => Ok(state),
    }
}
