//! GenCertify job poller
//!
//! Watches long-running backend jobs (compliance evaluations and document
//! generation) until they finish.
//!
//! Architecture:
//! - Configuration: polling cadence, fetch timeout and retry policy
//! - Fetchers: read the status of one job, one implementation per workflow
//! - Observers: receive progress and the final outcome
//! - Scheduler: runs one session per job and hands out cancel tokens
//!
//! ```no_run
//! use std::sync::Arc;
//! use gencertify_client::BackendClient;
//! use gencertify_core::domain::job::JobHandle;
//! use gencertify_poller::{ChannelObserver, EvaluationStatusFetcher, JobPoller, PollConfig, PollEvent};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Arc::new(BackendClient::new("http://localhost:8000"));
//! let poller = JobPoller::new(PollConfig::default());
//! let (observer, mut events) = ChannelObserver::channel();
//!
//! let token = poller.start_polling(
//!     JobHandle::new("eval-1"),
//!     EvaluationStatusFetcher::new(client, "org-1"),
//!     observer,
//! )?;
//!
//! while let Some(event) = events.recv().await {
//!     if let PollEvent::Progress(Some(p)) = event {
//!         println!("{}%", p);
//!     }
//! }
//! token.wait().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod observer;
pub mod scheduler;

pub use config::PollConfig;
pub use error::{PollError, TransportError};
pub use fetcher::{DocumentStatusFetcher, EvaluationStatusFetcher, StatusFetcher};
pub use observer::{CallbackObserver, ChannelObserver, PollEvent, PollObserver};
pub use scheduler::{CancelToken, JobPoller, SessionState};
