//! Scheduler layer for the poller
//!
//! This layer owns the poll sessions: starting them, running their tick
//! loop and releasing the job once a session ends.

pub mod poller;
mod registry;
pub mod session;

pub use poller::JobPoller;
pub use session::{CancelToken, SessionState};
