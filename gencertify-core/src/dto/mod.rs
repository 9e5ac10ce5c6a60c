//! Data Transfer Objects for the GenCertify API
//!
//! Request and response bodies exactly as they travel over HTTP. Status
//! payloads implement [`StatusReport`](crate::domain::job::StatusReport) so
//! the poller can reduce them to a [`JobStatus`](crate::domain::job::JobStatus).

pub mod chat;
pub mod document;
pub mod evaluation;
pub mod health;
pub mod organization;
