//! Core domain types
//!
//! This module contains the domain structures used across GenCertify crates.
//! They describe what the backend reports about asynchronous jobs and what a
//! completed job produces, independent of any transport.

pub mod certification;
pub mod document;
pub mod job;
