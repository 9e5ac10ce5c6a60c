//! GenCertify Core
//!
//! Core types shared by the GenCertify client, job poller and CLI.
//!
//! This crate contains:
//! - Domain types: jobs and their observed status, certification results,
//!   generated documents
//! - DTOs: request and response bodies exchanged with the GenCertify API

pub mod domain;
pub mod dto;
