//! Job domain types
//!
//! A job is an asynchronous unit of work on the backend (an evaluation run or
//! a document generation). The backend issues an opaque handle when the job is
//! created; everything the client learns afterwards comes from status reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque job identifier issued by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty handle can never identify a backend job
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobHandle {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Observed status of a job
///
/// `Completed` and `Failed` are terminal: once either is observed no further
/// transitions are expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    /// Still running. Progress is 0..=100 when the workflow reports it.
    Pending { progress: Option<u8> },
    Completed,
    Failed { reason: Option<String> },
}

impl JobStatus {
    pub fn pending(progress: impl Into<Option<u8>>) -> Self {
        JobStatus::Pending {
            progress: progress.into().map(|p| p.min(100)),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        JobStatus::Failed {
            reason: Some(reason.into()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed { .. })
    }

    /// Progress as displayed to a user. A completed job is always at 100.
    pub fn progress(&self) -> Option<u8> {
        match self {
            JobStatus::Pending { progress } => *progress,
            JobStatus::Completed => Some(100),
            JobStatus::Failed { .. } => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending {
                progress: Some(progress),
            } => write!(f, "pending ({}%)", progress),
            JobStatus::Pending { progress: None } => write!(f, "pending"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed {
                reason: Some(reason),
            } => write!(f, "failed: {}", reason),
            JobStatus::Failed { reason: None } => write!(f, "failed"),
        }
    }
}

/// Status string used by every job status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// A status payload that can be reduced to a [`JobStatus`]
///
/// Evaluation and document generation report status with different shapes;
/// this is the only thing the poller needs from either of them.
pub trait StatusReport {
    fn job_status(&self) -> JobStatus;
}

/// Maps a wire status plus optional progress and error onto a [`JobStatus`]
pub fn reduce_status(status: WireStatus, progress: Option<f64>, error: Option<&str>) -> JobStatus {
    match status {
        WireStatus::Pending | WireStatus::InProgress => JobStatus::Pending {
            progress: progress.map(clamp_progress),
        },
        WireStatus::Completed => JobStatus::Completed,
        WireStatus::Failed => JobStatus::Failed {
            reason: error.map(str::to_string),
        },
    }
}

/// Rounds a wire progress value into 0..=100
pub fn clamp_progress(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
