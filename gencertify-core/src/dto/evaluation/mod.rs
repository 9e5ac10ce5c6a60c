//! Evaluation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::certification::{CertificationResult, CertificationType};
use crate::domain::job::{JobHandle, JobStatus, StatusReport, WireStatus, reduce_status};

/// Request to start a readiness evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartEvaluation {
    pub organization_id: String,
    pub certification_types: Vec<CertificationType>,
}

/// Response to a started evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationStarted {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub evaluation_id: JobHandle,
}

/// Evaluation status as reported while the job runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationStatusResponse {
    pub organization_id: String,
    pub evaluation_id: JobHandle,
    pub status: WireStatus,
    /// Progress (0-100), reported as a float
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusReport for EvaluationStatusResponse {
    fn job_status(&self) -> JobStatus {
        reduce_status(self.status, self.progress, self.error.as_deref())
    }
}

/// Envelope returned by the results endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResultsResponse {
    pub status: String,
    pub results: EvaluationRecord,
}

/// Stored evaluation as returned once the job completed
///
/// An unfinished evaluation comes back with its status and progress only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    #[serde(default)]
    pub status: Option<WireStatus>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default, alias = "certifications")]
    pub certification_evaluations: Vec<CertificationResult>,
}
