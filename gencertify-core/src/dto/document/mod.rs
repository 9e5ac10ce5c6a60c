//! Document generation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::document::{DocumentType, GeneratedDocument};
use crate::domain::job::{JobHandle, JobStatus, StatusReport, WireStatus, reduce_status};

/// Request to draft documents from a completed evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDocuments {
    pub organization_id: String,
    pub evaluation_id: JobHandle,
    pub document_types: Vec<DocumentType>,
}

/// Response to a started document generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentGenerationStarted {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub document_id: JobHandle,
}

/// Document generation status
///
/// Progress is optional; some backends only report the status string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStatusResponse {
    pub organization_id: String,
    pub document_id: JobHandle,
    pub status: WireStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusReport for DocumentStatusResponse {
    fn job_status(&self) -> JobStatus {
        reduce_status(self.status, self.progress, self.error.as_deref())
    }
}

/// Documents generated for an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub status: String,
    #[serde(default)]
    pub documents: Vec<GeneratedDocument>,
}
