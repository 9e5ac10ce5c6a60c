//! Organization intake DTOs

use serde::{Deserialize, Serialize};

use crate::domain::certification::{Certification, CertificationType};

/// Organization details submitted before an evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrganization {
    pub name: String,
    pub industry: String,
    /// Organization size (e.g. Small, Medium, Large)
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<String>,
    pub certification_scope: String,
    pub selected_certifications: Vec<CertificationType>,
}

/// Response to an organization submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSubmitted {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub organization_id: String,
}

/// Available certifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationCatalog {
    pub status: String,
    pub certifications: Vec<Certification>,
}

/// Response to a supporting document upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUploaded {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Where the backend stored the file
    pub file_url: String,
}
