//! Document domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compliance documents the backend can draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    InformationSecurityPolicy,
    SystemDescription,
    IncidentResponseProcedure,
    RiskAssessment,
    DataProtectionPolicy,
    BusinessContinuityPlan,
    AcceptableUsePolicy,
    VendorManagementPolicy,
}

impl DocumentType {
    pub const ALL: [DocumentType; 8] = [
        DocumentType::InformationSecurityPolicy,
        DocumentType::SystemDescription,
        DocumentType::IncidentResponseProcedure,
        DocumentType::RiskAssessment,
        DocumentType::DataProtectionPolicy,
        DocumentType::BusinessContinuityPlan,
        DocumentType::AcceptableUsePolicy,
        DocumentType::VendorManagementPolicy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::InformationSecurityPolicy => "information_security_policy",
            DocumentType::SystemDescription => "system_description",
            DocumentType::IncidentResponseProcedure => "incident_response_procedure",
            DocumentType::RiskAssessment => "risk_assessment",
            DocumentType::DataProtectionPolicy => "data_protection_policy",
            DocumentType::BusinessContinuityPlan => "business_continuity_plan",
            DocumentType::AcceptableUsePolicy => "acceptable_use_policy",
            DocumentType::VendorManagementPolicy => "vendor_management_policy",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        DocumentType::ALL
            .into_iter()
            .find(|doc| doc.as_str() == normalized)
            .ok_or_else(|| format!("unknown document type '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

/// A document produced by a completed generation job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub document_type: DocumentType,
    #[serde(alias = "file_name")]
    pub filename: String,
    #[serde(alias = "file_url")]
    pub download_url: String,
    #[serde(default)]
    pub format: Option<DocumentFormat>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}
