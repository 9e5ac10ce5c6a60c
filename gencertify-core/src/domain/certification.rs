//! Certification domain types
//!
//! Supported certification standards and the per-standard readiness result
//! produced by a completed evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Certification standards the backend can evaluate against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificationType {
    #[serde(rename = "iso_27001")]
    Iso27001,
    #[serde(rename = "soc_2")]
    Soc2,
    #[serde(rename = "gdpr")]
    Gdpr,
    #[serde(rename = "hipaa")]
    Hipaa,
    #[serde(rename = "pci_dss")]
    PciDss,
}

impl CertificationType {
    pub const ALL: [CertificationType; 5] = [
        CertificationType::Iso27001,
        CertificationType::Soc2,
        CertificationType::Gdpr,
        CertificationType::Hipaa,
        CertificationType::PciDss,
    ];

    /// Identifier used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationType::Iso27001 => "iso_27001",
            CertificationType::Soc2 => "soc_2",
            CertificationType::Gdpr => "gdpr",
            CertificationType::Hipaa => "hipaa",
            CertificationType::PciDss => "pci_dss",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            CertificationType::Iso27001 => "ISO 27001",
            CertificationType::Soc2 => "SOC 2",
            CertificationType::Gdpr => "GDPR",
            CertificationType::Hipaa => "HIPAA",
            CertificationType::PciDss => "PCI DSS",
        }
    }
}

impl fmt::Display for CertificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CertificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        CertificationType::ALL
            .into_iter()
            .find(|cert| cert.as_str() == normalized || cert.as_str().replace('_', "") == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown certification '{}', expected one of: {}",
                    s,
                    CertificationType::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}

/// A certification as listed by the catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub id: CertificationType,
    pub name: String,
    pub description: String,
}

/// How close an organization is to passing a certification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLevel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessLevel::High => write!(f, "High"),
            ReadinessLevel::Medium => write!(f, "Medium"),
            ReadinessLevel::Low => write!(f, "Low"),
        }
    }
}

/// Readiness result for one certification standard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationResult {
    pub certification_type: CertificationType,
    #[serde(default)]
    pub readiness_level: Option<ReadinessLevel>,
    /// Overall compliance score (0-100)
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
