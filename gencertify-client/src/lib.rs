//! GenCertify HTTP Client
//!
//! A simple, type-safe HTTP client for the GenCertify compliance API.
//!
//! The client covers organization intake, the compliance chat, and the two
//! asynchronous workflows (readiness evaluation and document generation):
//! starting a job, reading its status and fetching what it produced. Tracking
//! a job until it finishes lives in `gencertify-poller`.
//!
//! # Example
//!
//! ```no_run
//! use gencertify_client::BackendClient;
//! use gencertify_core::domain::certification::CertificationType;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::new("http://localhost:8000");
//!
//!     let started = client
//!         .start_evaluation("org-123", vec![CertificationType::Iso27001])
//!         .await?;
//!
//!     println!("Started evaluation: {}", started.evaluation_id);
//!     Ok(())
//! }
//! ```

mod documents;
pub mod error;
mod evaluations;
mod intake;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the GenCertify API
///
/// Methods are organized into logical groups:
/// - Intake (health, certification catalog, organization submission, chat)
/// - Evaluation lifecycle (start, status, results)
/// - Document generation (generate, status, list, download links)
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Base URL of the API (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use gencertify_client::BackendClient;
    ///
    /// let client = BackendClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use gencertify_client::BackendClient;
    /// use reqwest::{Client, StatusCode};
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BackendClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// A 404 becomes [`ClientError::NotFound`] and any other non-2xx response
    /// becomes [`ClientError::ApiError`]. Both carry the API's error detail
    /// when the body has one, or the raw body otherwise.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let detail = error_detail(&error_text);

            if status == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound(detail));
            }
            return Err(ClientError::api_error(status.as_u16(), detail));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Extracts `detail` (or `message`) from a JSON error body
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .or_else(|| value.get("message"))
                .and_then(|detail| detail.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

/// Rejects identifiers that would produce a malformed URL path
fn require_segment(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} cannot be empty", name)));
    }
    if value.contains('/') {
        return Err(ClientError::InvalidRequest(format!(
            "{} cannot contain '/'",
            name
        )));
    }
    Ok(())
}
