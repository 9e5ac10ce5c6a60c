//! Evaluation API endpoints

use crate::error::{ClientError, Result};
use crate::{BackendClient, require_segment};
use gencertify_core::domain::certification::{CertificationResult, CertificationType};
use gencertify_core::domain::job::JobHandle;
use gencertify_core::dto::evaluation::{
    EvaluationResultsResponse, EvaluationStarted, EvaluationStatusResponse, StartEvaluation,
};

impl BackendClient {
    // =============================================================================
    // Evaluation Lifecycle
    // =============================================================================

    /// Start a readiness evaluation for an organization
    ///
    /// The backend runs the evaluation in the background; the returned
    /// `evaluation_id` is the handle to poll.
    ///
    /// # Example
    /// ```no_run
    /// # use gencertify_client::BackendClient;
    /// # use gencertify_core::domain::certification::CertificationType;
    /// # async fn example() -> gencertify_client::Result<()> {
    /// let client = BackendClient::new("http://localhost:8000");
    /// let started = client
    ///     .start_evaluation("org-123", vec![CertificationType::Soc2])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_evaluation(
        &self,
        organization_id: &str,
        certification_types: Vec<CertificationType>,
    ) -> Result<EvaluationStarted> {
        require_segment("organization_id", organization_id)?;
        if certification_types.is_empty() {
            return Err(ClientError::InvalidRequest(
                "select at least one certification to evaluate".to_string(),
            ));
        }

        let url = self.url("/api/evaluation/start");
        let response = self
            .client
            .post(&url)
            .json(&StartEvaluation {
                organization_id: organization_id.to_string(),
                certification_types,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current status of an evaluation
    pub async fn evaluation_status(
        &self,
        organization_id: &str,
        evaluation_id: &JobHandle,
    ) -> Result<EvaluationStatusResponse> {
        require_segment("organization_id", organization_id)?;
        require_segment("evaluation_id", evaluation_id.as_str())?;

        let url = self.url(&format!(
            "/api/evaluation/status/{}/{}",
            organization_id, evaluation_id
        ));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get the per-certification results of a completed evaluation
    ///
    /// # Returns
    /// One result per evaluated certification. An evaluation that has not
    /// completed yet yields an empty list.
    pub async fn evaluation_results(
        &self,
        organization_id: &str,
        evaluation_id: &JobHandle,
    ) -> Result<Vec<CertificationResult>> {
        require_segment("organization_id", organization_id)?;
        require_segment("evaluation_id", evaluation_id.as_str())?;

        let url = self.url(&format!(
            "/api/evaluation/results/{}/{}",
            organization_id, evaluation_id
        ));
        let response = self.client.get(&url).send().await?;

        let envelope: EvaluationResultsResponse = self.handle_response(response).await?;
        Ok(envelope.results.certification_evaluations)
    }
}
