//! Document generation API endpoints

use crate::error::{ClientError, Result};
use crate::{BackendClient, require_segment};
use gencertify_core::domain::document::{DocumentType, GeneratedDocument};
use gencertify_core::domain::job::JobHandle;
use gencertify_core::dto::document::{
    DocumentGenerationStarted, DocumentListResponse, DocumentStatusResponse, GenerateDocuments,
};

impl BackendClient {
    // =============================================================================
    // Document Generation
    // =============================================================================

    /// Start drafting documents from a completed evaluation
    ///
    /// # Returns
    /// The generation handle (`document_id`) to poll
    pub async fn generate_documents(
        &self,
        organization_id: &str,
        evaluation_id: &JobHandle,
        document_types: Vec<DocumentType>,
    ) -> Result<DocumentGenerationStarted> {
        require_segment("organization_id", organization_id)?;
        require_segment("evaluation_id", evaluation_id.as_str())?;
        if document_types.is_empty() {
            return Err(ClientError::InvalidRequest(
                "select at least one document type to generate".to_string(),
            ));
        }

        let url = self.url("/api/documents/generate");
        let response = self
            .client
            .post(&url)
            .json(&GenerateDocuments {
                organization_id: organization_id.to_string(),
                evaluation_id: evaluation_id.clone(),
                document_types,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current status of a document generation
    pub async fn document_status(
        &self,
        organization_id: &str,
        document_id: &JobHandle,
    ) -> Result<DocumentStatusResponse> {
        require_segment("organization_id", organization_id)?;
        require_segment("document_id", document_id.as_str())?;

        let url = self.url(&format!(
            "/api/documents/status/{}/{}",
            organization_id, document_id
        ));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List all documents generated for an organization
    pub async fn list_documents(&self, organization_id: &str) -> Result<Vec<GeneratedDocument>> {
        require_segment("organization_id", organization_id)?;

        let url = self.url(&format!("/api/documents/list/{}", organization_id));
        let response = self.client.get(&url).send().await?;

        let list: DocumentListResponse = self.handle_response(response).await?;
        Ok(list.documents)
    }

    /// Build the download link for one generated document
    ///
    /// The backend answers this URL with a redirect to the stored file, so it
    /// can be handed to a browser as is.
    pub fn document_download_url(
        &self,
        organization_id: &str,
        document_id: &JobHandle,
        document_type: DocumentType,
    ) -> Result<String> {
        require_segment("organization_id", organization_id)?;
        require_segment("document_id", document_id.as_str())?;

        Ok(self.url(&format!(
            "/api/documents/download/{}/{}/{}",
            organization_id, document_id, document_type
        )))
    }
}
