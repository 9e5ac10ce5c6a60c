//! Intake endpoints: health, certification catalog, organization and chat

use crate::error::{ClientError, Result};
use crate::{BackendClient, require_segment};
use gencertify_core::domain::certification::Certification;
use gencertify_core::dto::chat::{ChatHistoryResponse, ChatMessageRequest, ChatReply, ChatSession};
use gencertify_core::dto::health::HealthResponse;
use gencertify_core::dto::organization::{
    CertificationCatalog, DocumentUploaded, OrganizationSubmitted, SubmitOrganization,
};
use reqwest::multipart::{Form, Part};

impl BackendClient {
    /// Check that the API is up
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.url("/health");
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List the certifications the backend can evaluate
    pub async fn list_certifications(&self) -> Result<Vec<Certification>> {
        let url = self.url("/api/static-input/certifications");
        let response = self.client.get(&url).send().await?;

        let catalog: CertificationCatalog = self.handle_response(response).await?;
        Ok(catalog.certifications)
    }

    /// Submit organization details
    ///
    /// # Returns
    /// The submission result, including the new `organization_id`
    pub async fn submit_organization(
        &self,
        organization: &SubmitOrganization,
    ) -> Result<OrganizationSubmitted> {
        let url = self.url("/api/static-input/organization");
        let response = self.client.post(&url).json(organization).send().await?;

        self.handle_response(response).await
    }

    /// Send a message to the compliance assistant
    ///
    /// Pass the `session_id` of a previous reply to continue that conversation.
    pub async fn send_chat_message(
        &self,
        organization_id: &str,
        message: &str,
        session_id: Option<String>,
    ) -> Result<ChatReply> {
        require_segment("organization_id", organization_id)?;

        let url = self.url("/api/chat/message");
        let response = self
            .client
            .post(&url)
            .json(&ChatMessageRequest {
                organization_id: organization_id.to_string(),
                message: message.to_string(),
                session_id,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Upload a supporting document (policy, procedure, audit report...)
    ///
    /// The file is sent as `multipart/form-data`. `document_type` is a free
    /// form label the backend stores with the file.
    ///
    /// # Returns
    /// Where the backend stored the file
    pub async fn upload_document(
        &self,
        organization_id: &str,
        document_type: &str,
        file_name: &str,
        contents: Vec<u8>,
        description: Option<String>,
    ) -> Result<DocumentUploaded> {
        require_segment("organization_id", organization_id)?;
        if document_type.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "document_type cannot be empty".to_string(),
            ));
        }
        if file_name.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "file name cannot be empty".to_string(),
            ));
        }

        let mut form = Form::new()
            .part("file", Part::bytes(contents).file_name(file_name.to_string()))
            .text("organization_id", organization_id.to_string())
            .text("document_type", document_type.to_string());
        if let Some(description) = description {
            form = form.text("description", description);
        }

        let url = self.url("/api/static-input/upload");
        let response = self.client.post(&url).multipart(form).send().await?;

        self.handle_response(response).await
    }

    /// Get the stored messages of a chat session
    ///
    /// # Returns
    /// `None` when the session does not exist or belongs to another organization
    pub async fn chat_history(
        &self,
        organization_id: &str,
        session_id: &str,
    ) -> Result<Option<ChatSession>> {
        require_segment("organization_id", organization_id)?;
        require_segment("session_id", session_id)?;

        let url = self.url(&format!(
            "/api/chat/history/{}/{}",
            organization_id, session_id
        ));
        let response = self.client.get(&url).send().await?;

        let history: ChatHistoryResponse = self.handle_response(response).await?;
        Ok(history.history)
    }
}
