//! SaveDocumentHandler - Command handler for create-or-update.
//!
//! A save without an id (or with the nil id) creates a document and is
//! subject to the owner's quota. A save with an id updates the caller's
//! document in place and never touches the quota.

use std::sync::Arc;

use crate::domain::document::{extract_title, Document, DocumentError, MAX_TITLE_LENGTH};
use crate::domain::foundation::{DocumentId, OwnerIdentity};
use crate::domain::quota::{QuotaDecision, QuotaPolicy};
use crate::ports::{DocumentRepository, InsertOutcome};

/// Command to save a document.
#[derive(Debug, Clone)]
pub struct SaveDocumentCommand {
    pub owner: OwnerIdentity,
    /// Existing document to update; `None` or nil creates a new one.
    pub document_id: Option<DocumentId>,
    /// Explicit title; blank means derive from content.
    pub title: Option<String>,
    pub content: String,
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SaveDocumentResult {
    pub document: Document,
    pub created: bool,
    /// Quota standing after the save.
    pub quota: QuotaDecision,
}

/// Handler for saving documents.
pub struct SaveDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
    policy: Arc<QuotaPolicy>,
}

impl SaveDocumentHandler {
    pub fn new(repository: Arc<dyn DocumentRepository>, policy: Arc<QuotaPolicy>) -> Self {
        Self { repository, policy }
    }

    pub async fn handle(&self, cmd: SaveDocumentCommand) -> Result<SaveDocumentResult, DocumentError> {
        // 1. Validate input before any store access
        if cmd.content.trim().is_empty() {
            return Err(DocumentError::validation("content", "Content cannot be empty"));
        }
        let title = resolve_title(cmd.title.as_deref(), &cmd.content)?;

        // 2. Update or create
        let existing_id = cmd.document_id.filter(|id| !id.is_nil());
        let (document, created) = match existing_id {
            Some(id) => (self.update(&cmd.owner, id, title, cmd.content).await?, false),
            None => (self.create(&cmd.owner, title, cmd.content).await?, true),
        };

        // 3. Report where the owner stands now
        let count = self.repository.count_by_owner(&cmd.owner.id).await?;
        let quota = self.policy.evaluate(&cmd.owner.email, count);

        Ok(SaveDocumentResult {
            document,
            created,
            quota,
        })
    }

    async fn update(
        &self,
        owner: &OwnerIdentity,
        id: DocumentId,
        title: String,
        content: String,
    ) -> Result<Document, DocumentError> {
        let mut document = self
            .repository
            .find_owned(&id, &owner.id)
            .await?
            .ok_or(DocumentError::NotFoundOrForbidden)?;

        document.revise(title, content, owner.email.clone())?;

        // The row can vanish between the read and the write.
        if !self.repository.update_owned(&document).await? {
            return Err(DocumentError::NotFoundOrForbidden);
        }

        tracing::info!(document_id = %id, user_id = %owner.id, "Document updated");
        Ok(document)
    }

    async fn create(
        &self,
        owner: &OwnerIdentity,
        title: String,
        content: String,
    ) -> Result<Document, DocumentError> {
        let document = Document::create(owner, title, content)?;
        let limit = self.policy.limit_for(&owner.email);

        match self.repository.insert_within_quota(&document, limit).await? {
            InsertOutcome::Inserted => {
                tracing::info!(document_id = %document.id(), user_id = %owner.id, "Document created");
                Ok(document)
            }
            InsertOutcome::QuotaExceeded { current, limit } => {
                tracing::warn!(user_id = %owner.id, current, limit, "Document quota exceeded");
                Err(DocumentError::quota_exceeded(limit))
            }
        }
    }
}

/// Trims an explicit title, falling back to one derived from the content.
fn resolve_title(explicit: Option<&str>, content: &str) -> Result<String, DocumentError> {
    let explicit = explicit.map(str::trim).unwrap_or_default();
    if explicit.is_empty() {
        return Ok(extract_title(content));
    }

    let length = explicit.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(DocumentError::validation(
            "title",
            format!("Title must be at most {} characters (got {})", MAX_TITLE_LENGTH, length),
        ));
    }
    Ok(explicit.to_string())
}
