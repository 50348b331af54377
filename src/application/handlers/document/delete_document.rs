//! DeleteDocumentHandler - Command handler for permanent deletion.

use std::sync::Arc;

use crate::domain::document::DocumentError;
use crate::domain::foundation::{DocumentId, UserId};
use crate::ports::DocumentRepository;

/// Command to delete a document.
#[derive(Debug, Clone)]
pub struct DeleteDocumentCommand {
    pub document_id: DocumentId,
    pub user_id: UserId,
}

/// Handler for deleting documents.
pub struct DeleteDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
}

impl DeleteDocumentHandler {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Returns true if a document was removed.
    ///
    /// Deleting a missing or foreign document is not an error; it returns
    /// false, so repeating a delete is safe.
    pub async fn handle(&self, cmd: DeleteDocumentCommand) -> Result<bool, DocumentError> {
        let deleted = self
            .repository
            .delete_owned(&cmd.document_id, &cmd.user_id)
            .await?;

        if deleted {
            tracing::info!(document_id = %cmd.document_id, user_id = %cmd.user_id, "Document deleted");
        } else {
            tracing::debug!(document_id = %cmd.document_id, user_id = %cmd.user_id, "Delete matched nothing");
        }

        Ok(deleted)
    }
}
