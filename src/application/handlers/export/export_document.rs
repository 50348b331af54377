//! ExportDocumentHandler - Markdown to PDF / Word download.
//!
//! The markdown is parsed once; the renderer for the requested format
//! consumes the blocks on a blocking thread.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::document::{sanitize_filename, DocumentError, DEFAULT_FILENAME};
use crate::domain::foundation::{DocumentId, UserId};
use crate::domain::markdown::parse_blocks;
use crate::ports::{DocumentRenderer, DocumentRepository, ExportError, ExportFormat, ExportedDocument};

/// Where the markdown to export comes from.
#[derive(Debug, Clone)]
pub enum ExportSource {
    /// Content supplied by the caller. A missing or blank title becomes
    /// "Document".
    Inline {
        content: String,
        title: Option<String>,
    },
    /// A stored document owned by the caller; its own title is used.
    Stored(DocumentId),
}

/// Command to export markdown.
#[derive(Debug, Clone)]
pub struct ExportDocumentCommand {
    pub user_id: UserId,
    pub format: ExportFormat,
    pub source: ExportSource,
}

/// Handler for binary exports.
pub struct ExportDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
    renderers: HashMap<ExportFormat, Arc<dyn DocumentRenderer>>,
}

impl ExportDocumentHandler {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        renderers: Vec<Arc<dyn DocumentRenderer>>,
    ) -> Self {
        let renderers = renderers.into_iter().map(|r| (r.format(), r)).collect();
        Self {
            repository,
            renderers,
        }
    }

    pub async fn handle(&self, cmd: ExportDocumentCommand) -> Result<ExportedDocument, DocumentError> {
        let renderer = self.renderers.get(&cmd.format).cloned().ok_or_else(|| {
            DocumentError::validation("format", ExportError::UnsupportedFormat(cmd.format.to_string()).to_string())
        })?;

        let (title, content) = self.resolve_source(&cmd.user_id, cmd.source).await?;
        let filename = sanitize_filename(&title);
        let blocks = parse_blocks(&content);
        let block_count = blocks.len();

        let render_title = title.clone();
        let rendered = tokio::task::spawn_blocking(move || renderer.render(&render_title, &blocks))
            .await
            .map_err(|e| ExportError::task_failed(e.to_string()))
            .and_then(|inner| inner);

        let bytes = match rendered {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(format = %cmd.format, user_id = %cmd.user_id, error = %e, "Export failed");
                return Err(e.into());
            }
        };

        tracing::debug!(
            format = %cmd.format,
            user_id = %cmd.user_id,
            blocks = block_count,
            bytes = bytes.len(),
            "Document exported"
        );

        Ok(ExportedDocument::new(bytes, cmd.format, &filename))
    }

    async fn resolve_source(
        &self,
        user_id: &UserId,
        source: ExportSource,
    ) -> Result<(String, String), DocumentError> {
        match source {
            ExportSource::Inline { content, title } => {
                let title = title
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
                Ok((title, content))
            }
            ExportSource::Stored(id) => {
                let document = self
                    .repository
                    .find_owned(&id, user_id)
                    .await?
                    .ok_or(DocumentError::NotFoundOrForbidden)?;
                Ok((document.title().to_string(), document.content().to_string()))
            }
        }
    }
}
