//! PreviewDocumentHandler - Markdown to HTML for the editor preview pane.

use std::sync::Arc;

use crate::domain::document::DocumentError;
use crate::ports::MarkdownPreviewer;

/// Query to render a preview.
#[derive(Debug, Clone)]
pub struct PreviewDocumentQuery {
    pub content: String,
}

/// Handler for previews. Read-only; nothing is stored.
pub struct PreviewDocumentHandler {
    previewer: Arc<dyn MarkdownPreviewer>,
}

impl PreviewDocumentHandler {
    pub fn new(previewer: Arc<dyn MarkdownPreviewer>) -> Self {
        Self { previewer }
    }

    pub fn handle(&self, query: PreviewDocumentQuery) -> Result<String, DocumentError> {
        Ok(self.previewer.to_html(&query.content)?)
    }
}
