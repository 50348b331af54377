//! Document Renderer Port - Block sequence to binary document.
//!
//! Markdown is parsed once into [`Block`]s by the application layer; each
//! renderer turns the same blocks into its own encoding. Renderers are
//! synchronous and CPU-bound, so callers run them on a blocking thread.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::markdown::Block;

/// Port for rendering parsed markdown into a downloadable document.
///
/// # Contract
///
/// Implementations must:
/// - Return a complete, standalone document or an error, never partial bytes
/// - Style each block kind the same way for every call
/// - Not touch shared mutable state
///
/// # Usage
///
/// ```rust,ignore
/// let renderer: &dyn DocumentRenderer = get_renderer();
/// let blocks = parse_blocks("# Notes\n\n- one\n- two");
/// let bytes = renderer.render("Notes", &blocks)?;
/// ```
pub trait DocumentRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ExportFormat;

    /// Render `title` followed by `blocks`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the underlying library fails.
    fn render(&self, title: &str, blocks: &[Block]) -> Result<Vec<u8>, ExportError>;
}

/// Port for rendering markdown to an HTML preview fragment.
///
/// Unlike [`DocumentRenderer`] this takes the raw source, since a preview
/// should show the full markdown feature set rather than the block subset.
pub trait MarkdownPreviewer: Send + Sync {
    /// Render `markdown` to an HTML fragment. Raw HTML in the source must be
    /// escaped, not passed through.
    fn to_html(&self, markdown: &str) -> Result<String, ExportError>;
}

/// Export formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// PDF document.
    Pdf,
    /// Office Open XML word-processing package.
    Word,
    /// HTML fragment (preview).
    Html,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "docx",
            ExportFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Word => write!(f, "word"),
            ExportFormat::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "word" | "docx" => Ok(ExportFormat::Word),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a new exported document. `base_filename` must already be sanitized.
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// PDF generation failed.
    #[error("PDF generation failed: {0}")]
    PdfGenerationFailed(String),

    /// Word package generation failed.
    #[error("Word generation failed: {0}")]
    WordGenerationFailed(String),

    /// HTML rendering failed.
    #[error("HTML rendering failed: {0}")]
    HtmlRenderingFailed(String),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

impl ExportError {
    /// Create a PDF generation error.
    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfGenerationFailed(reason.into())
    }

    /// Create a Word generation error.
    pub fn word_failed(reason: impl Into<String>) -> Self {
        Self::WordGenerationFailed(reason.into())
    }

    /// Create an HTML rendering error.
    pub fn html_failed(reason: impl Into<String>) -> Self {
        Self::HtmlRenderingFailed(reason.into())
    }

    pub fn task_failed(reason: impl Into<String>) -> Self {
        Self::TaskFailed(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
