//! Pulldown-cmark based preview renderer.
//!
//! Produces an HTML fragment for the editor's preview pane. Unlike the
//! binary exporters this uses a full CommonMark parser with the GitHub
//! extensions. Raw HTML in the source is shown as text, never injected.

use pulldown_cmark::{html, Event, Options, Parser};

use crate::ports::{ExportError, MarkdownPreviewer};

/// Markdown to HTML fragment using pulldown-cmark.
///
/// # Example
///
/// ```rust,ignore
/// let previewer = HtmlPreviewRenderer::new();
/// let html = previewer.to_html("# Hello\n\nWorld")?;
/// assert!(html.contains("<h1>Hello</h1>"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPreviewRenderer;

impl HtmlPreviewRenderer {
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }
}

impl MarkdownPreviewer for HtmlPreviewRenderer {
    fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        let parser = Parser::new_ext(markdown, Self::options()).map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        });

        let mut body = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut body, parser);
        Ok(body)
    }
}
