//! Word (.docx) renderer built on `docx-rs`.
//!
//! Emits one flow of paragraphs: the title, an empty spacer paragraph, then
//! one or more paragraphs per block.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, RunFonts};

use crate::domain::markdown::Block;
use crate::ports::{DocumentRenderer, ExportError, ExportFormat};

const TITLE_PT: usize = 18;
const CODE_PT: usize = 10;
const CODE_FONT: &str = "Courier New";

/// Renders blocks into an Office Open XML word-processing package.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordRenderer;

impl WordRenderer {
    pub fn new() -> Self {
        Self
    }

    fn build(&self, title: &str, blocks: &[Block]) -> Docx {
        let mut docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(bold_run(title, TITLE_PT)))
            .add_paragraph(Paragraph::new());

        for block in blocks {
            docx = match block {
                Block::Heading { level, text } => docx.add_paragraph(
                    Paragraph::new().add_run(bold_run(text, heading_size(*level))),
                ),
                Block::ListItem(text) => docx.add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text(format!("\u{2022} {}", text))),
                ),
                Block::CodeLine(code) => code
                    .split('\n')
                    .fold(docx, |d, line| d.add_paragraph(Paragraph::new().add_run(code_run(line)))),
                Block::Paragraph(text) => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
                }
                Block::BlankLine => docx.add_paragraph(Paragraph::new()),
            };
        }

        docx
    }
}

impl DocumentRenderer for WordRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Word
    }

    fn render(&self, title: &str, blocks: &[Block]) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Cursor::new(Vec::new());
        self.build(title, blocks)
            .build()
            .pack(&mut buffer)
            .map_err(|e| ExportError::word_failed(e.to_string()))?;

        let bytes = buffer.into_inner();
        tracing::debug!(blocks = blocks.len(), bytes = bytes.len(), "Word document rendered");
        Ok(bytes)
    }
}

/// Point size per heading level.
fn heading_size(level: u8) -> usize {
    match level {
        1 => 16,
        2 => 14,
        _ => 12,
    }
}

// docx sizes are in half-points.
fn bold_run(text: &str, points: usize) -> Run {
    Run::new().add_text(text).bold().size(points * 2)
}

fn code_run(text: &str) -> Run {
    Run::new()
        .add_text(text)
        .size(CODE_PT * 2)
        .fonts(RunFonts::new().ascii(CODE_FONT).hi_ansi(CODE_FONT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::markdown::parse_blocks;

    fn render(content: &str) -> Vec<u8> {
        WordRenderer::new()
            .render("Title", &parse_blocks(content))
            .unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn output_is_a_zip_package() {
        let bytes = render("# Heading\n- item\n```\ncode\n```\ntext");
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn package_contains_main_document_part() {
        let bytes = render("text");
        assert!(contains(&bytes, b"word/document.xml"));
        assert!(contains(&bytes, b"[Content_Types].xml"));
    }

    #[test]
    fn empty_input_renders_title_only() {
        let bytes = WordRenderer::new().render("Just a title", &[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn code_region_becomes_one_paragraph_per_line() {
        let docx = WordRenderer::new().build("T", &parse_blocks("```\na\nb\nc\n```"));
        // title + spacer + three code lines
        assert_eq!(docx.document.children.len(), 5);
    }

    #[test]
    fn every_block_yields_at_least_one_paragraph() {
        let docx = WordRenderer::new().build("T", &parse_blocks("# H\n- a\n\ntext"));
        assert_eq!(docx.document.children.len(), 2 + 4);
    }

    #[test]
    fn heading_sizes_follow_level() {
        assert_eq!(heading_size(1), 16);
        assert_eq!(heading_size(2), 14);
        assert_eq!(heading_size(3), 12);
    }

    #[test]
    fn reports_word_format() {
        assert_eq!(WordRenderer::new().format(), ExportFormat::Word);
    }
}
