//! Structural units of parsed markdown.

use serde::{Deserialize, Serialize};

/// One structural element produced by [`parse_blocks`](super::parse_blocks).
///
/// Both binary renderers consume the same block sequence, so a heading in
/// the PDF and a heading in the Word file always come from the same line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Block {
    /// `#`, `##` or `###` heading. Level is always 1..=3.
    Heading { level: u8, text: String },
    /// `- item` or `* item`.
    ListItem(String),
    /// A whole fenced code region, lines joined with `\n`.
    CodeLine(String),
    Paragraph(String),
    BlankLine,
}
