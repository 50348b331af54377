//! Line-based markdown scanner.
//!
//! This is intentionally not CommonMark. It recognizes the handful of
//! constructs the exporters style differently and treats everything else as
//! a paragraph line.

use super::block::Block;

const FENCE: &str = "```";

/// Heading prefixes, longest first.
const HEADING_PREFIXES: [(&str, u8); 3] = [("### ", 3), ("## ", 2), ("# ", 1)];

const LIST_PREFIXES: [&str; 2] = ["- ", "* "];

/// Scans `content` line by line into blocks.
///
/// Lines are trimmed before classification. A line starting with a
/// triple backtick toggles code mode; the lines in between are emitted as a
/// single [`Block::CodeLine`] when the fence closes. An empty fenced region
/// emits nothing. An unterminated fence is flushed at end of input.
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut inside_code = false;
    let mut code: Vec<&str> = Vec::new();

    for raw in content.lines() {
        let line = raw.trim();

        if line.starts_with(FENCE) {
            if inside_code {
                flush_code(&mut code, &mut blocks);
            }
            inside_code = !inside_code;
            continue;
        }

        if inside_code {
            code.push(line);
            continue;
        }

        blocks.push(classify(line));
    }

    if inside_code {
        flush_code(&mut code, &mut blocks);
    }

    blocks
}

fn classify(line: &str) -> Block {
    for (prefix, level) in HEADING_PREFIXES {
        if let Some(text) = line.strip_prefix(prefix) {
            return Block::Heading {
                level,
                text: text.trim().to_string(),
            };
        }
    }

    if let Some(text) = LIST_PREFIXES.iter().find_map(|p| line.strip_prefix(p)) {
        return Block::ListItem(text.trim().to_string());
    }

    if line.is_empty() {
        Block::BlankLine
    } else {
        Block::Paragraph(line.to_string())
    }
}

fn flush_code(code: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !code.is_empty() {
        blocks.push(Block::CodeLine(code.join("\n")));
        code.clear();
    }
}
