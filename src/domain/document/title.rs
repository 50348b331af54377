//! Title derivation and download-filename sanitizing.

use super::aggregate::MAX_TITLE_LENGTH;

/// Title used when the content has no non-blank line.
pub const UNTITLED: &str = "Untitled Document";

/// Length cap for a title taken from a plain (non-heading) first line.
pub const DERIVED_TITLE_MAX_CHARS: usize = 100;

/// Filename used when the sanitized title ends up empty.
pub const DEFAULT_FILENAME: &str = "Document";

/// Maximum length of a download filename stem, in characters.
pub const MAX_FILENAME_CHARS: usize = 200;

const UNSAFE_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Derives a title from markdown content.
///
/// Only the first non-blank line is considered. A `# ` or `## ` heading
/// yields its text; any other line is used as-is, cut to 100 characters.
pub fn extract_title(content: &str) -> String {
    let Some(first) = content.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return UNTITLED.to_string();
    };

    // `first` is trimmed, so text after a heading marker is never empty.
    let title = match first.strip_prefix("# ").or_else(|| first.strip_prefix("## ")) {
        Some(text) => truncate_chars(text.trim_start(), MAX_TITLE_LENGTH),
        None => truncate_chars(first, DERIVED_TITLE_MAX_CHARS),
    };
    title.to_string()
}

/// Turns a title into a safe download filename stem.
///
/// Strips `< > : " / \ | ? *` and control characters, collapses runs of
/// whitespace into single spaces, and caps the result at 200 characters.
pub fn sanitize_filename(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let capped = truncate_chars(&collapsed, MAX_FILENAME_CHARS).trim_end();

    if capped.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        capped.to_string()
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
