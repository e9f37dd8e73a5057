//! Slide splitting
//!
//! The body of a presentation is cut into slide segments on separator lines
//! of three or more dashes. Separators inside fenced code blocks are content,
//! not boundaries.

use regex::Regex;
use std::sync::OnceLock;

/// Check if a line is a slide separator (`---`, `-----`, trailing spaces allowed)
pub fn is_slide_separator(line: &str) -> bool {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    let re = SEPARATOR_RE.get_or_init(|| Regex::new(r"^-{3,}\s*$").unwrap());
    re.is_match(line)
}

/// Check if a line opens or closes a backtick code fence
pub fn is_code_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Split a document body into raw slide segments.
///
/// Segments keep their document order and are returned even when empty, so
/// the position of each segment is its slide index.
pub fn split_slides(body: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if is_code_fence(line) {
            in_fence = !in_fence;
        } else if !in_fence && is_slide_separator(line) {
            segments.push(trim_segment(&current));
            current.clear();
            continue;
        }
        current.push(line);
    }
    segments.push(trim_segment(&current));

    segments
}

/// Drop surrounding blank lines and trailing whitespace.
///
/// Leading indentation of the first line is preserved: in notes-by-default
/// mode an indented first line is slide content, not a note.
fn trim_segment(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n").trim_end().to_string(),
        _ => String::new(),
    }
}
