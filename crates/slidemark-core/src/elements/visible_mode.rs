//! Visible-by-default content mode

use regex::Regex;
use std::sync::OnceLock;

use slidemark_ast::{SlideElement, SlideLayout};

use super::blocks::{is_comment, is_hard_blank, is_indented, parse_blocks, parse_heading};
use super::ParsedContent;
use crate::splitter::is_code_fence;

/// Parse slide content where everything is visible until a notes marker.
pub fn parse_visible_by_default(content: &str, layout: Option<&SlideLayout>) -> ParsedContent {
    let lines: Vec<&str> = content.lines().collect();

    let (visible, note_lines) = match find_notes_marker(&lines) {
        Some(index) => (&lines[..index], &lines[index + 1..]),
        None => (&lines[..], &[][..]),
    };

    let mut elements = parse_blocks(visible);
    if layout.is_some_and(SlideLayout::is_column_layout) {
        assign_heading_columns(&mut elements);
    }

    let notes = note_lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !is_comment(l))
        .map(str::to_string)
        .collect();

    ParsedContent {
        elements,
        notes,
        flow_lines: indented_flow(visible),
    }
}

/// Find the index of the `note:` / `notes:` line outside code fences
pub fn find_notes_marker(lines: &[&str]) -> Option<usize> {
    static NOTES_RE: OnceLock<Regex> = OnceLock::new();
    let re = NOTES_RE.get_or_init(|| Regex::new(r"(?i)^notes?:$").unwrap());

    let mut in_fence = false;
    for (index, line) in lines.iter().enumerate() {
        if is_code_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if re.is_match(line.trim()) {
            return Some(index);
        }
    }

    None
}

/// Place elements by `###` headings: each one opens the next column and
/// everything after it follows it there.
fn assign_heading_columns(elements: &mut [SlideElement]) {
    let mut column: Option<usize> = None;
    for element in elements.iter_mut() {
        if element.is_heading_level(3) {
            column = Some(column.map_or(0, |c| c + 1));
        }
        element.set_column(column);
    }
}

/// Collect indented runs that begin after a blank line, a heading, or the
/// start of the slide. Indented continuation lines of lists and paragraphs
/// are not part of the flow.
fn indented_flow(lines: &[&str]) -> Vec<String> {
    let mut flow = Vec::new();
    let mut in_fence = false;
    let mut run_open = false;
    let mut after_break = true;

    for line in lines {
        if in_fence {
            if is_code_fence(line) {
                in_fence = false;
            }
            continue;
        }
        if is_hard_blank(line) {
            flow.push(String::new());
            run_open = false;
            after_break = true;
            continue;
        }
        if is_comment(line) {
            continue;
        }
        if is_indented(line) {
            if run_open || after_break {
                flow.push(line.to_string());
                run_open = true;
            }
            continue;
        }

        run_open = false;
        after_break = parse_heading(line).is_some();
        in_fence = is_code_fence(line);
    }

    flow
}
