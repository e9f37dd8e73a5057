//! Notes-by-default content mode

use super::blocks::{dedent, is_comment, is_hard_blank, is_indented, parse_blocks, parse_structural};
use super::ParsedContent;
use crate::splitter::is_code_fence;

/// Parse slide content where plain lines are speaker notes.
///
/// Indented runs (tab or four spaces) are dedented one level and parsed as
/// ordinary visible blocks. Blank lines that are themselves indented keep a
/// run going, so one column can hold several paragraphs.
pub fn parse_notes_by_default(content: &str) -> ParsedContent {
    let lines: Vec<&str> = content.lines().collect();
    let mut parsed = ParsedContent::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            parsed.flow_lines.push(String::new());
            i += 1;
            continue;
        }
        if is_comment(line) {
            i += 1;
            continue;
        }

        if is_indented(line) {
            let end = indented_run_end(&lines, i);
            let run = &lines[i..end];

            let dedented: Vec<&str> = run.iter().map(|l| dedent(l)).collect();
            parsed.elements.extend(parse_blocks(&dedented));
            parsed.flow_lines.extend(
                run.iter()
                    .filter(|l| !is_comment(l))
                    .map(|l| if is_hard_blank(l) { String::new() } else { l.to_string() }),
            );

            i = end;
            continue;
        }

        if let Some((element, consumed)) = parse_structural(&lines, i) {
            parsed.elements.push(element);
            i += consumed;
            continue;
        }

        parsed.notes.push(line.trim().to_string());
        i += 1;
    }

    parsed
}

/// Find where an indented run starting at `start` ends.
///
/// Inside a fenced code block every line belongs to the run, indented or not.
fn indented_run_end(lines: &[&str], start: usize) -> usize {
    let mut end = start;
    let mut in_fence = false;

    while end < lines.len() {
        let line = lines[end];
        if in_fence {
            if is_code_fence(line) {
                in_fence = false;
            }
        } else if !is_indented(line) {
            break;
        } else if is_code_fence(line) {
            in_fence = true;
        }
        end += 1;
    }

    end
}
