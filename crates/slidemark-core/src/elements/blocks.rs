//! Block sub-parsers shared by both content modes
//!
//! Each parser starts at a line index and returns the element it built and
//! the number of lines it consumed. Detection works on the left-trimmed
//! line; indentation rules belong to the content modes.

use regex::Regex;
use std::sync::OnceLock;

use slidemark_ast::{ElementType, ImageData, ImageSize, SlideElement};

use crate::splitter::is_code_fence;

/// `//` lines are dropped from both content and notes
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

/// Tab or four-space indentation
pub fn is_indented(line: &str) -> bool {
    line.starts_with('\t') || line.starts_with("    ")
}

/// A blank line that is not indented; separates blocks and columns
pub fn is_hard_blank(line: &str) -> bool {
    line.trim().is_empty() && !is_indented(line)
}

/// Remove one level of indentation
pub fn dedent(line: &str) -> &str {
    line.strip_prefix('\t')
        .or_else(|| line.strip_prefix("    "))
        .unwrap_or(line)
}

/// Parse `## Heading` into its level and text
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    let re = HEADING_RE.get_or_init(|| Regex::new(r"^(#{1,6})[ \t]+(\S.*)$").unwrap());

    let caps = re.captures(line.trim())?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2)?.as_str().trim_end();
    Some((level, text))
}

/// Parse `^Kicker text`
pub fn parse_kicker(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix('^')?.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Opening or closing `$$` line
pub fn is_math_fence(line: &str) -> bool {
    line.trim_start().starts_with("$$")
}

/// A line that starts a pipe table
pub fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// A `>` quoted line
pub fn is_blockquote(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

/// `- item`, `* item`, `+ item`, `1. item` or `1) item`
pub fn is_list_item(line: &str) -> bool {
    static LIST_RE: OnceLock<Regex> = OnceLock::new();
    let re = LIST_RE.get_or_init(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])(?:\s+|$)").unwrap());
    !line.trim().is_empty() && re.is_match(line)
}

/// Parse a markdown or wiki-link image occupying a whole line
pub fn parse_image(line: &str) -> Option<ImageData> {
    static MARKDOWN_RE: OnceLock<Regex> = OnceLock::new();
    static WIKI_RE: OnceLock<Regex> = OnceLock::new();

    let markdown_re = MARKDOWN_RE.get_or_init(|| {
        Regex::new(r#"^!\[([^\]]*)\]\(\s*<?([^)\s>]+)>?(?:\s+"[^"]*")?\s*\)$"#).unwrap()
    });
    let wiki_re =
        WIKI_RE.get_or_init(|| Regex::new(r"^!\[\[([^\]|]+)(?:\|([^\]]*))?\]\]$").unwrap());

    let line = line.trim();

    if let Some(caps) = wiki_re.captures(line) {
        let src = caps.get(1)?.as_str().trim().to_string();
        let arg = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        let (alt, size) = match parse_dimensions(arg) {
            Some(size) => (None, size),
            None if arg.is_empty() => (None, ImageSize::Auto),
            None => (Some(arg.to_string()), ImageSize::Auto),
        };
        return Some(ImageData {
            src,
            alt,
            size,
            is_wiki_link: true,
        });
    }

    let caps = markdown_re.captures(line)?;
    let src = caps.get(2)?.as_str().to_string();
    let alt_field = caps.get(1).map(|m| m.as_str()).unwrap_or("");

    // `![caption|300](img.png)` carries a size after the last pipe
    let (alt, size) = match alt_field.rsplit_once('|') {
        Some((text, dims)) => match parse_dimensions(dims.trim()) {
            Some(size) => (text.trim(), size),
            None => (alt_field.trim(), ImageSize::Auto),
        },
        None => (alt_field.trim(), ImageSize::Auto),
    };

    Some(ImageData {
        src,
        alt: if alt.is_empty() {
            None
        } else {
            Some(alt.to_string())
        },
        size,
        is_wiki_link: false,
    })
}

/// Parse `300` or `300x200`; values too large for `u32` saturate
pub fn parse_dimensions(arg: &str) -> Option<ImageSize> {
    static DIM_RE: OnceLock<Regex> = OnceLock::new();
    let re = DIM_RE.get_or_init(|| Regex::new(r"^(\d+)(?:x(\d+))?$").unwrap());

    let caps = re.captures(arg)?;
    let width = dimension(caps.get(1)?.as_str());
    match caps.get(2) {
        Some(height) => Some(ImageSize::Exact {
            width,
            height: dimension(height.as_str()),
        }),
        None => Some(ImageSize::Width { width }),
    }
}

fn dimension(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

/// Check if a line begins any non-paragraph block
pub fn starts_block(line: &str) -> bool {
    parse_heading(line).is_some()
        || is_code_fence(line)
        || is_math_fence(line)
        || parse_image(line).is_some()
        || is_table_line(line)
        || parse_kicker(line).is_some()
        || is_list_item(line)
        || is_blockquote(line)
}

/// Parse blocks that are visible in every content mode: headings, code,
/// math, images, tables and kickers.
pub fn parse_structural(lines: &[&str], start: usize) -> Option<(SlideElement, usize)> {
    let line = lines[start];

    if let Some((level, text)) = parse_heading(line) {
        return Some((SlideElement::heading(level, text, line.trim_end()), 1));
    }
    if is_code_fence(line) {
        return Some(parse_code_block(lines, start));
    }
    if is_math_fence(line) {
        return Some(parse_math_block(lines, start));
    }
    if let Some(image) = parse_image(line) {
        return Some((SlideElement::image(image, line.trim_end()), 1));
    }
    if is_table_line(line) {
        return Some(parse_table(lines, start));
    }
    if let Some(text) = parse_kicker(line) {
        return Some((
            SlideElement::new(ElementType::Kicker, text, line.trim_end()),
            1,
        ));
    }

    None
}

/// Parse every block in `lines` as visible content
pub fn parse_blocks(lines: &[&str]) -> Vec<SlideElement> {
    let mut elements = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() || is_comment(line) {
            i += 1;
            continue;
        }

        let (element, consumed) = if let Some(parsed) = parse_structural(lines, i) {
            parsed
        } else if is_list_item(line) {
            parse_list(lines, i)
        } else if is_blockquote(line) {
            parse_blockquote(lines, i)
        } else {
            parse_paragraph(lines, i)
        };

        elements.push(element);
        i += consumed.max(1);
    }

    elements
}

/// Fenced code up to the closing fence, or to the end when unterminated
pub fn parse_code_block(lines: &[&str], start: usize) -> (SlideElement, usize) {
    let opener = lines[start].trim();
    let language = opener.trim_start_matches('`').trim();
    let language = if language.is_empty() {
        None
    } else {
        Some(language.to_string())
    };

    let mut body = Vec::new();
    let mut end = start + 1;
    let mut closed = false;
    while end < lines.len() {
        if is_code_fence(lines[end]) {
            closed = true;
            break;
        }
        body.push(lines[end]);
        end += 1;
    }

    let consumed = if closed { end - start + 1 } else { end - start };
    let raw = lines[start..start + consumed].join("\n");
    (SlideElement::code(language, body.join("\n"), raw), consumed)
}

/// `$$ ... $$` block, single-line or multi-line; unterminated runs to the end
pub fn parse_math_block(lines: &[&str], start: usize) -> (SlideElement, usize) {
    let opener = lines[start].trim();
    let after_open = opener[2..].trim();

    if let Some(inner) = after_open.strip_suffix("$$") {
        let element = SlideElement::new(ElementType::Math, inner.trim(), opener);
        return (element, 1);
    }

    let mut body = Vec::new();
    if !after_open.is_empty() {
        body.push(after_open);
    }

    let mut end = start + 1;
    let mut closed = false;
    while end < lines.len() {
        let line = lines[end].trim();
        if let Some(before) = line.strip_suffix("$$") {
            if !before.trim().is_empty() {
                body.push(before.trim());
            }
            closed = true;
            break;
        }
        body.push(line);
        end += 1;
    }

    let consumed = if closed { end - start + 1 } else { end - start };
    let raw = lines[start..start + consumed].join("\n");
    (
        SlideElement::new(ElementType::Math, body.join("\n"), raw),
        consumed,
    )
}

/// Contiguous lines containing a pipe
pub fn parse_table(lines: &[&str], start: usize) -> (SlideElement, usize) {
    let rows: Vec<&str> = lines[start..]
        .iter()
        .take_while(|l| !l.trim().is_empty() && l.contains('|'))
        .copied()
        .collect();

    let content = rows.iter().map(|r| r.trim()).collect::<Vec<_>>().join("\n");
    let consumed = rows.len().max(1);
    (
        SlideElement::new(ElementType::Table, content, rows.join("\n")),
        consumed,
    )
}

/// List items plus their indented continuation lines, up to a blank line
pub fn parse_list(lines: &[&str], start: usize) -> (SlideElement, usize) {
    let mut items = vec![lines[start].trim_end()];
    let mut end = start + 1;

    while end < lines.len() {
        let line = lines[end];
        if line.trim().is_empty() {
            break;
        }
        let continuation = line.starts_with(char::is_whitespace) && !is_comment(line);
        if !is_list_item(line) && !continuation {
            break;
        }
        items.push(line.trim_end());
        end += 1;
    }

    let content = items.join("\n");
    (
        SlideElement::new(ElementType::List, content.clone(), content),
        end - start,
    )
}

/// Contiguous `>` lines with the marker stripped
pub fn parse_blockquote(lines: &[&str], start: usize) -> (SlideElement, usize) {
    let quoted: Vec<&str> = lines[start..]
        .iter()
        .take_while(|l| is_blockquote(l))
        .copied()
        .collect();

    let content = quoted
        .iter()
        .map(|l| {
            let stripped = l.trim_start().trim_start_matches('>');
            stripped.strip_prefix(' ').unwrap_or(stripped).trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n");

    (
        SlideElement::new(ElementType::Blockquote, content, quoted.join("\n")),
        quoted.len().max(1),
    )
}

/// Plain lines up to a blank line or the start of another block
pub fn parse_paragraph(lines: &[&str], start: usize) -> (SlideElement, usize) {
    let mut text = vec![lines[start].trim()];
    let mut raw = vec![lines[start].trim_end()];
    let mut end = start + 1;

    while end < lines.len() {
        let line = lines[end];
        if line.trim().is_empty() || starts_block(line) {
            break;
        }
        if !is_comment(line) {
            text.push(line.trim());
            raw.push(line.trim_end());
        }
        end += 1;
    }

    (
        SlideElement::paragraph(text.join("\n"), raw.join("\n")),
        end - start,
    )
}
