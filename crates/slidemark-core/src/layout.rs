//! Layout and column detection
//!
//! A slide without an explicit `layout:` gets one from its content. Slides
//! that land on the default layout may then be split into columns by an
//! ordered cascade of strategies; the first that yields at least two
//! columns wins.

use std::collections::BTreeSet;

use slidemark_ast::{SlideElement, SlideLayout, SlideMetadata, MAX_COLUMN_INDEX};
use tracing::trace;

use crate::elements::blocks::parse_heading;
use crate::elements::ParsedContent;
use crate::splitter::is_code_fence;

/// Infer a layout from the visible elements
pub fn detect_layout(elements: &[SlideElement]) -> SlideLayout {
    if elements.iter().any(|e| e.column_index.is_some()) {
        return SlideLayout::Default;
    }

    let visible: Vec<&SlideElement> = elements.iter().filter(|e| e.visible).collect();
    let images = visible.iter().filter(|e| e.is_image()).count();

    if images > 0 && images == visible.len() {
        return SlideLayout::FullImage;
    }
    if images > 0 {
        return SlideLayout::HalfImage;
    }

    if visible.len() <= 2 {
        if visible
            .iter()
            .any(|e| e.is_heading_level(1) || e.is_heading_level(2))
        {
            return SlideLayout::Title;
        }
        if visible.iter().filter(|e| e.is_heading_level(3)).count() == 1 {
            return SlideLayout::Section;
        }
    }

    SlideLayout::Default
}

/// One step of the column cascade
struct ColumnStrategy {
    name: &'static str,
    applies: fn(&[SlideElement]) -> bool,
    assign: fn(&[SlideElement], &[String]) -> Vec<Option<usize>>,
}

const STRATEGIES: &[ColumnStrategy] = &[
    ColumnStrategy {
        name: "h3-split",
        applies: has_h3_pairs,
        assign: split_at_h3,
    },
    ColumnStrategy {
        name: "h2-split",
        applies: has_h2_pairs_only,
        assign: split_at_h2,
    },
    ColumnStrategy {
        name: "blank-line-blocks",
        applies: always,
        assign: split_at_blank_lines,
    },
];

fn has_h3_pairs(elements: &[SlideElement]) -> bool {
    count_headings(elements, 3) >= 2
}

fn has_h2_pairs_only(elements: &[SlideElement]) -> bool {
    count_headings(elements, 3) == 0 && count_headings(elements, 2) >= 2
}

fn always(_: &[SlideElement]) -> bool {
    true
}

fn split_at_h3(elements: &[SlideElement], _: &[String]) -> Vec<Option<usize>> {
    split_at_headings(elements, 3)
}

fn split_at_h2(elements: &[SlideElement], _: &[String]) -> Vec<Option<usize>> {
    split_at_headings(elements, 2)
}

/// Run the column cascade over `elements`.
///
/// Returns the name of the strategy that produced columns, or `None` when
/// no strategy found two distinct columns (elements are left untouched).
pub fn detect_columns(
    elements: &mut [SlideElement],
    flow_lines: &[String],
) -> Option<&'static str> {
    for strategy in STRATEGIES {
        if !(strategy.applies)(elements) {
            continue;
        }

        let columns = (strategy.assign)(elements, flow_lines);
        if distinct_columns(&columns) < 2 {
            continue;
        }

        for (element, column) in elements.iter_mut().zip(columns) {
            element.set_column(column);
        }
        return Some(strategy.name);
    }

    None
}

/// Resolve the final layout of a slide and assign columns where needed.
///
/// The resolved layout is written back into `metadata.layout`.
pub fn resolve_layout(
    metadata: &mut SlideMetadata,
    content: &mut ParsedContent,
    auto_columns: bool,
) {
    let layout = match &metadata.layout {
        Some(layout) => layout.clone(),
        None => detect_layout(&content.elements),
    };

    let has_columns = content.elements.iter().any(|e| e.column_index.is_some());
    if layout == SlideLayout::Default && auto_columns && !metadata.no_autocolumn && !has_columns {
        if let Some(strategy) = detect_columns(&mut content.elements, &content.flow_lines) {
            trace!(strategy, "split slide into columns");
        }
    }

    metadata.layout = Some(layout);
}

fn count_headings(elements: &[SlideElement], level: u8) -> usize {
    elements.iter().filter(|e| e.is_heading_level(level)).count()
}

fn distinct_columns(columns: &[Option<usize>]) -> usize {
    columns
        .iter()
        .flatten()
        .map(|c| (*c).min(MAX_COLUMN_INDEX as usize))
        .collect::<BTreeSet<_>>()
        .len()
}

/// The second and later headings of `level` each open a new column. Those
/// headings stay outside every column; everything else, shallower headings
/// included, takes the current column.
fn split_at_headings(elements: &[SlideElement], level: u8) -> Vec<Option<usize>> {
    let mut column = 0;
    let mut seen = 0;

    elements
        .iter()
        .map(|element| {
            if element.is_heading_level(level) {
                seen += 1;
                if seen > 1 {
                    column += 1;
                }
                None
            } else {
                Some(column)
            }
        })
        .collect()
}

/// Map blank-line separated flow blocks onto elements.
///
/// Each block's first line claims the first unclaimed paragraph, list or
/// blockquote whose content or source starts with that line. Unclaimed
/// text-flow elements follow the previous claimed one; code, images, tables,
/// math, kickers and headings never get a column here.
fn split_at_blank_lines(elements: &[SlideElement], flow_lines: &[String]) -> Vec<Option<usize>> {
    let mut columns: Vec<Option<usize>> = vec![None; elements.len()];

    for (block, first_line) in flow_block_heads(flow_lines).iter().enumerate() {
        let claimed = elements.iter().enumerate().position(|(i, element)| {
            columns[i].is_none()
                && element.element_type.is_text_flow()
                && starts_with_line(element, first_line)
        });
        if let Some(index) = claimed {
            columns[index] = Some(block);
        }
    }

    let mut current = None;
    for (element, column) in elements.iter().zip(columns.iter_mut()) {
        if !element.element_type.is_text_flow() {
            continue;
        }
        match column {
            Some(c) => current = Some(*c),
            None => *column = current,
        }
    }

    columns
}

/// First line of each blank-line separated block, skipping headings
fn flow_block_heads(flow_lines: &[String]) -> Vec<String> {
    let mut heads = Vec::new();
    let mut current: Option<String> = None;
    let mut in_fence = false;

    for line in flow_lines {
        if in_fence {
            if is_code_fence(line) {
                in_fence = false;
            }
            continue;
        }
        if line.is_empty() {
            heads.extend(current.take());
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || parse_heading(trimmed).is_some() {
            continue;
        }
        if is_code_fence(trimmed) {
            in_fence = true;
        }
        if current.is_none() {
            current = Some(trimmed.to_string());
        }
    }
    heads.extend(current);

    heads
}

fn starts_with_line(element: &SlideElement, line: &str) -> bool {
    let raw_first = element.raw.trim().lines().next().unwrap_or("").trim();
    element.first_line() == line || raw_first == line
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidemark_ast::{ImageData, ImageSize};

    fn heading(level: u8, text: &str) -> SlideElement {
        SlideElement::heading(level, text, format!("{} {}", "#".repeat(level as usize), text))
    }

    fn para(text: &str) -> SlideElement {
        SlideElement::paragraph(text, text)
    }

    fn image(src: &str) -> SlideElement {
        let data = ImageData {
            src: src.to_string(),
            alt: None,
            size: ImageSize::Auto,
            is_wiki_link: true,
        };
        SlideElement::image(data, format!("![[{src}]]"))
    }

    fn columns(elements: &[SlideElement]) -> Vec<Option<u8>> {
        elements.iter().map(|e| e.column_index).collect()
    }

    #[test]
    fn test_image_layouts() {
        assert_eq!(detect_layout(&[image("a.png")]), SlideLayout::FullImage);
        assert_eq!(
            detect_layout(&[image("a.png"), image("b.png")]),
            SlideLayout::FullImage
        );
        assert_eq!(
            detect_layout(&[heading(2, "Photo"), image("a.png")]),
            SlideLayout::HalfImage
        );
    }

    #[test]
    fn test_title_and_section() {
        assert_eq!(detect_layout(&[heading(1, "Hello")]), SlideLayout::Title);
        assert_eq!(
            detect_layout(&[heading(2, "Intro"), para("subtitle")]),
            SlideLayout::Title
        );
        assert_eq!(detect_layout(&[heading(3, "Part")]), SlideLayout::Section);
        assert_eq!(
            detect_layout(&[heading(1, "A"), para("b"), para("c")]),
            SlideLayout::Default
        );
        assert_eq!(detect_layout(&[]), SlideLayout::Default);
    }

    #[test]
    fn test_existing_columns_force_default() {
        let elements = [image("a.png").with_column(0)];
        assert_eq!(detect_layout(&elements), SlideLayout::Default);
    }

    #[test]
    fn test_h3_split() {
        let mut elements = vec![
            heading(3, "Pros"),
            para("fast"),
            heading(3, "Cons"),
            para("new"),
        ];
        assert_eq!(detect_columns(&mut elements, &[]), Some("h3-split"));
        assert_eq!(columns(&elements), vec![None, Some(0), None, Some(1)]);
    }

    #[test]
    fn test_h2_split_when_no_h3() {
        let mut elements = vec![
            heading(1, "Title"),
            heading(2, "Left"),
            para("one"),
            heading(2, "Right"),
            para("two"),
        ];
        assert_eq!(detect_columns(&mut elements, &[]), Some("h2-split"));
        assert_eq!(
            columns(&elements),
            vec![Some(0), None, Some(0), None, Some(1)]
        );
    }

    #[test]
    fn test_shallower_heading_takes_current_column() {
        let mut elements = vec![
            heading(1, "Topic"),
            heading(3, "Left"),
            para("one"),
            heading(2, "Aside"),
            heading(3, "Right"),
            para("two"),
        ];
        assert_eq!(detect_columns(&mut elements, &[]), Some("h3-split"));
        assert_eq!(
            columns(&elements),
            vec![Some(0), None, Some(0), Some(0), None, Some(1)]
        );
    }

    #[test]
    fn test_blank_line_blocks() {
        let mut elements = vec![heading(1, "Compare"), para("Left"), para("Right")];
        let flow: Vec<String> = ["# Compare", "\tLeft", "", "\tRight"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(detect_columns(&mut elements, &flow), Some("blank-line-blocks"));
        assert_eq!(columns(&elements), vec![None, Some(0), Some(1)]);
    }

    #[test]
    fn test_columns_clamped_to_three() {
        let mut elements: Vec<SlideElement> =
            ["A", "B", "C", "D", "E"].iter().map(|t| para(t)).collect();
        let flow: Vec<String> = ["\tA", "", "\tB", "", "\tC", "", "\tD", "", "\tE"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        detect_columns(&mut elements, &flow);
        assert_eq!(
            columns(&elements),
            vec![Some(0), Some(1), Some(2), Some(2), Some(2)]
        );
    }

    #[test]
    fn test_single_block_leaves_elements_alone() {
        let mut elements = vec![para("Only")];
        let flow = vec!["\tOnly".to_string()];

        assert_eq!(detect_columns(&mut elements, &flow), None);
        assert_eq!(columns(&elements), vec![None]);
    }

    #[test]
    fn test_fenced_blank_lines_do_not_split() {
        let mut elements = vec![SlideElement::code(None, "a\n\nb", "```\na\n\nb\n```")];
        let flow: Vec<String> = ["\t```", "\ta", "", "\tb", "\t```"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(detect_columns(&mut elements, &flow), None);
    }

    #[test]
    fn test_blank_line_blocks_map_text_flow_only() {
        let mut elements = vec![
            para("Intro text"),
            SlideElement::code(None, "let x = 1;", "```\nlet x = 1;\n```"),
        ];
        let flow: Vec<String> = ["\tIntro text", "", "\t```", "\tlet x = 1;", "\t```"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(detect_columns(&mut elements, &flow), None);
        assert_eq!(columns(&elements), vec![None, None]);
    }

    #[test]
    fn test_image_between_blocks_stays_outside_columns() {
        let mut elements = vec![para("Left"), image("a.png"), para("Right")];
        let flow: Vec<String> = ["\tLeft", "\t![[a.png]]", "", "\tRight"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(detect_columns(&mut elements, &flow), Some("blank-line-blocks"));
        assert_eq!(columns(&elements), vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn test_resolve_respects_no_autocolumn() {
        let mut metadata = SlideMetadata {
            no_autocolumn: true,
            ..Default::default()
        };
        let mut content = ParsedContent {
            elements: vec![heading(3, "A"), para("a"), heading(3, "B"), para("b")],
            ..Default::default()
        };

        resolve_layout(&mut metadata, &mut content, true);
        assert_eq!(metadata.layout, Some(SlideLayout::Default));
        assert!(content.elements.iter().all(|e| e.column_index.is_none()));
    }

    #[test]
    fn test_resolve_skips_columns_for_explicit_layout() {
        let mut metadata = SlideMetadata {
            layout: Some(SlideLayout::Section),
            ..Default::default()
        };
        let mut content = ParsedContent {
            elements: vec![heading(3, "A"), para("a"), heading(3, "B"), para("b")],
            ..Default::default()
        };

        resolve_layout(&mut metadata, &mut content, true);
        assert_eq!(metadata.layout, Some(SlideLayout::Section));
        assert!(content.elements.iter().all(|e| e.column_index.is_none()));
    }

    #[test]
    fn test_resolve_assigns_columns() {
        let mut metadata = SlideMetadata::default();
        let mut content = ParsedContent {
            elements: vec![heading(3, "A"), para("a"), heading(3, "B"), para("b")],
            ..Default::default()
        };

        resolve_layout(&mut metadata, &mut content, true);
        assert_eq!(metadata.layout, Some(SlideLayout::Default));
        assert_eq!(content.elements[3].column_index, Some(1));

        let mut metadata = SlideMetadata::default();
        let mut content = ParsedContent {
            elements: vec![heading(3, "A"), para("a"), heading(3, "B"), para("b")],
            ..Default::default()
        };
        resolve_layout(&mut metadata, &mut content, false);
        assert!(content.elements.iter().all(|e| e.column_index.is_none()));
    }
}
