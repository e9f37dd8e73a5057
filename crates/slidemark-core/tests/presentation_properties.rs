//! Behavioural tests for the presentation parser
//!
//! Each test drives the public `parse` / `parse_presentation` entry points
//! with a small document and checks one observable property of the model.

use slidemark_ast::{ContentMode, ElementType, ImageSize, SlideLayout};
use slidemark_core::frontmatter::{BOOLEAN_KEYS, KNOWN_KEYS};
use slidemark_core::{parse, parse_presentation, ParseOptions};

const TALK: &str = r#"---
title: Rust in Production
theme: aurora
aspectRatio: 16:9
---
^Keynote
# Rust in Production
Welcome everyone, introduce yourself

---

## Why Rust?
	- Memory safety
	- Fearless concurrency
Mention the survey numbers

---

layout: two-column
### Before
	Segfaults
### After
	Sleep at night

---

![[team.jpg|800x600]]

---

```yaml
---
deploy: true
```
"#;

fn kebab_to_camel(key: &str) -> String {
    let mut out = String::new();
    let mut upper = false;
    for ch in key.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[test]
fn test_full_talk() {
    let presentation = parse(TALK);

    assert_eq!(presentation.frontmatter.title.as_deref(), Some("Rust in Production"));
    assert_eq!(presentation.frontmatter.aspect_ratio.as_deref(), Some("16:9"));
    assert_eq!(presentation.slide_count(), 5);

    let intro = &presentation.slides[0];
    assert_eq!(intro.elements[0].element_type, ElementType::Kicker);
    assert_eq!(intro.title(), Some("Rust in Production"));
    assert_eq!(intro.layout(), SlideLayout::Title);
    assert_eq!(intro.notes, vec!["Welcome everyone, introduce yourself"]);

    let why = &presentation.slides[1];
    assert_eq!(why.elements[1].element_type, ElementType::List);
    assert_eq!(why.notes, vec!["Mention the survey numbers"]);

    let columns = &presentation.slides[2];
    assert_eq!(columns.layout(), SlideLayout::TwoColumn);

    let photo = &presentation.slides[3];
    assert_eq!(photo.layout(), SlideLayout::FullImage);

    let code = &presentation.slides[4];
    assert_eq!(code.elements[0].element_type, ElementType::Code);
    assert!(code.elements[0].content.contains("deploy: true"));
}

#[test]
fn test_idempotence() {
    let first = parse(TALK);
    let second = parse(&first.source);
    assert_eq!(first, second);
}

#[test]
fn test_frontmatter_round_trip_for_every_string_key() {
    for key in KNOWN_KEYS {
        if BOOLEAN_KEYS.contains(key) || *key == "content-mode" {
            continue;
        }
        let camel = kebab_to_camel(key);

        for spelling in [key.to_string(), camel.clone()] {
            let presentation = parse(&format!("---\n{spelling}: some-value\n---\n# Slide"));
            let json = serde_json::to_value(&presentation.frontmatter).unwrap();
            assert_eq!(json[&camel], "some-value", "key spelled {spelling}");
        }
    }
}

#[test]
fn test_frontmatter_round_trip_for_boolean_keys() {
    for key in BOOLEAN_KEYS {
        let camel = kebab_to_camel(key);
        for spelling in [key.to_string(), camel.clone()] {
            let presentation = parse(&format!("---\n{spelling}: true\n---\n# Slide"));
            let json = serde_json::to_value(&presentation.frontmatter).unwrap();
            assert_eq!(json[&camel], true, "key spelled {spelling}");
        }
    }
}

#[test]
fn test_fence_safety() {
    let presentation = parse("```markdown\n# Slide one\n---\n# Still slide one\n```");

    assert_eq!(presentation.slide_count(), 1);
    assert_eq!(presentation.slides[0].elements.len(), 1);
    assert_eq!(presentation.slides[0].elements[0].element_type, ElementType::Code);
}

#[test]
fn test_column_cascade_priority() {
    let h3 = parse("# Topic\n### Left\n\tone\n### Right\n\ttwo");
    let h2 = parse("## Left\n\tone\n## Right\n\ttwo");
    let single = parse("### Only\n\tone\n\ttwo\n\tthree");

    assert_eq!(h3.slides[0].column_count(), 2);
    assert_eq!(h2.slides[0].column_count(), 2);
    assert_eq!(single.slides[0].column_count(), 0);
}

#[test]
fn test_column_clamp() {
    let presentation = parse("\tA\n\n\tB\n\n\tC\n\n\tD\n\n\tE");
    let columns: Vec<Option<u8>> = presentation.slides[0]
        .elements
        .iter()
        .map(|e| e.column_index)
        .collect();

    assert_eq!(columns, vec![Some(0), Some(1), Some(2), Some(2), Some(2)]);
}

#[test]
fn test_code_block_does_not_open_a_column() {
    let presentation = parse("\tIntro text\n\n\t```\n\tlet x = 1;\n\t```");
    let slide = &presentation.slides[0];

    let types: Vec<ElementType> = slide.elements.iter().map(|e| e.element_type).collect();
    assert_eq!(types, vec![ElementType::Paragraph, ElementType::Code]);
    assert!(!slide.has_columns());
}

#[test]
fn test_heading_above_split_joins_first_column() {
    let presentation = parse("# Topic\n### Left\n\tone\n### Right\n\ttwo");
    let columns: Vec<Option<u8>> = presentation.slides[0]
        .elements
        .iter()
        .map(|e| e.column_index)
        .collect();

    assert_eq!(columns, vec![Some(0), None, Some(0), None, Some(1)]);
}

#[test]
fn test_indented_blank_line_keeps_one_column() {
    let presentation = parse("\tFirst paragraph\n\t\n\tSame column");
    assert!(!presentation.slides[0].has_columns());
}

#[test]
fn test_no_autocolumn_modifier() {
    let presentation = parse("layout: default no-autocolumn\n### A\n\ta\n### B\n\tb");
    assert!(!presentation.slides[0].has_columns());
}

#[test]
fn test_mode_a_versus_mode_b() {
    let text = "# Title\n\nBody paragraph";

    let notes =
        parse_presentation(text, &ParseOptions::with_content_mode(ContentMode::NotesByDefault));
    let slide = &notes.slides[0];
    assert_eq!(slide.elements.len(), 1);
    assert_eq!(slide.elements[0].element_type, ElementType::Heading);
    assert_eq!(slide.notes, vec!["Body paragraph"]);

    let visible =
        parse_presentation(text, &ParseOptions::with_content_mode(ContentMode::VisibleByDefault));
    let slide = &visible.slides[0];
    let types: Vec<ElementType> = slide.elements.iter().map(|e| e.element_type).collect();
    assert_eq!(types, vec![ElementType::Heading, ElementType::Paragraph]);
    assert!(slide.notes.is_empty());
}

#[test]
fn test_wiki_link_dimension_disambiguation() {
    let presentation = parse("![[img.png|100x200]]\n---\n![[img.png|My Caption]]");

    let sized = presentation.slides[0].elements[0].image_data.as_ref().unwrap();
    assert_eq!(sized.alt, None);
    assert_eq!(
        sized.size,
        ImageSize::Exact {
            width: 100,
            height: 200
        }
    );

    let captioned = presentation.slides[1].elements[0].image_data.as_ref().unwrap();
    assert_eq!(captioned.alt.as_deref(), Some("My Caption"));

    let json = serde_json::to_value(&presentation.slides[0].elements[0]).unwrap();
    assert!(json["imageData"].get("alt").is_none());
}

#[test]
fn test_empty_slide_filtering_preserves_indices() {
    let presentation = parse("# First\n---\n\n---\n# Third");

    assert_eq!(presentation.slide_count(), 2);
    assert_eq!(presentation.slides[0].index, 0);
    assert_eq!(presentation.slides[1].index, 2);

    assert_eq!(presentation.slide_for_segment(1), Some(0));
    assert_eq!(presentation.slide_for_segment(2), Some(1));
}

#[test]
fn test_hidden_slides() {
    let presentation = parse("# Main\n---\nlayout: (hidden)\n# Backup");

    assert_eq!(presentation.slide_count(), 2);
    assert!(presentation.slides[1].is_hidden());
    assert_eq!(presentation.visible_slides().count(), 1);
}

#[test]
fn test_visible_mode_column_layout() {
    let text = "---\ncontent-mode: visible-by-default\n---\nlayout: three-column\n# Plans\n### Free\nBasic\n### Pro\nMore\n### Team\nMost\n\nnotes:\nPricing is final";
    let presentation = parse(text);
    let slide = &presentation.slides[0];

    assert_eq!(slide.layout(), SlideLayout::ThreeColumn);
    assert_eq!(slide.column_count(), 3);
    assert_eq!(slide.notes, vec!["Pricing is final"]);
}

#[test]
fn test_model_serializes_camel_case() {
    let presentation = parse("layout: half-image\nopacity: 50%\n# Cats\n![](cat.png)");
    let json = serde_json::to_value(&presentation).unwrap();

    let slide = &json["slides"][0];
    assert!(slide.get("rawContent").is_some());
    assert_eq!(slide["metadata"]["layout"], "half-image");
    assert_eq!(slide["metadata"]["backgroundOpacity"], 0.5);
    assert_eq!(slide["elements"][1]["imageData"]["isWikiLink"], false);
}
