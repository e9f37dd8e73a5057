//! slidemark-wasm - WebAssembly bindings for slidemark
//!
//! This crate exposes the parser and the incremental diff engine to a
//! JavaScript host such as an editor with a live preview:
//!
//! ```js
//! import { parse, PreviewSession } from "slidemark-wasm";
//!
//! const deck = parse(text, "visible-by-default");
//!
//! const session = new PreviewSession();
//! const { presentation, diff } = session.update(text);
//! if (diff.render === "full") redrawAll(presentation);
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use slidemark_ast::Presentation;
use slidemark_core::{
    parse_content_mode, parse_presentation, DiffOptions, DiffOutcome, DiffTracker, ParseOptions,
    SlidemarkError,
};

/// Returns the current version of slidemark
#[wasm_bindgen]
pub fn version() -> String {
    slidemark_core::VERSION.to_string()
}

/// Parse a presentation into a plain JS object.
///
/// `mode` is the default content mode (`notes-by-default` or
/// `visible-by-default`); a `content-mode` frontmatter key still wins.
#[wasm_bindgen]
pub fn parse(text: &str, mode: Option<String>) -> Result<JsValue, JsValue> {
    let options = parse_options(mode.as_deref()).map_err(to_js_error)?;
    to_js(&parse_presentation(text, &options))
}

/// Result of one preview update
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewUpdate<'a> {
    presentation: &'a Presentation,
    diff: &'a DiffOutcome,
}

/// Keeps the fingerprints of the last render between editor updates
#[wasm_bindgen]
pub struct PreviewSession {
    options: ParseOptions,
    tracker: DiffTracker,
}

#[wasm_bindgen]
impl PreviewSession {
    /// Start a session; the first update always asks for a full render
    #[wasm_bindgen(constructor)]
    pub fn new(
        mode: Option<String>,
        max_structural_changes: Option<usize>,
    ) -> Result<PreviewSession, JsValue> {
        let options = parse_options(mode.as_deref()).map_err(to_js_error)?;
        let diff_options = diff_options(max_structural_changes).map_err(to_js_error)?;

        Ok(Self {
            options,
            tracker: DiffTracker::new(diff_options),
        })
    }

    /// Parse the new text and classify it against the previous update
    pub fn update(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let (presentation, diff) = self.apply(text);
        to_js(&PreviewUpdate {
            presentation: &presentation,
            diff: &diff,
        })
    }

    /// Forget the previous render
    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}

impl PreviewSession {
    fn apply(&mut self, text: &str) -> (Presentation, DiffOutcome) {
        let presentation = parse_presentation(text, &self.options);
        let diff = self.tracker.update(&presentation);
        (presentation, diff)
    }
}

fn parse_options(mode: Option<&str>) -> Result<ParseOptions, SlidemarkError> {
    match mode {
        Some(mode) => Ok(ParseOptions::with_content_mode(parse_content_mode(mode)?)),
        None => Ok(ParseOptions::default()),
    }
}

fn diff_options(max_structural_changes: Option<usize>) -> Result<DiffOptions, SlidemarkError> {
    match max_structural_changes {
        Some(max) => DiffOptions::with_max_structural_changes(max),
        None => Ok(DiffOptions::default()),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(err: SlidemarkError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", err.code(), err))
}
