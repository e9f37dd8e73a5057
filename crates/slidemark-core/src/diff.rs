//! Incremental diff engine
//!
//! Compares a fresh [`Presentation`] against a [`PresentationCache`] of the
//! previous render and tells the caller how much of its view needs to be
//! rebuilt. Results are hints: a caller may always ignore them and render
//! everything.
//!
//! # Example
//!
//! ```
//! use slidemark_core::diff::{DiffKind, DiffOutcome, DiffTracker};
//! use slidemark_core::parse;
//!
//! let mut tracker = DiffTracker::default();
//! assert!(tracker.update(&parse("# A\n---\n# B")).is_full_render());
//!
//! match tracker.update(&parse("# A\n---\n# B, edited")) {
//!     DiffOutcome::Incremental(diff) => {
//!         assert_eq!(diff.kind, DiffKind::ContentOnly);
//!         assert_eq!(diff.modified_indices, vec![1]);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use slidemark_ast::{Presentation, Slide, SlideElement, SlideMetadata};
use tracing::{debug, warn};

use crate::error::{Result, SlidemarkError};

/// Default bound on inserted plus removed slides before a full render
pub const DEFAULT_MAX_STRUCTURAL_CHANGES: usize = 3;

/// Opaque `sha256:<hex>` digest of rendering-relevant content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint the canonical JSON encoding of `value`
    pub fn of<T: Serialize + ?Sized>(value: &T) -> Self {
        let encoded = match serde_json::to_vec(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "failed to encode value for fingerprint");
                Vec::new()
            }
        };

        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        let result = hasher.finalize();
        Self(format!(
            "sha256:{}",
            result.iter().map(|b| format!("{:02x}", b)).collect::<String>()
        ))
    }

    /// Get the digest string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parts of a slide that affect rendering. Position and raw text are
/// left out so a slide that only moved keeps its fingerprint.
#[derive(Serialize)]
struct SlideRenderInput<'a> {
    metadata: &'a SlideMetadata,
    elements: &'a [SlideElement],
    notes: &'a [String],
}

/// Fingerprint one slide
pub fn slide_fingerprint(slide: &Slide) -> Fingerprint {
    Fingerprint::of(&SlideRenderInput {
        metadata: &slide.metadata,
        elements: &slide.elements,
        notes: &slide.notes,
    })
}

/// Fingerprints of a rendered presentation.
///
/// Built from a presentation and replaced wholesale; never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationCache {
    frontmatter: Fingerprint,
    slides: Vec<Fingerprint>,
}

impl PresentationCache {
    /// Fingerprint every slide and the frontmatter
    pub fn build(presentation: &Presentation) -> Self {
        Self {
            frontmatter: Fingerprint::of(&presentation.frontmatter),
            slides: presentation.slides.iter().map(slide_fingerprint).collect(),
        }
    }

    /// Number of slides the cache was built from
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn frontmatter(&self) -> &Fingerprint {
        &self.frontmatter
    }

    pub fn slides(&self) -> &[Fingerprint] {
        &self.slides
    }
}

/// Diff tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    /// Largest slide-count change, and largest added plus removed total,
    /// handled incrementally
    pub max_structural_changes: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_structural_changes: DEFAULT_MAX_STRUCTURAL_CHANGES,
        }
    }
}

impl DiffOptions {
    /// Options with a custom threshold; zero is rejected
    pub fn with_max_structural_changes(max_structural_changes: usize) -> Result<Self> {
        if max_structural_changes == 0 {
            return Err(SlidemarkError::invalid_config(
                "max_structural_changes must be at least 1",
            ));
        }
        Ok(Self {
            max_structural_changes,
        })
    }
}

/// Classification of an incremental diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffKind {
    #[default]
    None,
    ContentOnly,
    Structural,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ContentOnly => "content-only",
            Self::Structural => "structural",
        }
    }
}

/// Slides to update, insert and remove
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDiff {
    #[serde(rename = "type")]
    pub kind: DiffKind,
    /// Positions (in the new presentation) whose content changed
    pub modified_indices: Vec<usize>,
    /// Positions in the new presentation with no matching old slide
    pub added_indices: Vec<usize>,
    /// Positions in the old presentation with no matching new slide
    pub removed_indices: Vec<usize>,
}

impl SlideDiff {
    /// Nothing changed
    pub fn none() -> Self {
        Self::default()
    }

    fn content_only(modified_indices: Vec<usize>) -> Self {
        Self {
            kind: DiffKind::ContentOnly,
            modified_indices,
            ..Default::default()
        }
    }

    fn structural(added_indices: Vec<usize>, removed_indices: Vec<usize>) -> Self {
        Self {
            kind: DiffKind::Structural,
            added_indices,
            removed_indices,
            ..Default::default()
        }
    }
}

/// Why the caller must redraw everything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FullRenderReason {
    /// No earlier render to compare against
    NoPreviousRender,
    /// Document settings changed (theme, fonts, colours, ...)
    FrontmatterChanged,
    /// Too many slides inserted or removed to reconcile
    TooManyStructuralChanges,
}

impl fmt::Display for FullRenderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoPreviousRender => "no previous render",
            Self::FrontmatterChanged => "frontmatter changed",
            Self::TooManyStructuralChanges => "too many structural changes",
        };
        f.write_str(text)
    }
}

/// Result of comparing a presentation against the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "render", rename_all = "kebab-case")]
pub enum DiffOutcome {
    /// Skip incremental reconciliation and redraw everything
    #[serde(rename = "full")]
    FullRender { reason: FullRenderReason },
    /// Apply the slide-level diff
    Incremental(SlideDiff),
}

impl DiffOutcome {
    fn full(reason: FullRenderReason) -> Self {
        Self::FullRender { reason }
    }

    pub fn is_full_render(&self) -> bool {
        matches!(self, Self::FullRender { .. })
    }

    /// The slide diff, unless a full render is required
    pub fn slide_diff(&self) -> Option<&SlideDiff> {
        match self {
            Self::Incremental(diff) => Some(diff),
            Self::FullRender { .. } => None,
        }
    }
}

/// Compare a fresh presentation with the cache of the previous render.
///
/// Same slide count gives `content-only` (or `none`). A changed count is
/// aligned by common prefix and suffix; slides in the differing middle are
/// matched by fingerprint. This is a best-effort alignment, not a minimal
/// edit script, and anything beyond `max_structural_changes` falls back to a
/// full render.
pub fn diff_presentations(
    cache: &PresentationCache,
    presentation: &Presentation,
    options: &DiffOptions,
) -> DiffOutcome {
    if Fingerprint::of(&presentation.frontmatter) != cache.frontmatter {
        debug!("frontmatter changed, full render");
        return DiffOutcome::full(FullRenderReason::FrontmatterChanged);
    }

    let old = cache.slides();
    let new: Vec<Fingerprint> = presentation.slides.iter().map(slide_fingerprint).collect();

    if old.len() == new.len() {
        let modified: Vec<usize> = old
            .iter()
            .zip(&new)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();

        debug!(modified = modified.len(), "same slide count");
        if modified.is_empty() {
            return DiffOutcome::Incremental(SlideDiff::none());
        }
        return DiffOutcome::Incremental(SlideDiff::content_only(modified));
    }

    if old.len().abs_diff(new.len()) > options.max_structural_changes {
        debug!(old = old.len(), new = new.len(), "slide count jumped, full render");
        return DiffOutcome::full(FullRenderReason::TooManyStructuralChanges);
    }

    let (added, removed) = align(old, &new);
    if added.len() + removed.len() > options.max_structural_changes {
        debug!(
            added = added.len(),
            removed = removed.len(),
            "alignment too loose, full render"
        );
        return DiffOutcome::full(FullRenderReason::TooManyStructuralChanges);
    }

    debug!(added = ?added, removed = ?removed, "structural change");
    DiffOutcome::Incremental(SlideDiff::structural(added, removed))
}

/// Positional alignment: returns (added new indices, removed old indices)
fn align(old: &[Fingerprint], new: &[Fingerprint]) -> (Vec<usize>, Vec<usize>) {
    let shorter = old.len().min(new.len());

    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(shorter - prefix)
        .take_while(|(a, b)| a == b)
        .count();

    let old_middle = prefix..old.len() - suffix;
    let new_middle = prefix..new.len() - suffix;

    let mut claimed = vec![false; old_middle.len()];
    let mut added = Vec::new();

    for new_index in new_middle {
        let matched = old_middle
            .clone()
            .zip(claimed.iter())
            .position(|(old_index, taken)| !taken && old[old_index] == new[new_index]);
        match matched {
            Some(offset) => claimed[offset] = true,
            None => added.push(new_index),
        }
    }

    let removed = old_middle
        .zip(claimed)
        .filter(|(_, taken)| !taken)
        .map(|(old_index, _)| old_index)
        .collect();

    (added, removed)
}

/// Caller-side helper that keeps the cache of the last render.
///
/// Every update rebuilds the cache from the presentation it was given.
#[derive(Debug, Clone, Default)]
pub struct DiffTracker {
    cache: Option<PresentationCache>,
    options: DiffOptions,
}

impl DiffTracker {
    pub fn new(options: DiffOptions) -> Self {
        Self {
            cache: None,
            options,
        }
    }

    /// Diff against the previous update and remember this presentation
    pub fn update(&mut self, presentation: &Presentation) -> DiffOutcome {
        let outcome = match &self.cache {
            Some(cache) => diff_presentations(cache, presentation, &self.options),
            None => DiffOutcome::full(FullRenderReason::NoPreviousRender),
        };
        self.cache = Some(PresentationCache::build(presentation));
        outcome
    }

    /// Forget the previous render; the next update is a full render
    pub fn reset(&mut self) {
        self.cache = None;
    }

    pub fn cache(&self) -> Option<&PresentationCache> {
        self.cache.as_ref()
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }
}
