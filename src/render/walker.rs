//! Structural walk over a document's top-level elements.
//!
//! The walker is a two-state machine. It starts in [`WalkState::Scanning`]
//! and produces one [`ParagraphRecord`] per element. The first element whose
//! normalized text reads "works cited" moves it to [`WalkState::Truncated`],
//! which is terminal: that element and everything after it are dropped.

use log::{debug, warn};

use super::inline::render_inline;
use super::normalize::normalize_runs;
use super::options::RenderOptions;
use super::result::ConversionStats;
use crate::model::{DocumentTree, Element, ElementKind};

/// Heading text that ends the conversion.
pub const TRUNCATION_MARKER: &str = "works cited";

/// Walker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkState {
    /// Converting elements
    #[default]
    Scanning,
    /// Saw the truncation marker; nothing more is converted
    Truncated,
}

/// Kind of a rendered paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Document title
    Title,
    /// Heading with level 1-6
    Heading(u8),
    /// Body text
    Body,
    /// Produces no output
    Skip,
}

/// One walked element, ready for the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphRecord {
    /// Record kind
    pub kind: RecordKind,
    /// Inline-rendered Markdown text (no block prefix)
    pub rendered_text: String,
}

impl ParagraphRecord {
    /// Create a record.
    pub fn new(kind: RecordKind, rendered_text: impl Into<String>) -> Self {
        Self {
            kind,
            rendered_text: rendered_text.into(),
        }
    }

    /// A record that renders nothing.
    pub fn skip() -> Self {
        Self::new(RecordKind::Skip, String::new())
    }

    /// Check if the record renders no visible text.
    pub fn is_blank(&self) -> bool {
        self.kind == RecordKind::Skip || self.rendered_text.trim().is_empty()
    }
}

/// Output of a walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Records in document order
    pub records: Vec<ParagraphRecord>,
    /// Whether the walk stopped at the truncation marker
    pub truncated: bool,
    /// Counters gathered during the walk
    pub stats: ConversionStats,
}

/// Walks a document and produces paragraph records.
pub struct Walker<'a> {
    doc: &'a DocumentTree,
    options: &'a RenderOptions,
    state: WalkState,
    stats: ConversionStats,
}

impl<'a> Walker<'a> {
    /// Create a walker over `doc`.
    pub fn new(doc: &'a DocumentTree, options: &'a RenderOptions) -> Self {
        Self {
            doc,
            options,
            state: WalkState::Scanning,
            stats: ConversionStats::new(),
        }
    }

    /// Walk every element until the end or the truncation marker.
    pub fn walk(mut self) -> WalkOutcome {
        let mut records = Vec::with_capacity(self.doc.elements.len());

        for element in &self.doc.elements {
            match self.step(element) {
                Some(record) => records.push(record),
                None => break,
            }
        }

        self.stats.truncated = self.state == WalkState::Truncated;
        WalkOutcome {
            records,
            truncated: self.stats.truncated,
            stats: self.stats,
        }
    }

    /// Process one element. Returns `None` once truncated.
    fn step(&mut self, element: &Element) -> Option<ParagraphRecord> {
        if self.state == WalkState::Truncated {
            return None;
        }

        let norm = normalize_runs(&element.runs);
        if is_truncation_marker(&norm.text) {
            debug!("reached \"{}\", stopping", norm.text.trim());
            self.state = WalkState::Truncated;
            return None;
        }
        self.stats.element_count += 1;

        let kind = match element.kind {
            ElementKind::Title => RecordKind::Title,
            ElementKind::Heading { level } if (1..=6).contains(&level) => {
                RecordKind::Heading(level)
            }
            ElementKind::Heading { level } => {
                warn!("skipping heading with invalid level {}", level);
                self.stats.skipped_count += 1;
                return Some(ParagraphRecord::skip());
            }
            ElementKind::BodyParagraph => RecordKind::Body,
            ElementKind::Other => {
                self.stats.skipped_count += 1;
                return Some(ParagraphRecord::skip());
            }
        };

        let rendered = render_inline(&norm, &self.doc.footnotes, self.options, &mut self.stats);
        let rendered = rendered.trim().to_string();

        if !rendered.is_empty() {
            match kind {
                RecordKind::Title => self.stats.title_count += 1,
                RecordKind::Heading(_) => self.stats.heading_count += 1,
                RecordKind::Body => self.stats.paragraph_count += 1,
                RecordKind::Skip => {}
            }
        }

        Some(ParagraphRecord::new(kind, rendered))
    }
}

/// Walk `doc` with `options`.
pub fn walk(doc: &DocumentTree, options: &RenderOptions) -> WalkOutcome {
    Walker::new(doc, options).walk()
}

/// Lowercase, keep only alphanumeric words, single-space separated.
pub fn normalize_for_match(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if text is the "Works Cited" marker (case- and punctuation-insensitive).
pub fn is_truncation_marker(text: &str) -> bool {
    normalize_for_match(text) == TRUNCATION_MARKER
}
