//! Element and text-run types.

use serde::{Deserialize, Serialize};

/// One top-level structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Structural classification (title, heading, body, other)
    pub kind: ElementKind,

    /// Styled text runs, in document order
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl Element {
    /// Create an element from a kind and its runs.
    pub fn new(kind: ElementKind, runs: Vec<TextRun>) -> Self {
        Self { kind, runs }
    }

    /// Create a title element with plain text.
    pub fn title(text: impl Into<String>) -> Self {
        Self::new(ElementKind::Title, vec![TextRun::new(text)])
    }

    /// Create a heading element. The level is clamped to 1-6.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::new(
            ElementKind::Heading {
                level: level.clamp(1, 6),
            },
            vec![TextRun::new(text)],
        )
    }

    /// Create a body paragraph with plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(ElementKind::BodyParagraph, vec![TextRun::new(text)])
    }

    /// Append a run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs, footnote markers included.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the element carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, ElementKind::Heading { .. })
    }

    /// Get the heading level (1-6) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            ElementKind::Heading { level } => Some(level),
            _ => None,
        }
    }
}

/// Structural kind of an element, derived from the paragraph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// Document title
    Title,
    /// Heading with level 1-6
    Heading {
        /// Heading level
        level: u8,
    },
    /// Normal body text
    BodyParagraph,
    /// Anything else (tables, section breaks, tables of contents)
    Other,
}

impl ElementKind {
    /// Map a Docs API `namedStyleType` to an element kind.
    ///
    /// Unknown styles are treated as body text.
    pub fn from_named_style(style: &str) -> Self {
        match style {
            "TITLE" => ElementKind::Title,
            "SUBTITLE" | "NORMAL_TEXT" => ElementKind::BodyParagraph,
            s => match s
                .strip_prefix("HEADING_")
                .and_then(|n| n.parse::<u8>().ok())
            {
                Some(level) if (1..=6).contains(&level) => ElementKind::Heading { level },
                _ => ElementKind::BodyParagraph,
            },
        }
    }
}

/// A contiguous span of text with optional annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content (for footnote references: the marker glyph)
    pub text: String,

    /// Hyperlink target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Footnote reference id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote_id: Option<String>,

    /// Equation flag
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub equation: bool,
}

impl TextRun {
    /// Create a plain text run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a hyperlinked run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(url.into()),
            ..Default::default()
        }
    }

    /// Create a footnote reference run; `marker` is the in-text glyph.
    pub fn footnote(id: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            text: marker.into(),
            footnote_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Create an equation run.
    pub fn equation(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            equation: true,
            ..Default::default()
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
