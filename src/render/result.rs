//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ConversionStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }
}

/// Statistics collected while walking and rendering a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Elements visited before the walk stopped
    pub element_count: u32,

    /// Title records produced
    pub title_count: u32,

    /// Heading records produced
    pub heading_count: u32,

    /// Non-empty body paragraphs produced
    pub paragraph_count: u32,

    /// Elements skipped (non-text or malformed)
    pub skipped_count: u32,

    /// Footnotes rendered as a linked phrase
    pub footnotes_linked: u32,

    /// Footnotes rendered as a linked marker
    pub footnotes_marker_only: u32,

    /// Footnotes without a usable target
    pub footnotes_unresolved: u32,

    /// Equation spans formatted
    pub equation_count: u32,

    /// Inline hyperlinks rendered
    pub link_count: u32,

    /// Whether the walk stopped at "Works Cited"
    pub truncated: bool,

    /// Approximate word count of the output
    pub word_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total footnote references seen.
    pub fn footnote_count(&self) -> u32 {
        self.footnotes_linked + self.footnotes_marker_only + self.footnotes_unresolved
    }

    /// Add the word count of rendered text.
    pub fn count_words(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        let mut stats = ConversionStats::new();
        stats.count_words("# Title\n\nHello, world! This is a test.");
        assert_eq!(stats.word_count, 8);
    }

    #[test]
    fn test_footnote_count() {
        let stats = ConversionStats {
            footnotes_linked: 2,
            footnotes_marker_only: 1,
            footnotes_unresolved: 1,
            ..Default::default()
        };
        assert_eq!(stats.footnote_count(), 4);
    }
}
