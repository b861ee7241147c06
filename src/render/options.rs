//! Rendering options and configuration.

/// Options for rendering a document to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6); deeper headings are clamped
    pub max_heading_level: u8,

    /// Include YAML frontmatter with document metadata
    pub include_frontmatter: bool,

    /// Escape backslashes and underscores inside `$...$` / `$$...$$`
    pub format_latex: bool,

    /// How footnote references become links
    pub footnote_mode: FootnoteMode,

    /// Put a rule after the first level-1 heading when no title precedes it
    pub rule_after_first_heading: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable LaTeX escaping.
    pub fn with_latex(mut self, format: bool) -> Self {
        self.format_latex = format;
        self
    }

    /// Set the footnote mode.
    pub fn with_footnote_mode(mut self, mode: FootnoteMode) -> Self {
        self.footnote_mode = mode;
        self
    }

    /// Enable or disable the rule after a leading level-1 heading.
    pub fn with_rule_after_first_heading(mut self, enable: bool) -> Self {
        self.rule_after_first_heading = enable;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_frontmatter: false,
            format_latex: true,
            footnote_mode: FootnoteMode::Heuristic,
            rule_after_first_heading: false,
        }
    }
}

/// How footnote references are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FootnoteMode {
    /// Link the citing phrase when the reference ends the paragraph,
    /// otherwise link the marker
    #[default]
    Heuristic,
    /// Always link only the marker
    MarkerOnly,
    /// Drop footnote references
    Omit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(3)
            .with_latex(false)
            .with_footnote_mode(FootnoteMode::MarkerOnly);

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 3);
        assert!(!options.format_latex);
        assert_eq!(options.footnote_mode, FootnoteMode::MarkerOnly);
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.max_heading_level, 6);
        assert!(options.format_latex);
        assert!(!options.include_frontmatter);
        assert!(!options.rule_after_first_heading);
        assert_eq!(options.footnote_mode, FootnoteMode::Heuristic);
    }

    #[test]
    fn test_max_heading_clamped() {
        assert_eq!(RenderOptions::new().with_max_heading(0).max_heading_level, 1);
        assert_eq!(RenderOptions::new().with_max_heading(9).max_heading_level, 6);
    }
}
