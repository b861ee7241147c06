//! Markdown emission for walked documents.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::model::DocumentTree;

use super::walker::{normalize_for_match, walk, ParagraphRecord, RecordKind};
use super::{ConversionStats, RenderOptions, RenderResult};

/// Paragraph text that gets a rule inserted before it.
pub const TRAILER_MARKER: &str = "end of report";

const RULE: &str = "---";

/// Two or more blank (or whitespace-only) lines.
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap());

/// Convert a document to Markdown.
pub fn to_markdown(doc: &DocumentTree, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &DocumentTree, options: &RenderOptions) -> RenderResult {
    MarkdownRenderer::new(options.clone()).render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &DocumentTree) -> String {
        self.render_internal(doc).0
    }

    /// Render a document to Markdown with conversion statistics.
    pub fn render_with_stats(&self, doc: &DocumentTree) -> RenderResult {
        let (content, mut stats) = self.render_internal(doc);
        stats.count_words(&content);
        RenderResult::new(content, doc.metadata.clone(), stats)
    }

    fn render_internal(&self, doc: &DocumentTree) -> (String, ConversionStats) {
        let outcome = walk(doc, &self.options);
        if outcome.truncated {
            debug!(
                "truncated after {} of {} elements",
                outcome.stats.element_count,
                doc.element_count()
            );
        }

        let mut output = String::new();
        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
            output.push('\n');
        }
        output.push_str(&self.emit(&outcome.records));

        (finish(&output), outcome.stats)
    }

    /// Render records to Markdown blocks joined by blank lines.
    pub fn emit(&self, records: &[ParagraphRecord]) -> String {
        let mut blocks: Vec<String> = Vec::with_capacity(records.len() + 2);
        let mut seen_title = false;
        let mut heading_rule_done = false;

        for record in records {
            if record.is_blank() {
                continue;
            }
            let text = record.rendered_text.trim();

            match record.kind {
                RecordKind::Title => {
                    blocks.push(format!("# {}", single_line(text)));
                    blocks.push(RULE.to_string());
                    seen_title = true;
                }
                RecordKind::Heading(level) => {
                    let level = level.clamp(1, self.options.max_heading_level.max(1));
                    blocks.push(format!("{} {}", "#".repeat(level as usize), single_line(text)));

                    if self.options.rule_after_first_heading
                        && level == 1
                        && !seen_title
                        && !heading_rule_done
                    {
                        blocks.push(RULE.to_string());
                        heading_rule_done = true;
                    }
                }
                RecordKind::Body => {
                    if is_trailer_marker(text) {
                        push_rule(&mut blocks);
                    }
                    blocks.push(text.to_string());
                }
                RecordKind::Skip => {}
            }
        }

        blocks.join("\n\n")
    }
}

fn push_rule(blocks: &mut Vec<String>) {
    if blocks.last().map(String::as_str) != Some(RULE) {
        blocks.push(RULE.to_string());
    }
}

/// Check if text is the "End of Report" marker.
pub fn is_trailer_marker(text: &str) -> bool {
    normalize_for_match(text) == TRAILER_MARKER
}

/// Headings must stay on one line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse blank-line runs and end with exactly one newline.
pub fn finish(markdown: &str) -> String {
    let collapsed = BLANK_LINES_RE.replace_all(markdown, "\n\n");
    let mut out = collapsed.trim_end().to_string();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, Metadata};

    fn render(elements: Vec<Element>) -> String {
        to_markdown(&DocumentTree::from_elements(elements), &RenderOptions::default())
    }

    #[test]
    fn test_render_title_heading_body() {
        let md = render(vec![
            Element::title("Report"),
            Element::heading("Section", 1),
            Element::paragraph("text."),
        ]);
        assert_eq!(md, "# Report\n\n---\n\n# Section\n\ntext.\n");
    }

    #[test]
    fn test_render_stops_at_works_cited() {
        let md = render(vec![
            Element::title("Report"),
            Element::heading("Section", 1),
            Element::paragraph("text."),
            Element::heading("Works Cited", 1),
            Element::paragraph("ref1."),
        ]);
        assert_eq!(md, "# Report\n\n---\n\n# Section\n\ntext.\n");
    }

    #[test]
    fn test_heading_levels() {
        let md = render(vec![
            Element::heading("Two", 2),
            Element::heading("Six", 6),
        ]);
        assert_eq!(md, "## Two\n\n###### Six\n");
    }

    #[test]
    fn test_max_heading_clamps() {
        let doc = DocumentTree::from_elements(vec![Element::heading("Deep", 5)]);
        let md = to_markdown(&doc, &RenderOptions::new().with_max_heading(3));
        assert_eq!(md, "### Deep\n");
    }

    #[test]
    fn test_blank_records_collapse() {
        let md = render(vec![
            Element::paragraph("One."),
            Element::paragraph(""),
            Element::paragraph("   "),
            Element::paragraph("\n"),
            Element::paragraph("Two."),
        ]);
        assert_eq!(md, "One.\n\nTwo.\n");
    }

    #[test]
    fn test_soft_breaks_inside_paragraph_collapse() {
        let md = render(vec![Element::paragraph("a\u{000B}\u{000B}\u{000B}\u{000B}b")]);
        assert_eq!(md, "a\n\nb\n");
    }

    #[test]
    fn test_end_of_report_gets_rule() {
        let md = render(vec![
            Element::paragraph("Conclusion."),
            Element::paragraph("End of Report"),
        ]);
        assert_eq!(md, "Conclusion.\n\n---\n\nEnd of Report\n");
    }

    #[test]
    fn test_end_of_report_heading_has_no_rule() {
        let md = render(vec![
            Element::paragraph("Conclusion."),
            Element::heading("End of Report", 2),
        ]);
        assert_eq!(md, "Conclusion.\n\n## End of Report\n");
    }

    #[test]
    fn test_end_of_report_after_title_rule_not_doubled() {
        let md = render(vec![Element::title("T"), Element::paragraph("End of report.")]);
        assert_eq!(md, "# T\n\n---\n\nEnd of report.\n");
    }

    #[test]
    fn test_rule_after_first_heading_option() {
        let doc = DocumentTree::from_elements(vec![
            Element::heading("Main", 1),
            Element::paragraph("Body."),
            Element::heading("Next", 1),
        ]);
        let md = to_markdown(&doc, &RenderOptions::new().with_rule_after_first_heading(true));
        assert_eq!(md, "# Main\n\n---\n\nBody.\n\n# Next\n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render(vec![]), "\n");
    }

    #[test]
    fn test_render_with_frontmatter() {
        let mut doc = DocumentTree::from_elements(vec![Element::paragraph("Body.")]);
        doc.metadata = Metadata::with_title("Test Doc");

        let md = to_markdown(&doc, &RenderOptions::new().with_frontmatter(true));
        assert_eq!(md, "---\ntitle: \"Test Doc\"\n---\n\nBody.\n");
    }

    #[test]
    fn test_render_with_stats() {
        let doc = DocumentTree::from_elements(vec![
            Element::title("Report"),
            Element::paragraph("Some words here."),
            Element::heading("Works Cited", 1),
        ]);
        let result = to_markdown_with_stats(&doc, &RenderOptions::default());
        assert!(result.stats.truncated);
        assert_eq!(result.stats.title_count, 1);
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.content, "# Report\n\n---\n\nSome words here.\n");
        assert_eq!(result.stats.word_count, 6);
    }
}
