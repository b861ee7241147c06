//! Inline assembly: hyperlinks, equations and footnotes merged into one
//! rendered paragraph string.
//!
//! Every inline construct becomes an edit (a byte range of the normalized
//! text plus its replacement). Edits never overlap; when constructs
//! compete, hyperlinks win over equations and both win over footnote
//! phrases.

use std::ops::Range;

use super::footnote::{resolve_footnotes, FootnoteResolution};
use super::latex::{delimit_equation, escape_latex, find_equations};
use super::normalize::NormalizedText;
use super::options::RenderOptions;
use super::result::ConversionStats;
use crate::model::FootnoteTable;

#[derive(Debug, Clone)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Render one paragraph's inline content to Markdown.
pub fn render_inline(
    norm: &NormalizedText,
    footnotes: &FootnoteTable,
    options: &RenderOptions,
    stats: &mut ConversionStats,
) -> String {
    let text = norm.text.as_str();
    let mut edits: Vec<Edit> = Vec::new();

    for (range, url) in norm.links() {
        edits.push(Edit {
            range: range.clone(),
            replacement: link_markdown(&text[range.clone()], url),
        });
        stats.link_count += 1;
    }

    for range in norm.equations() {
        if overlaps(&edits, range) {
            continue;
        }
        let delimited = delimit_equation(&text[range.clone()]);
        let replacement = if options.format_latex {
            escape_latex(&delimited)
        } else {
            delimited
        };
        edits.push(Edit {
            range: range.clone(),
            replacement,
        });
        stats.equation_count += 1;
    }

    if options.format_latex {
        for range in find_equations(text) {
            if overlaps(&edits, &range) {
                continue;
            }
            let replacement = escape_latex(&text[range.clone()]);
            edits.push(Edit { range, replacement });
            stats.equation_count += 1;
        }
    }

    let reserved: Vec<Range<usize>> = edits.iter().map(|e| e.range.clone()).collect();
    let resolutions = resolve_footnotes(norm, footnotes, &reserved, options.footnote_mode);
    for resolution in resolutions {
        let at = match &resolution {
            FootnoteResolution::Phrase { range, url } => {
                edits.push(Edit {
                    range: range.clone(),
                    replacement: link_markdown(&text[range.clone()], url),
                });
                stats.footnotes_linked += 1;
                continue;
            }
            FootnoteResolution::Marker { at, .. } => {
                stats.footnotes_marker_only += 1;
                *at
            }
            FootnoteResolution::Unresolved { at, .. } => {
                stats.footnotes_unresolved += 1;
                *at
            }
            FootnoteResolution::Omitted => continue,
        };
        let at = insertion_point(&reserved, at);
        edits.push(Edit {
            range: at..at,
            replacement: resolution.marker_markdown().unwrap_or_default(),
        });
    }

    apply_edits(text, edits)
}

/// `[label](url)` with brackets in the label escaped.
fn link_markdown(label: &str, url: &str) -> String {
    let label = label.replace('[', "\\[").replace(']', "\\]");
    format!("[{}]({})", label, url)
}

/// Move an insertion out of any range it would split.
fn insertion_point(reserved: &[Range<usize>], at: usize) -> usize {
    reserved
        .iter()
        .find(|r| r.start < at && at < r.end)
        .map_or(at, |r| r.end)
}

fn overlaps(edits: &[Edit], range: &Range<usize>) -> bool {
    edits
        .iter()
        .any(|e| range.start < e.range.end && e.range.start < range.end)
}

fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    // Stable: insertions at one offset keep document order.
    edits.sort_by_key(|e| (e.range.start, e.range.end));

    let mut out = String::with_capacity(text.len() + edits.len() * 16);
    let mut cursor = 0;
    for edit in edits {
        if edit.range.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}
