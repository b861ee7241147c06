//! Text-run normalization and redirect cleaning.
//!
//! Flattens a paragraph's styled runs into one plain string plus a list of
//! annotation spans over that string. Footnote references contribute no
//! visible text; they become zero-width spans at their insertion point.

use std::ops::Range;

use unicode_normalization::UnicodeNormalization;
use url::Url;

use crate::model::TextRun;

/// Marker used when a footnote reference carries no glyph.
const FALLBACK_MARKER: &str = "*";

/// Inline annotation attached to a span of normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Hyperlink with a redirect-cleaned target
    Link {
        /// Target URL
        url: String,
    },
    /// Footnote reference (always zero-width)
    Footnote {
        /// Footnote id
        id: String,
        /// In-text marker glyph, usually the footnote number
        marker: String,
    },
    /// Equation text, formatted later by the LaTeX pass
    Equation,
}

/// An annotated byte range of [`NormalizedText::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range in the normalized text
    pub range: Range<usize>,
    /// What the range carries
    pub annotation: Annotation,
}

/// Plain paragraph text plus annotation spans, ordered by start offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    /// Visible text with footnote markers removed
    pub text: String,
    /// Annotation spans over `text`
    pub spans: Vec<Span>,
}

impl NormalizedText {
    /// Iterate over hyperlink spans.
    pub fn links(&self) -> impl Iterator<Item = (&Range<usize>, &str)> {
        self.spans.iter().filter_map(|s| match &s.annotation {
            Annotation::Link { url } => Some((&s.range, url.as_str())),
            _ => None,
        })
    }

    /// Iterate over equation spans.
    pub fn equations(&self) -> impl Iterator<Item = &Range<usize>> {
        self.spans
            .iter()
            .filter(|s| s.annotation == Annotation::Equation)
            .map(|s| &s.range)
    }

    /// Iterate over footnote references as `(offset, id, marker)`.
    pub fn footnotes(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.spans.iter().filter_map(|s| match &s.annotation {
            Annotation::Footnote { id, marker } => {
                Some((s.range.start, id.as_str(), marker.as_str()))
            }
            _ => None,
        })
    }
}

/// Flatten runs into plain text and annotation spans.
pub fn normalize_runs(runs: &[TextRun]) -> NormalizedText {
    let mut text = String::new();
    let mut spans: Vec<Span> = Vec::new();

    for run in runs {
        if let Some(ref id) = run.footnote_id {
            let marker = run.text.trim();
            let marker = if marker.is_empty() {
                FALLBACK_MARKER
            } else {
                marker
            };
            spans.push(Span {
                range: text.len()..text.len(),
                annotation: Annotation::Footnote {
                    id: id.clone(),
                    marker: marker.to_string(),
                },
            });
            continue;
        }

        let content = clean_run_text(&run.text);
        if content.is_empty() {
            continue;
        }

        let start = text.len();
        text.push_str(&content);
        let range = start..text.len();

        if run.equation {
            spans.push(Span {
                range,
                annotation: Annotation::Equation,
            });
        } else if let Some(url) = run.link.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            push_link(&mut spans, range, clean_redirect_url(url));
        }
    }

    // The paragraph terminator belongs to the source format, not the text.
    let trimmed_len = text.trim_end_matches(['\n', '\r']).len();
    if trimmed_len < text.len() {
        text.truncate(trimmed_len);
        for span in &mut spans {
            span.range.start = span.range.start.min(trimmed_len);
            span.range.end = span.range.end.min(trimmed_len);
        }
        spans.retain(|s| {
            !s.range.is_empty() || matches!(s.annotation, Annotation::Footnote { .. })
        });
    }

    NormalizedText { text, spans }
}

/// Extend the previous link span when the same target continues.
fn push_link(spans: &mut Vec<Span>, range: Range<usize>, url: String) {
    if let Some(Span {
        range: prev,
        annotation: Annotation::Link { url: prev_url },
    }) = spans.last_mut()
    {
        if prev.end == range.start && *prev_url == url {
            prev.end = range.end;
            return;
        }
    }
    spans.push(Span {
        range,
        annotation: Annotation::Link { url },
    });
}

/// NFC-normalize run text and map Docs soft line breaks to newlines.
fn clean_run_text(text: &str) -> String {
    text.nfc()
        .filter(|c| *c != '\r')
        .map(|c| if c == '\u{000B}' { '\n' } else { c })
        .collect()
}

/// Unwrap Google redirect URLs (`https://www.google.com/url?q=<target>`).
///
/// The `q` or `url` query parameter is decoded and returned. Unwrapping is
/// repeated until the result is no longer a redirect, so the function is
/// idempotent. Anything that is not a redirect is returned unchanged.
pub fn clean_redirect_url(url: &str) -> String {
    let mut current = url.to_string();
    // Each step yields a strict substring-after-decoding, so this terminates.
    while let Some(next) = unwrap_redirect(&current) {
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn unwrap_redirect(url: &str) -> Option<String> {
    if !url.contains("/url?") {
        return None;
    }
    let parsed = Url::parse(url).ok()?;
    if !is_google_host(parsed.host_str()?) || parsed.path() != "/url" {
        return None;
    }
    parsed
        .query_pairs()
        .find(|(key, _)| key == "q" || key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}

/// `google.com`, `www.google.com`, `www.google.co.uk`, ...
fn is_google_host(host: &str) -> bool {
    let host = host.strip_prefix("www.").unwrap_or(host);
    match host.strip_prefix("google.") {
        Some(tld) => {
            !tld.is_empty()
                && tld
                    .split('.')
                    .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphabetic()))
        }
        None => false,
    }
}
