//! Footnote resolution: turning footnote references into inline links.
//!
//! Deep Research reports cite sources with footnotes. This module replaces
//! each reference with a Markdown link to the footnote's URL, choosing
//! which words of the host sentence become the link text.
//!
//! # Heuristic
//!
//! A reference sitting at the end of the paragraph's last sentence links
//! the phrase after the last comma of that sentence (or the whole sentence
//! when it has no comma):
//!
//! ```text
//! ...as reported in the study, Nature journal article.[1]
//! ...as reported in the study, [Nature journal article](https://...).
//! ```
//!
//! Any other reference links only its marker (`[^1](https://...)`), so
//! unrelated prose is never attributed to the wrong source. A phrase that
//! would enclose another reference is abandoned the same way. This is a
//! best-effort approximation: abbreviations such as "e.g. " end a sentence
//! as far as the splitter is concerned, and that is accepted.

use std::ops::Range;

use log::debug;

use super::normalize::{clean_redirect_url, NormalizedText};
use super::options::FootnoteMode;
use crate::model::{FootnoteEntry, FootnoteTable};

/// How one footnote reference is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FootnoteResolution {
    /// Wrap `range` of the paragraph text in a link; the marker disappears.
    Phrase {
        /// Byte range of the linked phrase
        range: Range<usize>,
        /// Link target
        url: String,
    },
    /// Insert a link whose text is the marker itself.
    Marker {
        /// Insertion offset
        at: usize,
        /// Marker glyph
        marker: String,
        /// Link target
        url: String,
    },
    /// Insert the bare marker; the footnote has no usable target.
    Unresolved {
        /// Insertion offset
        at: usize,
        /// Marker glyph
        marker: String,
    },
    /// Drop the reference entirely.
    Omitted,
}

impl FootnoteResolution {
    /// Markdown for marker-style resolutions; `None` for phrases and omissions.
    pub fn marker_markdown(&self) -> Option<String> {
        match self {
            FootnoteResolution::Marker { marker, url, .. } => {
                Some(format!("[^{}]({})", marker, url))
            }
            FootnoteResolution::Unresolved { marker, .. } => Some(format!("^{}", marker)),
            _ => None,
        }
    }
}

/// Resolve every footnote reference of one paragraph.
///
/// `reserved` holds ranges already claimed by hyperlinks or equations; a
/// phrase may not overlap them, nor swallow another reference's position.
/// Results are in reference order.
pub fn resolve_footnotes(
    norm: &NormalizedText,
    table: &FootnoteTable,
    reserved: &[Range<usize>],
    mode: FootnoteMode,
) -> Vec<FootnoteResolution> {
    let offsets: Vec<usize> = norm.footnotes().map(|(at, _, _)| at).collect();
    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut out = Vec::new();

    for (at, id, marker) in norm.footnotes() {
        if mode == FootnoteMode::Omit {
            out.push(FootnoteResolution::Omitted);
            continue;
        }

        let entry = table.get(id);
        let url = match entry.and_then(FootnoteEntry::link_target) {
            Some(target) => clean_redirect_url(target),
            None => {
                debug!("footnote {} has no link target, keeping marker {}", id, marker);
                out.push(FootnoteResolution::Unresolved {
                    at,
                    marker: marker.to_string(),
                });
                continue;
            }
        };

        // An empty footnote body has nothing to cite; link the marker.
        let has_body = entry.is_some_and(|e| !e.text.trim().is_empty());
        let phrase = match mode {
            FootnoteMode::Heuristic if has_body => link_phrase(&norm.text, at).filter(|r| {
                !overlaps_any(r, reserved)
                    && !overlaps_any(r, &claimed)
                    && !offsets.iter().any(|&o| r.start < o && o < r.end)
            }),
            _ => None,
        };

        match phrase {
            Some(range) => {
                claimed.push(range.clone());
                out.push(FootnoteResolution::Phrase { range, url });
            }
            None => {
                if mode == FootnoteMode::Heuristic {
                    debug!("footnote {} at offset {}: no phrase, linking marker", id, at);
                }
                out.push(FootnoteResolution::Marker {
                    at,
                    marker: marker.to_string(),
                    url,
                });
            }
        }
    }

    out
}

/// The phrase a reference at byte offset `at` should link, if any.
///
/// Returns `None` when the reference is not at the end of the last sentence
/// or when no non-empty phrase can be isolated.
pub fn link_phrase(text: &str, at: usize) -> Option<Range<usize>> {
    if at > text.len() || !text.is_char_boundary(at) {
        return None;
    }
    if !is_sentence_tail(&text[at..]) {
        return None;
    }

    let body_end = text[..at].trim_end_matches(is_trailing_punct).len();
    let body = &text[..body_end];
    let sentence = split_sentences(body).pop()?;

    let sentence_text = &body[sentence.clone()];
    let phrase_start = match sentence_text.rfind(',') {
        Some(comma) => sentence.start + comma + 1,
        None => sentence.start,
    };

    let raw = &body[phrase_start..sentence.end];
    let lead = raw.len() - raw.trim_start_matches(is_trailing_punct).len();
    let trimmed = raw.trim_matches(is_trailing_punct);
    if trimmed.is_empty() {
        return None;
    }
    let start = phrase_start + lead;
    Some(start..start + trimmed.len())
}

/// Split text into sentence ranges.
///
/// A sentence ends at `.`, `?` or `!` (optionally followed by closing
/// quotes or brackets) when whitespace or the end of the text comes next.
/// Ranges exclude surrounding whitespace; empty sentences are dropped.
pub fn split_sentences(text: &str) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '?' | '!') {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if is_closing(next) || matches!(next, '.' | '?' | '!') {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let at_boundary = match chars.peek() {
            None => true,
            Some(&(_, next)) => next.is_whitespace(),
        };
        if at_boundary {
            push_trimmed(&mut sentences, text, start..end);
            start = end;
        }
    }
    push_trimmed(&mut sentences, text, start..text.len());
    sentences
}

fn push_trimmed(out: &mut Vec<Range<usize>>, text: &str, range: Range<usize>) {
    let slice = &text[range.clone()];
    let lead = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        let start = range.start + lead;
        out.push(start..start + trimmed.len());
    }
}

/// Only whitespace, terminal punctuation or closing marks remain.
fn is_sentence_tail(rest: &str) -> bool {
    rest.chars()
        .all(|c| c.is_whitespace() || is_trailing_punct(c) || is_closing(c))
}

fn is_trailing_punct(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

fn overlaps_any(range: &Range<usize>, others: &[Range<usize>]) -> bool {
    others
        .iter()
        .any(|o| range.start < o.end && o.start < range.end)
}
