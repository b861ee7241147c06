//! Conversion pipeline from document tree to Markdown.
//!
//! Data flows one way: the [`walker`] visits elements and, for each one,
//! runs the [`normalize`]r, the LaTeX pass ([`latex`]) and the [`footnote`]
//! resolver through [`inline`] assembly; the [`markdown`] emitter turns the
//! resulting records into text. Every stage is a pure function of its input.

pub mod footnote;
pub mod inline;
pub mod latex;
mod markdown;
pub mod normalize;
mod options;
mod result;
pub mod walker;

pub use footnote::{link_phrase, resolve_footnotes, split_sentences, FootnoteResolution};
pub use latex::{escape_latex, find_equations, format_latex};
pub use markdown::{finish, is_trailer_marker, to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use normalize::{clean_redirect_url, normalize_runs, Annotation, NormalizedText, Span};
pub use options::{FootnoteMode, RenderOptions};
pub use result::{ConversionStats, RenderResult};
pub use walker::{
    is_truncation_marker, walk, ParagraphRecord, RecordKind, WalkOutcome, WalkState, Walker,
};
