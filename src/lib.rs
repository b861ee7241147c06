//! # gdoc2md
//!
//! Convert Google Docs "Deep Research" reports to Markdown.
//!
//! The input is a Google Docs API `documents.get` response (or an already
//! built [`DocumentTree`]). The output is Markdown with headings, inline
//! hyperlinks, footnote citations folded into linked phrases, escaped LaTeX
//! and everything from the "Works Cited" section onward dropped.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gdoc2md::{parse_file, render};
//!
//! fn main() -> gdoc2md::Result<()> {
//!     // Load a saved Docs API response
//!     let doc = parse_file("report.json")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options);
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Redirect cleaning**: `google.com/url?q=...` links point at their target
//! - **Footnote citations**: the cited phrase becomes the link text
//! - **LaTeX escaping**: equations survive Markdown processors
//! - **Truncation**: the bibliography is dropped at "Works Cited"

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format, detect_format_from_str, is_docs_api, SourceFormat};
pub use error::{Error, Result};
pub use model::{
    DocumentTree, Element, ElementKind, FootnoteEntry, FootnoteTable, Metadata, TextRun,
};
pub use parser::DocsParser;
pub use render::{ConversionStats, FootnoteMode, RenderOptions, RenderResult};

use std::io::Read;
use std::path::Path;

/// Parse a JSON file and return a document tree.
///
/// The file may hold a Docs API response or a serialized [`DocumentTree`].
///
/// # Example
///
/// ```no_run
/// use gdoc2md::parse_file;
///
/// let doc = parse_file("report.json").unwrap();
/// println!("Elements: {}", doc.element_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentTree> {
    DocsParser::open(path)?.parse()
}

/// Parse JSON text.
///
/// # Example
///
/// ```
/// use gdoc2md::parse_json;
///
/// let doc = parse_json(r#"{"body": {"content": []}}"#).unwrap();
/// assert!(doc.is_empty());
/// ```
pub fn parse_json(json: &str) -> Result<DocumentTree> {
    DocsParser::from_json(json)?.parse()
}

/// Parse JSON from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<DocumentTree> {
    DocsParser::from_reader(reader)?.parse()
}

/// Convert a document tree to Markdown with default options.
///
/// Conversion never fails; malformed pieces of the tree are skipped.
pub fn to_markdown(doc: &DocumentTree) -> String {
    render::to_markdown(doc, &RenderOptions::default())
}

/// Parse JSON text and convert it to Markdown.
///
/// # Example
///
/// ```
/// use gdoc2md::{json_to_markdown, RenderOptions};
///
/// let json = r#"{
///     "body": { "content": [
///         { "paragraph": {
///             "elements": [ { "textRun": { "content": "Report\n" } } ],
///             "paragraphStyle": { "namedStyleType": "TITLE" }
///         } }
///     ] }
/// }"#;
/// let markdown = json_to_markdown(json, &RenderOptions::default()).unwrap();
/// assert_eq!(markdown, "# Report\n\n---\n");
/// ```
pub fn json_to_markdown(json: &str, options: &RenderOptions) -> Result<String> {
    let doc = parse_json(json)?;
    Ok(render::to_markdown(&doc, options))
}

/// Convert a JSON file to Markdown.
pub fn file_to_markdown<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_markdown(&doc, options))
}

/// Builder for loading and converting documents.
///
/// # Example
///
/// ```no_run
/// use gdoc2md::{FootnoteMode, Gdoc2Md};
///
/// let markdown = Gdoc2Md::new()
///     .with_frontmatter()
///     .with_max_heading(3)
///     .with_footnote_mode(FootnoteMode::MarkerOnly)
///     .parse_file("report.json")?
///     .to_markdown();
/// # Ok::<(), gdoc2md::Error>(())
/// ```
pub struct Gdoc2Md {
    render_options: RenderOptions,
}

impl Gdoc2Md {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
        }
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_max_heading(level);
        self
    }

    /// Set the footnote mode.
    pub fn with_footnote_mode(mut self, mode: FootnoteMode) -> Self {
        self.render_options = self.render_options.with_footnote_mode(mode);
        self
    }

    /// Leave equations unescaped.
    pub fn without_latex(mut self) -> Self {
        self.render_options = self.render_options.with_latex(false);
        self
    }

    /// Put a rule after a leading level-1 heading.
    pub fn with_rule_after_first_heading(mut self) -> Self {
        self.render_options = self.render_options.with_rule_after_first_heading(true);
        self
    }

    /// Parse a JSON file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<ConvertedDocument> {
        let document = parse_file(path)?;
        Ok(self.wrap(document))
    }

    /// Parse JSON text.
    pub fn parse_json(self, json: &str) -> Result<ConvertedDocument> {
        let document = parse_json(json)?;
        Ok(self.wrap(document))
    }

    /// Use an existing document tree.
    pub fn document(self, document: DocumentTree) -> ConvertedDocument {
        self.wrap(document)
    }

    fn wrap(self, document: DocumentTree) -> ConvertedDocument {
        ConvertedDocument {
            document,
            render_options: self.render_options,
        }
    }
}

impl Default for Gdoc2Md {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document paired with its render options.
pub struct ConvertedDocument {
    /// The parsed document
    pub document: DocumentTree,
    /// Render options to use
    render_options: RenderOptions,
}

impl ConvertedDocument {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to Markdown with statistics.
    pub fn to_markdown_with_stats(&self) -> RenderResult {
        render::to_markdown_with_stats(&self.document, &self.render_options)
    }

    /// Get plain text without any Markdown.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &DocumentTree {
        &self.document
    }
}
