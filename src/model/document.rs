//! Document-level types.

use super::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fetched Google Docs document, ready for conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Document metadata (title, ids)
    #[serde(default)]
    pub metadata: Metadata,

    /// Top-level elements in document order
    pub elements: Vec<Element>,

    /// Footnote definitions keyed by footnote id
    #[serde(default)]
    pub footnotes: FootnoteTable,
}

impl DocumentTree {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from elements, without footnotes.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Default::default()
        }
    }

    /// Add an element to the document.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Builder-style footnote registration.
    pub fn with_footnote(mut self, id: impl Into<String>, entry: FootnoteEntry) -> Self {
        self.footnotes.insert(id, entry);
        self
    }

    /// Get the number of top-level elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has any elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(|el| el.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title as reported by the Docs API
    pub title: Option<String>,

    /// Google Docs document id
    pub document_id: Option<String>,

    /// Revision the content was read at
    pub revision_id: Option<String>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref id) = self.document_id {
            lines.push(format!("document_id: \"{}\"", escape_yaml(id)));
            lines.push(format!(
                "source: \"https://docs.google.com/document/d/{}\"",
                escape_yaml(id)
            ));
        }
        if let Some(ref rev) = self.revision_id {
            lines.push(format!("revision_id: \"{}\"", escape_yaml(rev)));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// One footnote definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootnoteEntry {
    /// Visible footnote body text (usually a citation or bare URL)
    pub text: String,

    /// First hyperlink found in the footnote body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FootnoteEntry {
    /// Create an entry from body text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
        }
    }

    /// Create an entry with body text and a link.
    pub fn linked(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
        }
    }

    /// The raw link target: the explicit URL, else the body text when it is
    /// itself an `http(s)` URL.
    pub fn link_target(&self) -> Option<&str> {
        if let Some(url) = self.url.as_deref().map(str::trim) {
            if !url.is_empty() {
                return Some(url);
            }
        }
        let text = self.text.trim();
        let is_url = (text.starts_with("http://") || text.starts_with("https://"))
            && !text.contains(char::is_whitespace);
        is_url.then_some(text)
    }
}

/// Mapping from footnote id to its definition.
///
/// Built once per document before emission; the pipeline only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootnoteTable {
    entries: HashMap<String, FootnoteEntry>,
}

impl FootnoteTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a footnote definition.
    pub fn insert(&mut self, id: impl Into<String>, entry: FootnoteEntry) {
        self.entries.insert(id.into(), entry);
    }

    /// Get a footnote definition by id.
    pub fn get(&self, id: &str) -> Option<&FootnoteEntry> {
        self.entries.get(id)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(id, entry)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FootnoteEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, FootnoteEntry)> for FootnoteTable {
    fn from_iter<I: IntoIterator<Item = (K, FootnoteEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
