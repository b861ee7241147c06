//! Document loader for Docs API responses and serialized document trees.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use crate::detect::{detect_format, SourceFormat};
use crate::error::Result;
use crate::model::{DocumentTree, Element, FootnoteTable, Metadata};

use super::gdocs::convert_api_document;

/// Document parser.
///
/// Holds the decoded JSON until [`DocsParser::parse`] builds the tree, so the
/// detected format can be inspected first.
pub struct DocsParser {
    value: Value,
    format: SourceFormat,
}

impl DocsParser {
    /// Open a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Parse from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        Self::from_json(&data)
    }

    /// Wrap an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let format = detect_format(&value)?;
        debug!("detected input format: {}", format);
        Ok(Self { value, format })
    }

    /// The detected input format.
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Build the document tree.
    pub fn parse(self) -> Result<DocumentTree> {
        match self.format {
            SourceFormat::DocsApi => convert_api_document(self.value),
            SourceFormat::DocumentTree => Ok(decode_tree(self.value)),
        }
    }
}

/// Decode a serialized [`DocumentTree`] element by element.
fn decode_tree(mut value: Value) -> DocumentTree {
    let mut doc = DocumentTree::new();

    if let Some(metadata) = value.get_mut("metadata").map(Value::take) {
        match serde_json::from_value::<Metadata>(metadata) {
            Ok(m) => doc.metadata = m,
            Err(e) => warn!("ignoring malformed metadata: {}", e),
        }
    }

    if let Some(footnotes) = value.get_mut("footnotes").map(Value::take) {
        match serde_json::from_value::<FootnoteTable>(footnotes) {
            Ok(f) => doc.footnotes = f,
            Err(e) => warn!("ignoring malformed footnote table: {}", e),
        }
    }

    if let Some(Value::Array(elements)) = value.get_mut("elements").map(Value::take) {
        for (index, raw) in elements.into_iter().enumerate() {
            match serde_json::from_value::<Element>(raw) {
                Ok(el) => doc.add_element(el),
                Err(e) => warn!("skipping malformed element {}: {}", index, e),
            }
        }
    }

    doc
}
