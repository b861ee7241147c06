//! Input format detection.

use crate::error::{Error, Result};
use serde_json::Value;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A Google Docs API `documents.get` response
    DocsApi,
    /// A serialized [`crate::model::DocumentTree`]
    DocumentTree,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::DocsApi => write!(f, "Google Docs API document"),
            SourceFormat::DocumentTree => write!(f, "document tree"),
        }
    }
}

/// Detect the input format of decoded JSON.
///
/// # Returns
/// * `Ok(SourceFormat::DocsApi)` for objects with a `body` or `tabs` key
/// * `Ok(SourceFormat::DocumentTree)` for objects with an `elements` array
/// * `Err(Error::MissingBody)` for a Docs API response without content
/// * `Err(Error::UnknownFormat)` otherwise
///
/// # Example
/// ```
/// use gdoc2md::detect::{detect_format, SourceFormat};
///
/// let value = serde_json::json!({ "documentId": "abc", "body": { "content": [] } });
/// assert_eq!(detect_format(&value).unwrap(), SourceFormat::DocsApi);
/// ```
pub fn detect_format(value: &Value) -> Result<SourceFormat> {
    let Some(object) = value.as_object() else {
        return Err(Error::UnknownFormat);
    };

    if object.get("body").is_some_and(Value::is_object)
        || object.get("tabs").is_some_and(Value::is_array)
    {
        return Ok(SourceFormat::DocsApi);
    }
    if object.get("elements").is_some_and(Value::is_array) {
        return Ok(SourceFormat::DocumentTree);
    }
    if object.contains_key("documentId") {
        return Err(Error::MissingBody);
    }

    Err(Error::UnknownFormat)
}

/// Detect the input format of JSON text.
pub fn detect_format_from_str(json: &str) -> Result<SourceFormat> {
    let value: Value = serde_json::from_str(json)?;
    detect_format(&value)
}

/// Check if JSON text is a Docs API response.
pub fn is_docs_api(json: &str) -> bool {
    matches!(detect_format_from_str(json), Ok(SourceFormat::DocsApi))
}
