//! Input parsing module.
//!
//! Turns Google Docs API JSON (or a serialized [`crate::model::DocumentTree`])
//! into the document model.

mod docs_parser;
mod gdocs;

pub use docs_parser::DocsParser;
pub use gdocs::convert_api_document;
