//! Document model types for Google Docs content representation.
//!
//! This module defines the intermediate representation (IR) that bridges
//! Docs API ingestion and Markdown rendering. The model is read-only input to
//! the conversion pipeline and can be built by hand, deserialized from JSON,
//! or produced from a Docs API response by [`crate::parser`].

mod document;
mod element;

pub use document::{DocumentTree, FootnoteEntry, FootnoteTable, Metadata};
pub use element::{Element, ElementKind, TextRun};
