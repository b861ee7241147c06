//! Google Docs API response decoding.
//!
//! Only the fields the converter reads are modelled. Structural elements,
//! paragraph elements and footnotes are decoded one at a time from raw JSON
//! values, so a single malformed entry is skipped instead of failing the
//! whole document.

use std::collections::HashMap;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{
    DocumentTree, Element, ElementKind, FootnoteEntry, FootnoteTable, Metadata, TextRun,
};
use crate::render::clean_redirect_url;

/// Style used when a paragraph carries no `namedStyleType`.
const DEFAULT_STYLE: &str = "NORMAL_TEXT";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDocument {
    #[serde(default)]
    document_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    revision_id: Option<String>,
    #[serde(default)]
    body: Option<ApiBody>,
    #[serde(default)]
    footnotes: HashMap<String, Value>,
    #[serde(default)]
    tabs: Vec<ApiTab>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiBody {
    #[serde(default)]
    content: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiFootnote {
    #[serde(default)]
    content: Vec<Value>,
}

/// A document tab (documents fetched with `includeTabsContent=true`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTab {
    #[serde(default)]
    document_tab: Option<ApiDocumentTab>,
    #[serde(default)]
    child_tabs: Vec<ApiTab>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiDocumentTab {
    #[serde(default)]
    body: Option<ApiBody>,
    #[serde(default)]
    footnotes: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiStructuralElement {
    paragraph: Option<ApiParagraph>,
    table: Option<Value>,
    section_break: Option<Value>,
    table_of_contents: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiParagraph {
    #[serde(default)]
    elements: Vec<Value>,
    #[serde(default)]
    paragraph_style: Option<ApiParagraphStyle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiParagraphStyle {
    named_style_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiParagraphElement {
    text_run: Option<ApiTextRun>,
    footnote_reference: Option<ApiFootnoteReference>,
    rich_link: Option<ApiRichLink>,
    person: Option<ApiPerson>,
    equation: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTextRun {
    content: Option<String>,
    #[serde(default)]
    text_style: Option<ApiTextStyle>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiTextStyle {
    link: Option<ApiLink>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiLink {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFootnoteReference {
    footnote_id: Option<String>,
    footnote_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRichLink {
    rich_link_properties: Option<ApiRichLinkProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiRichLinkProperties {
    title: Option<String>,
    uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPerson {
    person_properties: Option<ApiPersonProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiPersonProperties {
    name: Option<String>,
    email: Option<String>,
}

/// Convert a Docs API `documents.get` response into a document tree.
///
/// Documents fetched with tabs content carry their body inside the first
/// tab instead of at the top level; both shapes are accepted.
pub fn convert_api_document(value: Value) -> Result<DocumentTree> {
    let api: ApiDocument = serde_json::from_value(value)?;

    let metadata = Metadata {
        title: api.title,
        document_id: api.document_id,
        revision_id: api.revision_id,
    };

    let (body, footnotes) = match api.body {
        Some(body) => (body, api.footnotes),
        None => first_tab(api.tabs).ok_or(Error::MissingBody)?,
    };

    let mut doc = DocumentTree::new();
    doc.metadata = metadata;
    doc.elements = convert_content(&body.content);
    doc.footnotes = build_footnote_table(&footnotes);

    debug!(
        "decoded {} elements and {} footnotes",
        doc.element_count(),
        doc.footnotes.len()
    );
    Ok(doc)
}

/// Depth-first search for the first tab that carries a body.
fn first_tab(tabs: Vec<ApiTab>) -> Option<(ApiBody, HashMap<String, Value>)> {
    for tab in tabs {
        if let Some(ApiDocumentTab {
            body: Some(body),
            footnotes,
        }) = tab.document_tab
        {
            return Some((body, footnotes));
        }
        if let Some(found) = first_tab(tab.child_tabs) {
            return Some(found);
        }
    }
    None
}

/// Decode a list of structural elements, skipping malformed entries.
fn convert_content(content: &[Value]) -> Vec<Element> {
    let mut elements = Vec::with_capacity(content.len());

    for (index, raw) in content.iter().enumerate() {
        let structural: ApiStructuralElement = match serde_json::from_value(raw.clone()) {
            Ok(s) => s,
            Err(e) => {
                warn!("skipping malformed element {}: {}", index, e);
                continue;
            }
        };

        if let Some(paragraph) = structural.paragraph {
            elements.push(convert_paragraph(&paragraph));
        } else if structural.table.is_some()
            || structural.section_break.is_some()
            || structural.table_of_contents.is_some()
        {
            elements.push(Element::new(ElementKind::Other, Vec::new()));
        } else {
            warn!("skipping element {} with no known content", index);
        }
    }

    elements
}

fn convert_paragraph(paragraph: &ApiParagraph) -> Element {
    let style = paragraph
        .paragraph_style
        .as_ref()
        .and_then(|s| s.named_style_type.as_deref())
        .unwrap_or(DEFAULT_STYLE);

    let mut element = Element::new(ElementKind::from_named_style(style), Vec::new());
    for (index, raw) in paragraph.elements.iter().enumerate() {
        if let Some(run) = convert_paragraph_element(index, raw) {
            element.add_run(run);
        }
    }
    element
}

fn convert_paragraph_element(index: usize, raw: &Value) -> Option<TextRun> {
    let element: ApiParagraphElement = match serde_json::from_value(raw.clone()) {
        Ok(e) => e,
        Err(e) => {
            warn!("skipping malformed paragraph element {}: {}", index, e);
            return None;
        }
    };

    if let Some(run) = element.text_run {
        let Some(content) = run.content else {
            warn!("skipping text run {} without content", index);
            return None;
        };
        let link = run
            .text_style
            .and_then(|s| s.link)
            .and_then(|l| l.url)
            .filter(|u| !u.trim().is_empty());
        return Some(match link {
            Some(url) => TextRun::link(content, url),
            None => TextRun::new(content),
        });
    }

    if let Some(reference) = element.footnote_reference {
        let Some(id) = reference.footnote_id else {
            warn!("skipping footnote reference {} without id", index);
            return None;
        };
        return Some(TextRun::footnote(
            id,
            reference.footnote_number.unwrap_or_default(),
        ));
    }

    if let Some(props) = element.rich_link.and_then(|r| r.rich_link_properties) {
        let uri = props.uri.filter(|u| !u.trim().is_empty())?;
        let title = props.title.unwrap_or_else(|| uri.clone());
        return Some(TextRun::link(title, uri));
    }

    if let Some(props) = element.person.and_then(|p| p.person_properties) {
        return props.name.or(props.email).map(TextRun::new);
    }

    if element.equation.is_some() {
        debug!("equation element {} carries no text, skipped", index);
    }
    None
}

/// Build the footnote table from the `footnotes` map.
///
/// The entry text is the footnote body with whitespace collapsed; the URL is
/// the first hyperlink in the body, redirect-cleaned. Entries that do not
/// decode are skipped, leaving their references unresolved.
fn build_footnote_table(footnotes: &HashMap<String, Value>) -> FootnoteTable {
    let mut table = FootnoteTable::new();

    for (id, raw) in footnotes {
        let footnote: ApiFootnote = match serde_json::from_value(raw.clone()) {
            Ok(f) => f,
            Err(e) => {
                warn!("skipping malformed footnote {}: {}", id, e);
                continue;
            }
        };
        let mut text = String::new();
        let mut url: Option<String> = None;

        for element in convert_content(&footnote.content) {
            for run in element.runs {
                text.push_str(&run.text);
                text.push(' ');
                if url.is_none() {
                    url = run.link.map(|u| clean_redirect_url(&u));
                }
            }
        }

        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let entry = match url {
            Some(url) => FootnoteEntry::linked(text, url),
            None => FootnoteEntry::text(text),
        };
        table.insert(id.clone(), entry);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paragraph(style: &str, elements: Value) -> Value {
        json!({
            "paragraph": {
                "elements": elements,
                "paragraphStyle": { "namedStyleType": style }
            }
        })
    }

    fn text(content: &str) -> Value {
        json!({ "textRun": { "content": content, "textStyle": {} } })
    }

    #[test]
    fn test_convert_styles() {
        let doc = convert_api_document(json!({
            "documentId": "abc",
            "title": "Report",
            "body": { "content": [
                { "sectionBreak": {} },
                paragraph("TITLE", json!([text("Report\n")])),
                paragraph("HEADING_2", json!([text("Section\n")])),
                paragraph("NORMAL_TEXT", json!([text("Body.\n")])),
                paragraph("SUBTITLE", json!([text("Sub\n")])),
            ]}
        }))
        .unwrap();

        let kinds: Vec<_> = doc.elements.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Other,
                ElementKind::Title,
                ElementKind::Heading { level: 2 },
                ElementKind::BodyParagraph,
                ElementKind::BodyParagraph,
            ]
        );
        assert_eq!(doc.metadata.document_id.as_deref(), Some("abc"));
        assert_eq!(doc.metadata.title.as_deref(), Some("Report"));
    }

    #[test]
    fn test_missing_style_defaults_to_body() {
        let doc = convert_api_document(json!({
            "body": { "content": [ { "paragraph": { "elements": [text("x\n")] } } ] }
        }))
        .unwrap();
        assert_eq!(doc.elements[0].kind, ElementKind::BodyParagraph);
    }

    #[test]
    fn test_links_and_footnote_references() {
        let doc = convert_api_document(json!({
            "body": { "content": [ paragraph("NORMAL_TEXT", json!([
                text("See "),
                { "textRun": {
                    "content": "here",
                    "textStyle": { "link": { "url": "https://example.com" } }
                }},
                { "footnoteReference": { "footnoteId": "kix.f1", "footnoteNumber": "1" } },
                text("\n"),
            ]))]}
        }))
        .unwrap();

        let runs = &doc.elements[0].runs;
        assert_eq!(runs.len(), 4);
        assert_eq!(runs[1].link.as_deref(), Some("https://example.com"));
        assert_eq!(runs[2].footnote_id.as_deref(), Some("kix.f1"));
        assert_eq!(runs[2].text, "1");
    }

    #[test]
    fn test_malformed_pieces_skipped() {
        let doc = convert_api_document(json!({
            "body": { "content": [
                "not an object",
                { "startIndex": 1 },
                paragraph("NORMAL_TEXT", json!([
                    { "textRun": { "textStyle": {} } },
                    { "footnoteReference": { "footnoteNumber": "2" } },
                    { "textRun": { "content": 42 } },
                    text("kept\n"),
                ])),
            ]}
        }))
        .unwrap();

        assert_eq!(doc.element_count(), 1);
        assert_eq!(doc.elements[0].runs.len(), 1);
        assert_eq!(doc.elements[0].runs[0].text, "kept\n");
    }

    #[test]
    fn test_footnote_table() {
        let doc = convert_api_document(json!({
            "body": { "content": [] },
            "footnotes": {
                "f1": { "footnoteId": "f1", "content": [ paragraph("NORMAL_TEXT", json!([
                    text(" Smith, "),
                    { "textRun": {
                        "content": "Nature",
                        "textStyle": { "link": {
                            "url": "https://www.google.com/url?q=https://nature.com/a&sa=D"
                        }}
                    }},
                    text("\n"),
                ]))]},
                "f2": { "content": [ paragraph("NORMAL_TEXT", json!([text(" No link here.\n")])) ] }
            }
        }))
        .unwrap();

        let f1 = doc.footnotes.get("f1").unwrap();
        assert_eq!(f1.text, "Smith, Nature");
        assert_eq!(f1.url.as_deref(), Some("https://nature.com/a"));

        let f2 = doc.footnotes.get("f2").unwrap();
        assert_eq!(f2.text, "No link here.");
        assert!(f2.url.is_none());
    }

    #[test]
    fn test_malformed_footnote_skipped() {
        let doc = convert_api_document(json!({
            "body": { "content": [ paragraph("NORMAL_TEXT", json!([text("Kept text.\n")])) ] },
            "footnotes": {
                "f1": { "content": "oops" },
                "f2": { "content": [ paragraph("NORMAL_TEXT", json!([text("https://ok.example\n")])) ] }
            }
        }))
        .unwrap();

        assert_eq!(doc.elements[0].runs[0].text, "Kept text.\n");
        assert!(doc.footnotes.get("f1").is_none());
        assert_eq!(
            doc.footnotes.get("f2").and_then(FootnoteEntry::link_target),
            Some("https://ok.example")
        );
    }

    #[test]
    fn test_rich_link_and_person() {
        let doc = convert_api_document(json!({
            "body": { "content": [ paragraph("NORMAL_TEXT", json!([
                { "richLink": { "richLinkProperties": {
                    "title": "Spec sheet", "uri": "https://docs.example/1"
                }}},
                { "person": { "personProperties": { "email": "a@example.com" } } },
                { "equation": {} },
            ]))]}
        }))
        .unwrap();

        let runs = &doc.elements[0].runs;
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Spec sheet");
        assert_eq!(runs[0].link.as_deref(), Some("https://docs.example/1"));
        assert_eq!(runs[1].text, "a@example.com");
    }

    #[test]
    fn test_tabs_body() {
        let doc = convert_api_document(json!({
            "documentId": "t",
            "tabs": [
                { "tabProperties": { "title": "Empty" }, "childTabs": [
                    { "documentTab": { "body": { "content": [
                        paragraph("HEADING_1", json!([text("Nested\n")]))
                    ]}}}
                ]}
            ]
        }))
        .unwrap();
        assert_eq!(doc.elements[0].heading_level(), Some(1));
    }

    #[test]
    fn test_missing_body() {
        let result = convert_api_document(json!({ "documentId": "x" }));
        assert!(matches!(result, Err(Error::MissingBody)));
    }
}
