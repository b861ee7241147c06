//! Benchmarks for gdoc2md conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic Docs API documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

/// Creates a synthetic Docs API response with the given number of sections.
fn create_test_document(section_count: usize) -> String {
    let mut content: Vec<Value> = vec![json!({ "sectionBreak": {} })];
    let mut footnotes = serde_json::Map::new();

    content.push(paragraph("TITLE", vec![text("Benchmark Report\n")]));

    for i in 0..section_count {
        let id = format!("kix.fn{}", i);
        content.push(paragraph("HEADING_2", vec![text(&format!("Section {}\n", i + 1))]));
        content.push(paragraph(
            "NORMAL_TEXT",
            vec![
                text("Measured throughput grew steadily, "),
                json!({ "textRun": {
                    "content": "see the dashboard",
                    "textStyle": { "link": {
                        "url": format!("https://www.google.com/url?q=https://dash.example/{}&sa=D", i)
                    }}
                }}),
                text(", and the fitted loss $L = \\sum_i w_i x_i$ stayed flat, per the appendix."),
                json!({ "footnoteReference": { "footnoteId": id, "footnoteNumber": (i + 1).to_string() } }),
                text("\n"),
            ],
        ));
        footnotes.insert(
            id.clone(),
            json!({ "footnoteId": id, "content": [ paragraph("NORMAL_TEXT", vec![
                json!({ "textRun": {
                    "content": "Appendix",
                    "textStyle": { "link": { "url": format!("https://ref.example/{}", i) } }
                }}),
                text("\n"),
            ]) ] }),
        );
    }

    content.push(paragraph("HEADING_1", vec![text("Works Cited\n")]));
    content.push(paragraph("NORMAL_TEXT", vec![text("Dropped.\n")]));

    json!({
        "documentId": "bench",
        "title": "Benchmark Report",
        "body": { "content": content },
        "footnotes": footnotes
    })
    .to_string()
}

fn text(content: &str) -> Value {
    json!({ "textRun": { "content": content, "textStyle": {} } })
}

fn paragraph(style: &str, elements: Vec<Value>) -> Value {
    json!({ "paragraph": {
        "elements": elements,
        "paragraphStyle": { "namedStyleType": style }
    }})
}

/// Benchmark input format detection.
fn bench_format_detection(c: &mut Criterion) {
    let json = create_test_document(1);

    c.bench_function("detect_docs_api", |b| {
        b.iter(|| gdoc2md::detect_format_from_str(black_box(&json)).unwrap());
    });
}

/// Benchmark JSON parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for section_count in [10, 100, 500].iter() {
        let json = create_test_document(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| gdoc2md::parse_json(black_box(&json)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark rendering of an already-parsed document.
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let options = gdoc2md::RenderOptions::default();

    for section_count in [10, 100, 500].iter() {
        let doc = gdoc2md::parse_json(&create_test_document(*section_count)).unwrap();

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| gdoc2md::render::to_markdown(black_box(&doc), &options));
        });
    }

    group.finish();
}

/// Benchmark the footnote phrase heuristic on a long paragraph.
fn bench_link_phrase(c: &mut Criterion) {
    let text = "First claim holds. Second claim, with context. ".repeat(50)
        + "Final finding, reported by the agency.";
    let at = text.len();

    c.bench_function("link_phrase", |b| {
        b.iter(|| gdoc2md::render::link_phrase(black_box(&text), at));
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_parsing,
    bench_rendering,
    bench_link_phrase,
);
criterion_main!(benches);
