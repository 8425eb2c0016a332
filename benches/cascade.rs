//! Benchmarks for the stylesheet pipeline.
//!
//! Run with: cargo bench

use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use docstyle::Stylesheet;

/// A stylesheet shaped like a word-processor export: a default paragraph
/// style, chains of styles based on it, and table styles with cell rules.
fn synthetic_css(chains: usize, depth: usize) -> String {
    let mut css = String::from(
        "p.Normal {\n    -uxwrite-default: true;\n    margin: 0pt 0pt 8pt 0pt;\n    font-family: Calibri;\n    line-height: 108%;\n}\n\n",
    );
    for chain in 0..chains {
        let mut parent = "p.Normal".to_string();
        for level in 0..depth {
            let selector = format!("p.Style{chain}_{level}");
            let _ = write!(
                css,
                "{selector} {{\n    -uxwrite-parent: \"{parent}\";\n    margin: 0pt 0pt 8pt 0pt;\n    font-family: Calibri;\n    font-size: {}pt;\n    border: 1pt solid #5B9BD5;\n    text-decoration: underline;\n}}\n\n",
                10 + level
            );
            parent = selector;
        }
        let _ = write!(
            css,
            "table.Grid{chain} {{\n    border: 1pt solid black;\n}}\n\ntable.Grid{chain} > * > tr > td {{\n    padding: 0pt 5.4pt;\n}}\n\n"
        );
    }
    css
}

fn bench_parse(c: &mut Criterion) {
    let css = synthetic_css(40, 5);
    c.bench_function("parse_stylesheet", |b| {
        b.iter(|| Stylesheet::from_css_text(black_box(&css)));
    });
}

fn bench_rules(c: &mut Criterion) {
    let sheet = Stylesheet::from_css_text(&synthetic_css(40, 5));
    c.bench_function("flatten_rules", |b| {
        b.iter(|| black_box(&sheet).rules());
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let css = synthetic_css(40, 5);
    c.bench_function("round_trip", |b| {
        b.iter(|| {
            let sheet = Stylesheet::from_css_text(black_box(&css));
            Stylesheet::from_css_text(&sheet.css_text())
        });
    });
}

fn bench_numbering(c: &mut Criterion) {
    let sheet = Stylesheet::from_css_text(&synthetic_css(10, 3));
    c.bench_function("toggle_heading_numbering", |b| {
        b.iter(|| {
            let mut sheet = sheet.clone();
            sheet.set_heading_numbering(true);
            sheet.set_heading_numbering(false);
            sheet
        });
    });
}

criterion_group!(benches, bench_parse, bench_rules, bench_round_trip, bench_numbering);
criterion_main!(benches);
