//! Heading numbering on loaded stylesheets.

use docstyle::css::{ContentPartKind, parse_content};
use docstyle::{StyleFamily, Stylesheet};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_sheet() -> Stylesheet {
    let bytes = std::fs::read(format!("{}/word_styles.css", FIXTURES_DIR))
        .expect("Failed to read fixture");
    Stylesheet::from_bytes(&bytes)
}

fn before_content(sheet: &Stylesheet, selector: &str) -> Option<String> {
    sheet
        .get(selector)?
        .rule_if_present("::before")?
        .get("content")
        .map(str::to_string)
}

#[test]
fn test_fixture_starts_unnumbered() {
    let sheet = fixture_sheet();
    assert!(!sheet.heading_numbering());
    assert!(!sheet.is_numbering_used());
}

#[test]
fn test_enable_numbers_classed_headings() {
    let mut sheet = fixture_sheet();
    sheet.set_heading_numbering(true);
    assert!(sheet.heading_numbering());

    // Both heading styles are based on the default paragraph style.
    assert_eq!(
        before_content(&sheet, "h1.Heading1").as_deref(),
        Some("counter(h1) \" \"")
    );
    assert_eq!(
        before_content(&sheet, "h2.Heading2").as_deref(),
        Some("counter(h1) \".\" counter(h2) \" \"")
    );
    assert!(!sheet.contains("h1"));
    assert!(!sheet.contains("h2"));

    // Levels without any style get a classless one.
    for level in 3..=6 {
        let selector = format!("h{level}");
        let style = sheet.get(&selector).unwrap();
        assert!(!style.is_latent());
        assert!(style.is_numbered());
        assert_eq!(
            style.base_rule().get("counter-increment"),
            Some(selector.as_str())
        );
    }

    let h4 = before_content(&sheet, "h4").unwrap();
    let counters: Vec<String> = parse_content(&h4)
        .into_iter()
        .filter(|part| part.kind == ContentPartKind::Counter)
        .map(|part| part.value)
        .collect();
    assert_eq!(counters, vec!["h1", "h2", "h3", "h4"]);
}

#[test]
fn test_numbering_appears_in_css_text() {
    let mut sheet = fixture_sheet();
    sheet.set_heading_numbering(true);
    let text = sheet.css_text();
    assert!(text.contains("h1.Heading1::before {\n    content: counter(h1) \" \";\n}\n"));
    assert!(text.contains("    counter-reset: h2 h3 h4 h5 h6;\n"));

    let reloaded = Stylesheet::from_css_text(&text);
    assert!(reloaded.heading_numbering());
}

#[test]
fn test_styles_based_on_other_headings_are_unnumbered() {
    let mut sheet = fixture_sheet();
    sheet.set_default_style(Some("p.Normal"), StyleFamily::Paragraph);
    sheet.update_from_css_text(
        "p.Normal { -uxwrite-default: true }\n\
         h1.Heading1 { -uxwrite-parent: \"p.Normal\"; font-size: 16pt }\n\
         h1.Unnumbered { -uxwrite-parent: \"h1.Heading1\" }",
    );
    sheet.set_heading_numbering(true);

    let unnumbered = sheet.get("h1.Unnumbered").unwrap();
    assert!(!unnumbered.is_numbered());
    assert_eq!(
        unnumbered.base_rule().get("counter-increment"),
        Some("h1 0")
    );
    assert!(sheet.get("h1.Heading1").unwrap().is_numbered());
}

#[test]
fn test_disable_removes_numbering() {
    let mut sheet = fixture_sheet();
    sheet.set_heading_numbering(true);
    sheet.set_heading_numbering(false);

    assert!(!sheet.heading_numbering());
    for selector in ["h1.Heading1", "h2.Heading2", "h3", "h6"] {
        let style = sheet.get(selector).unwrap();
        assert!(!style.is_numbered());
        assert!(!style.base_rule().contains("counter-increment"));
        assert!(!style.base_rule().contains("counter-reset"));
    }
    assert!(!sheet.css_text().contains("counter("));
}

#[test]
fn test_numbering_used_follows_body_reset() {
    let mut sheet = fixture_sheet();
    sheet.body_properties().set("counter-reset", "h1 h2");
    assert!(sheet.is_numbering_used());
    sheet.body_properties().remove("counter-reset");
    assert!(!sheet.is_numbering_used());
}
