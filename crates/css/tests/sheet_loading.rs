#![cfg(test)]

use anyhow::Result;
use css::dom::DomTree;
use css::{MediaFilter, Property, StyleDocument, TokenKind};
use std::io::Write as _;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn value(properties: &[Property], name: &str) -> Option<String> {
    properties
        .iter()
        .find(|property| property.name == name)
        .map(Property::value_text)
}

/// A truncated `@media` block leaves nothing behind.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn truncated_media_is_rolled_back() -> Result<()> {
    init_logging();
    let mut tree = DomTree::new();
    let element = tree.append_element(tree.root(), "div", &[("class", "a")])?;
    let mut document = StyleDocument::new();
    document.add_sheet_str("@media screen { .a { color: red", "");
    assert_eq!(document.ruleset_count(), 0);
    document.add_sheet_str("@media screen { .a { color: red } .a { margin: 0 }", "");
    assert_eq!(document.ruleset_count(), 0);
    assert!(document.select(&mut tree.cursor(element), "").is_empty());
    assert_eq!(document.next_origin(), 2);
    Ok(())
}

/// Only the configured media types are honored.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn media_filter() {
    init_logging();
    let css = "@media print { p { a: 1 } } @media all { p { b: 2 } } @media screen, tv { p { c: 3 } }";
    let mut screen = StyleDocument::new();
    screen.add_sheet_str(css, "");
    assert_eq!(screen.ruleset_count(), 2);

    let mut print = StyleDocument::with_media_filter(MediaFilter::new(["print"]));
    print.add_sheet_str(css, "");
    assert_eq!(print.ruleset_count(), 1);
    assert_eq!(
        print
            .rulesets()
            .first()
            .and_then(|ruleset| ruleset.properties.first())
            .map(|property| property.name.as_str()),
        Some("a")
    );
}

/// Relative uris resolve against the sheet's base uri.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn uri_resolution() {
    init_logging();
    let mut document = StyleDocument::new();
    document.add_sheet_str(
        "p { background: uri(images/x.png) } q { background: url(\"/abs.png\") }",
        "http://example.com/styles/",
    );
    document.add_sheet_str("r { background: url(images/x.png) }", "not a uri");
    let uris: Vec<String> = document
        .rulesets()
        .iter()
        .flat_map(|ruleset| &ruleset.properties)
        .flat_map(|property| &property.value)
        .filter(|token| token.kind == TokenKind::Uri)
        .map(|token| token.value.clone())
        .collect();
    assert_eq!(
        uris,
        vec![
            "http://example.com/styles/images/x.png",
            "http://example.com/abs.png",
            "images/x.png",
        ]
    );
}

/// Malformed input degrades to fewer rules, never to an error.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn malformed_input_is_tolerated() {
    init_logging();
    let mut document = StyleDocument::new();
    // A stray `;` is a malformed statement of its own; the `q` rule after it survives.
    document.add_sheet_str(
        "} p::first-line { a: b } @unknown foo { x { y: z } } ; q { a: b } @charset \"utf-8\"; em { color: red } [x=",
        "",
    );
    let names: Vec<&str> = document
        .rulesets()
        .iter()
        .filter_map(|ruleset| ruleset.properties.first())
        .map(|property| property.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "color"]);
    document.add_sheet_str("p::first-line; em { top: 0 }", "");
    assert_eq!(document.ruleset_count(), 3);
    document.add_sheet_str("", "");
    assert_eq!(document.ruleset_count(), 3);
    assert_eq!(document.next_origin(), 3);
}

/// Sheets can come from readers and files.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn readers_and_files() -> Result<()> {
    init_logging();
    let mut document = StyleDocument::new();
    document.add_sheet("p { color: red }".as_bytes(), "")?;

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"q { background: url(bg.png) }")?;
    document.add_sheet_file(file.path(), "file:///srv/site/")?;
    assert_eq!(document.ruleset_count(), 2);
    assert_eq!(document.next_origin(), 2);
    let background = document
        .rulesets()
        .last()
        .and_then(|ruleset| value(&ruleset.properties, "background"));
    assert_eq!(background.as_deref(), Some("url(file:///srv/site/bg.png)"));

    assert!(document.add_sheet_file("/nonexistent/sheet.css", "").is_err());
    assert!(document.add_sheet(&[0xff_u8, 0xfe][..], "").is_err());
    assert_eq!(document.next_origin(), 2);
    Ok(())
}

/// Inline styles keep source order and share the declaration reader.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn inline_style_properties() {
    init_logging();
    let properties = StyleDocument::get_style_properties(
        "color: red; background: url(a.png) !important; color: blue",
        "http://example.com/",
    );
    let rendered: Vec<String> = properties.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "color: red",
            "background: url(http://example.com/a.png) !important",
            "color: blue",
        ]
    );
    assert_eq!(value(&properties, "color").as_deref(), Some("red"));
}
