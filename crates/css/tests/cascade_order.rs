#![cfg(test)]

use anyhow::Result;
use css::dom::DomTree;
use css::{CompoundSelector, Property, SelectorChain, StyleDocument};
use indextree::NodeId;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `<html><body><div id="main" class="box wide"><p class="note"/></div></body></html>`
fn page() -> Result<(DomTree, NodeId, NodeId)> {
    let mut tree = DomTree::new();
    let html = tree.append_element(tree.root(), "html", &[])?;
    let body = tree.append_element(html, "body", &[])?;
    let div = tree.append_element(body, "div", &[("id", "main"), ("class", "box wide")])?;
    let paragraph = tree.append_element(div, "p", &[("class", "note")])?;
    Ok((tree, div, paragraph))
}

fn winner(document: &StyleDocument, tree: &DomTree, node: NodeId, name: &str) -> Option<String> {
    document
        .select(&mut tree.cursor(node), "")
        .winning(name)
        .map(Property::value_text)
}

/// Applying the list back to front leaves the same value as `winning`.
fn applied(document: &StyleDocument, tree: &DomTree, node: NodeId, name: &str) -> Option<String> {
    let mut value = None;
    for property in document.select(&mut tree.cursor(node), "").apply_order() {
        if property.name == name {
            value = Some(property.value_text());
        }
    }
    value
}

/// An id outweighs any number of classes.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn id_outweighs_classes() {
    let id = SelectorChain::new(CompoundSelector::universal().with_id("a"));
    let classes = SelectorChain::new(
        ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
            .into_iter()
            .fold(CompoundSelector::universal(), CompoundSelector::with_class),
    );
    assert_eq!(id.specificity().0, 0x0100_0000);
    assert_eq!(classes.specificity().0, 0x0000_0900);
    assert!(id.specificity() > classes.specificity());
    assert_eq!(id.specificity(), id.specificity());
}

/// Higher specificity wins regardless of source order.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn specificity_beats_order() -> Result<()> {
    init_logging();
    let (tree, div, _) = page()?;
    let mut document = StyleDocument::new();
    document.add_sheet_str("#main { color: green } div.box { color: red } div { color: blue }", "");
    assert_eq!(winner(&document, &tree, div, "color").as_deref(), Some("green"));
    assert_eq!(applied(&document, &tree, div, "color").as_deref(), Some("green"));
    Ok(())
}

/// An important declaration from a weaker rule beats a normal one from a stronger rule.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn important_overrides_normal() -> Result<()> {
    init_logging();
    let (tree, div, _) = page()?;
    let mut document = StyleDocument::new();
    document.add_sheet_str("div { color: red !important; } #main { color: blue; }", "");
    let list = document.select(&mut tree.cursor(div), "");
    assert_eq!(
        list.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["color: red !important", "color: blue"]
    );
    assert_eq!(winner(&document, &tree, div, "color").as_deref(), Some("red"));
    assert_eq!(applied(&document, &tree, div, "color").as_deref(), Some("red"));
    Ok(())
}

/// With equal specificity the later rule wins, within a sheet and across sheets.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn later_rules_win_ties() -> Result<()> {
    init_logging();
    let (tree, div, _) = page()?;
    let mut document = StyleDocument::new();
    document.add_sheet_str(".box { color: red } .wide { color: blue }", "");
    assert_eq!(winner(&document, &tree, div, "color").as_deref(), Some("blue"));

    document.add_sheet_str(".box { color: purple; margin: 0 }", "");
    assert_eq!(winner(&document, &tree, div, "color").as_deref(), Some("purple"));
    assert_eq!(document.next_origin(), 2);
    let origins: Vec<u32> = document.rulesets().iter().map(|ruleset| ruleset.origin).collect();
    assert_eq!(origins, vec![0, 0, 1]);

    // A stronger rule from the first sheet still beats the second sheet.
    let mut strong_first = StyleDocument::new();
    strong_first.add_sheet_str("div.box { color: red }", "");
    strong_first.add_sheet_str(".box { color: blue }", "");
    assert_eq!(winner(&strong_first, &tree, div, "color").as_deref(), Some("red"));
    Ok(())
}

/// Within one block the last declaration of a property wins.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn last_declaration_in_block_wins() -> Result<()> {
    init_logging();
    let (tree, div, _) = page()?;
    let mut document = StyleDocument::new();
    document.add_sheet_str("div { color: red; color: blue }", "");
    assert_eq!(winner(&document, &tree, div, "color").as_deref(), Some("blue"));
    assert_eq!(applied(&document, &tree, div, "color").as_deref(), Some("blue"));
    Ok(())
}

/// A ruleset whose selectors match twice contributes once.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn ruleset_contributes_once() -> Result<()> {
    init_logging();
    let (tree, div, _) = page()?;
    let mut document = StyleDocument::new();
    document.add_sheet_str("div, .box, #main { color: red }", "");
    let matches = document.select_rulesets(&mut tree.cursor(div), "");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches.first().map(|found| found.chain_index), Some(0));
    assert_eq!(document.select(&mut tree.cursor(div), "").len(), 1);
    Ok(())
}

/// Matches come back weakest first, ties in source order.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn matches_are_sorted() -> Result<()> {
    init_logging();
    let (tree, _, paragraph) = page()?;
    let mut document = StyleDocument::new();
    document.add_sheet_str("#main p { a: 1 } p { b: 2 } .note { c: 3 } * { d: 4 } p { e: 5 }", "");
    let order: Vec<String> = document
        .select_rulesets(&mut tree.cursor(paragraph), "")
        .iter()
        .filter_map(|found| found.ruleset.properties.first())
        .map(|property| property.name.clone())
        .collect();
    assert_eq!(order, vec!["d", "b", "e", "c", "a"]);
    Ok(())
}

/// Pseudo-element rules only apply when that pseudo-element is requested.
///
/// # Panics
/// Panics if assertions fail.
#[test]
fn pseudo_element_selection() -> Result<()> {
    init_logging();
    let (tree, _, paragraph) = page()?;
    let mut document = StyleDocument::new();
    document.add_sheet_str("p { color: red } p:before { content: \"x\" } .note:AFTER { content: \"y\" }", "");
    let mut cursor = tree.cursor(paragraph);
    assert_eq!(document.select(&mut cursor, "").len(), 1);
    let before = document.select(&mut cursor, "before");
    assert_eq!(before.winning("content").map(Property::value_text).as_deref(), Some("\"x\""));
    assert!(before.winning("color").is_none());
    assert_eq!(document.select(&mut cursor, "after").len(), 1);
    Ok(())
}
