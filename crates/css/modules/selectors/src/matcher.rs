//! CSS selector matching engine.
//! Spec: <https://www.w3.org/TR/CSS21/selector.html>

use crate::{
    AttributeMatch, AttributeSelector, Combinator, CompoundSelector, CursorGuard, SelectableNode,
    SelectorChain, SelectorLink,
};

/// Match a selector chain against the element under the cursor.
///
/// The pseudo-element of the chain is not considered here. The cursor is back
/// at its starting position when this returns.
pub fn matches_chain<N: SelectableNode + ?Sized>(chain: &SelectorChain, node: &mut N) -> bool {
    match_links(chain, node, chain.links().len())
}

/// Match `chain.links()[..link_index]` right-to-left, starting at the cursor.
///
/// Descendant combinators try every ancestor in turn, so this is a depth-first
/// search over all the ways the chain could be satisfied.
fn match_links<N: SelectableNode + ?Sized>(
    chain: &SelectorChain,
    node: &mut N,
    link_index: usize,
) -> bool {
    let mut cursor = CursorGuard::new(node);
    let Some(index) = link_index.checked_sub(1) else {
        return true;
    };
    match chain.links().get(index) {
        None => false,
        Some(SelectorLink::Compound(compound)) => {
            matches_compound(compound, &*cursor) && match_links(chain, &mut *cursor, index)
        }
        Some(SelectorLink::Combinator(Combinator::Child)) => {
            cursor.parent() && match_links(chain, &mut *cursor, index)
        }
        Some(SelectorLink::Combinator(Combinator::NextSibling)) => {
            cursor.prev_sibling() && match_links(chain, &mut *cursor, index)
        }
        Some(SelectorLink::Combinator(Combinator::Descendant)) => {
            while cursor.parent() {
                if match_links(chain, &mut *cursor, index) {
                    return true;
                }
            }
            false
        }
    }
}

/// Match a compound selector against the element under the cursor, without moving it.
pub fn matches_compound<N: SelectableNode + ?Sized>(compound: &CompoundSelector, node: &N) -> bool {
    if let Some(name) = &compound.element_name
        && !name.eq_ignore_ascii_case(node.name())
    {
        return false;
    }
    if !compound.element_id.is_empty() && compound.element_id != node.id() {
        return false;
    }
    if !compound.element_lang.is_empty() && !compound.element_lang.eq_ignore_ascii_case(node.lang())
    {
        return false;
    }
    if !compound.element_classes.is_empty()
        && !contains_all(&node.element_classes(), &compound.element_classes)
    {
        return false;
    }
    if !compound.pseudo_classes.is_empty()
        && !contains_all(&node.pseudo_classes(), &compound.pseudo_classes)
    {
        return false;
    }
    compound
        .attribute_selectors
        .iter()
        .all(|selector| matches_attribute(selector, node))
}

/// True if every wanted name occurs in `available`, ignoring ASCII case.
fn contains_all(available: &[String], wanted: &[String]) -> bool {
    wanted.iter().all(|name| {
        available
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    })
}

/// Spec: Section 5.8.1, matching attributes and attribute values
fn matches_attribute<N: SelectableNode + ?Sized>(selector: &AttributeSelector, node: &N) -> bool {
    let Some(value) = node.attribute_value(&selector.name) else {
        return false;
    };
    match selector.kind {
        AttributeMatch::Set => true,
        AttributeMatch::Exact => value.eq_ignore_ascii_case(&selector.value),
        AttributeMatch::SpaceSeparated => value
            .split(' ')
            .any(|word| word.eq_ignore_ascii_case(&selector.value)),
        AttributeMatch::HyphenSeparated => value
            .split('-')
            .any(|word| word.eq_ignore_ascii_case(&selector.value)),
        AttributeMatch::LangPrefix => lang_prefix_matches(value, &selector.value),
    }
}

/// `value` equals `prefix` or starts with `prefix` followed by `-`.
fn lang_prefix_matches(value: &str, prefix: &str) -> bool {
    if value.eq_ignore_ascii_case(prefix) {
        return true;
    }
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        && value.as_bytes().get(prefix.len()) == Some(&b'-')
}
