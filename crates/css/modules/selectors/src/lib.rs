//! CSS 2.1 selectors: model, specificity, element matching and parsing.
//! Spec: <https://www.w3.org/TR/CSS21/selector.html>
//!
//! Supported:
//! - Type, universal, class, id and attribute selectors
//! - Pseudo-classes by name, and the `:before`/`:after` pseudo-elements
//! - Combinators: descendant, child, adjacent sibling
//!
//! CSS3 pseudo-elements (`::name`), functional pseudo-classes such as `:lang()`
//! and the CSS3 attribute operators are rejected by the parser.

#![forbid(unsafe_code)]

mod matcher;
mod node;
mod parser;
mod specificity;

pub use matcher::{matches_chain, matches_compound};
pub use node::{CursorGuard, SelectableNode};
pub use parser::read_selector_chain;
pub use specificity::{Specificity, specificity_of_chain};

/// How an attribute selector tests the attribute value.
/// Spec: Section 5.8.1, matching attributes and attribute values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeMatch {
    /// `[name]`: the attribute exists.
    Set,
    /// `[name=value]`
    Exact,
    /// `[name~=value]`: one of the space separated words.
    SpaceSeparated,
    /// `[name -= value]`: one of the hyphen separated words.
    HyphenSeparated,
    /// `[name|=value]`: equal to value or starting with `value-`.
    LangPrefix,
}

/// One `[...]` attribute selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    pub name: String,
    /// Empty for [`AttributeMatch::Set`].
    pub value: String,
    pub kind: AttributeMatch,
}

impl AttributeSelector {
    #[inline]
    pub fn new(name: impl Into<String>, kind: AttributeMatch, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
        }
    }
}

/// Combinators between compound selectors.
/// Spec: Section 5.5–5.7
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the parent.
    Child,
    /// `+`: the immediately preceding sibling.
    NextSibling,
}

/// A compound selector such as `div.foo#bar[attr]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompoundSelector {
    /// Type selector name; `None` for the (possibly implicit) universal selector.
    pub element_name: Option<String>,
    /// Empty when no `#id` was given.
    pub element_id: String,
    /// Empty when no language constraint applies.
    pub element_lang: String,
    pub element_classes: Vec<String>,
    pub pseudo_classes: Vec<String>,
    pub attribute_selectors: Vec<AttributeSelector>,
}

impl CompoundSelector {
    /// Type selector for `name`.
    #[inline]
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            element_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The universal selector `*`.
    #[inline]
    pub fn universal() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = id.into();
        self
    }

    #[inline]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.element_lang = lang.into();
        self
    }

    #[inline]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.element_classes.push(class.into());
        self
    }

    #[inline]
    pub fn with_pseudo_class(mut self, pseudo_class: impl Into<String>) -> Self {
        self.pseudo_classes.push(pseudo_class.into());
        self
    }

    #[inline]
    pub fn with_attribute(mut self, attribute: AttributeSelector) -> Self {
        self.attribute_selectors.push(attribute);
        self
    }

    /// True when no type selector constrains the element name.
    #[inline]
    pub const fn is_universal(&self) -> bool {
        self.element_name.is_none()
    }
}

/// One step of a selector chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectorLink {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A full selector: compound selectors joined by combinators, in source order.
///
/// Always starts and ends with a compound selector and alternates in between.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectorChain {
    links: Vec<SelectorLink>,
    /// `before`, `after`, or empty.
    pseudo_element: String,
}

impl SelectorChain {
    /// A chain made of a single compound selector.
    #[inline]
    pub fn new(compound: CompoundSelector) -> Self {
        Self {
            links: vec![SelectorLink::Compound(compound)],
            pseudo_element: String::new(),
        }
    }

    /// Append `combinator` and the compound selector to its right.
    #[inline]
    pub fn then(mut self, combinator: Combinator, compound: CompoundSelector) -> Self {
        self.push(combinator, compound);
        self
    }

    /// Set the pseudo-element this chain styles.
    #[inline]
    pub fn with_pseudo_element(mut self, pseudo_element: impl Into<String>) -> Self {
        self.pseudo_element = pseudo_element.into();
        self
    }

    #[inline]
    pub(crate) fn push(&mut self, combinator: Combinator, compound: CompoundSelector) {
        self.links.push(SelectorLink::Combinator(combinator));
        self.links.push(SelectorLink::Compound(compound));
    }

    #[inline]
    pub fn links(&self) -> &[SelectorLink] {
        &self.links
    }

    #[inline]
    pub fn pseudo_element(&self) -> &str {
        &self.pseudo_element
    }

    /// The right-most compound selector, the one tested against the element itself.
    #[inline]
    pub fn subject(&self) -> Option<&CompoundSelector> {
        match self.links.last() {
            Some(SelectorLink::Compound(compound)) => Some(compound),
            _ => None,
        }
    }

    /// Cascade weight of this chain.
    #[inline]
    pub fn specificity(&self) -> Specificity {
        specificity_of_chain(self)
    }
}
