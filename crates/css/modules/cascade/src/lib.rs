//! CSS 2.1 cascade: ruleset storage, ruleset selection and declaration ordering.
//! Spec: <https://www.w3.org/TR/CSS21/cascade.html#cascade>

#![forbid(unsafe_code)]

mod select;
mod store;

use core::slice;
use css_syntax::Property;
use std::vec;

pub use select::{RulesetMatch, select_rulesets};
pub use store::{Ruleset, RulesetStore};

/// Declarations that apply to one element, most authoritative first.
///
/// All `!important` declarations come before all normal ones; within each group
/// entries run from the highest priority ruleset to the lowest, and from the
/// last declaration in a block to the first. The first entry for a property
/// name is therefore the one that wins: read front to back and keep the first
/// value seen, or apply back to front and let later writes overwrite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyList {
    properties: Vec<Property>,
}

impl PropertyList {
    #[inline]
    pub const fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Entries in cascade order, most authoritative first.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Property> {
        self.properties.iter()
    }

    /// Entries in the order they should be applied so that the last write wins.
    #[inline]
    pub fn apply_order(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().rev()
    }

    /// The winning declaration for `name`, if any.
    pub fn winning(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|property| property.name.eq_ignore_ascii_case(name))
    }

    #[inline]
    pub fn as_slice(&self) -> &[Property] {
        &self.properties
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Property> {
        self.properties
    }
}

impl From<Vec<Property>> for PropertyList {
    #[inline]
    fn from(properties: Vec<Property>) -> Self {
        Self { properties }
    }
}

impl IntoIterator for PropertyList {
    type Item = Property;
    type IntoIter = vec::IntoIter<Property>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

impl<'list> IntoIterator for &'list PropertyList {
    type Item = &'list Property;
    type IntoIter = slice::Iter<'list, Property>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Order the declarations of `matches` (sorted lowest priority first, as
/// [`select_rulesets`] returns them) into a [`PropertyList`].
pub fn cascade(matches: &[RulesetMatch<'_>]) -> PropertyList {
    let mut properties = Vec::new();
    push_important(matches, &mut properties);
    push_normal(matches, &mut properties);
    PropertyList::from(properties)
}

/// First pass: `!important` declarations, highest priority ruleset first.
pub fn push_important(matches: &[RulesetMatch<'_>], out: &mut Vec<Property>) {
    push_pass(matches, out, true);
}

/// Second pass: normal declarations, highest priority ruleset first.
pub fn push_normal(matches: &[RulesetMatch<'_>], out: &mut Vec<Property>) {
    push_pass(matches, out, false);
}

/// Walk rulesets and their declarations backwards, keeping those with the given importance.
fn push_pass(matches: &[RulesetMatch<'_>], out: &mut Vec<Property>, important: bool) {
    for found in matches.iter().rev() {
        out.extend(
            found
                .ruleset
                .properties
                .iter()
                .rev()
                .filter(|property| property.important == important)
                .cloned(),
        );
    }
}
