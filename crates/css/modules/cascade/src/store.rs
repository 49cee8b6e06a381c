//! Rulesets and the ordered store they live in.

use core::slice;
use css_selectors::SelectorChain;
use css_syntax::Property;
use log::trace;

/// A selector list with its declaration block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ruleset {
    /// Comma separated selectors, in source order.
    pub selectors: Vec<SelectorChain>,
    /// Declarations, in source order.
    pub properties: Vec<Property>,
    /// Generation of the stylesheet this ruleset came from.
    pub origin: u32,
}

impl Ruleset {
    #[inline]
    pub const fn new(selectors: Vec<SelectorChain>, origin: u32) -> Self {
        Self {
            selectors,
            properties: Vec::new(),
            origin,
        }
    }
}

/// Rulesets in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct RulesetStore {
    rulesets: Vec<Ruleset>,
}

impl RulesetStore {
    #[inline]
    pub const fn new() -> Self {
        Self {
            rulesets: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, ruleset: Ruleset) {
        self.rulesets.push(ruleset);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Ruleset> {
        self.rulesets.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Ruleset] {
        &self.rulesets
    }

    /// Drop every ruleset added after the store held `len` rulesets.
    /// Returns how many were removed.
    pub fn rollback_to(&mut self, len: usize) -> usize {
        let removed = self.rulesets.len().saturating_sub(len);
        if removed > 0 {
            trace!("[CASCADE] rolling back {removed} ruleset(s)");
            self.rulesets.truncate(len);
        }
        removed
    }
}

impl<'store> IntoIterator for &'store RulesetStore {
    type Item = &'store Ruleset;
    type IntoIter = slice::Iter<'store, Ruleset>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
