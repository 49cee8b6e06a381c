//! Finding the rulesets that apply to an element.

use crate::store::{Ruleset, RulesetStore};
use css_selectors::{SelectableNode, SelectorChain, Specificity, matches_chain};

/// A ruleset that matched the element, with what made it match.
#[derive(Clone, Copy, Debug)]
pub struct RulesetMatch<'store> {
    pub ruleset: &'store Ruleset,
    /// Index of the selector chain that matched.
    pub chain_index: usize,
    /// Specificity of that chain.
    pub specificity: Specificity,
    /// Position among the matches as they were found, i.e. source order.
    pub document_order: usize,
}

impl RulesetMatch<'_> {
    /// The selector chain that matched.
    #[inline]
    pub fn chain(&self) -> Option<&SelectorChain> {
        self.ruleset.selectors.get(self.chain_index)
    }
}

/// Find every ruleset with a selector matching the element under the cursor
/// for `pseudo_element` (`""`, `"before"` or `"after"`).
///
/// A ruleset is reported once, through its first matching selector. The result
/// is sorted by ascending specificity then source order, so the most
/// authoritative ruleset comes last.
pub fn select_rulesets<'store, N: SelectableNode + ?Sized>(
    store: &'store RulesetStore,
    node: &mut N,
    pseudo_element: &str,
) -> Vec<RulesetMatch<'store>> {
    let mut matches = Vec::new();
    for ruleset in store {
        let matched = ruleset.selectors.iter().position(|chain| {
            chain.pseudo_element().eq_ignore_ascii_case(pseudo_element) && matches_chain(chain, node)
        });
        let Some(chain_index) = matched else {
            continue;
        };
        let specificity = ruleset
            .selectors
            .get(chain_index)
            .map(SelectorChain::specificity)
            .unwrap_or_default();
        matches.push(RulesetMatch {
            ruleset,
            chain_index,
            specificity,
            document_order: matches.len(),
        });
    }
    matches.sort_by_key(|found| (found.specificity, found.document_order));
    matches
}
