//! CSS selector specificity calculation.
//! Spec: <https://www.w3.org/TR/CSS21/cascade.html#specificity>

use crate::{SelectorChain, SelectorLink};

/// Specificity packed as `ids << 24 | (classes + attributes) << 8 | (tags + pseudo-element)`.
///
/// Class and tag counts past 255 spill into the field above them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32);

impl Specificity {
    #[inline]
    pub const fn from_counts(ids: u32, classes: u32, tags: u32) -> Self {
        Self(
            ids.wrapping_shl(24)
                .wrapping_add(classes.wrapping_shl(8))
                .wrapping_add(tags),
        )
    }
}

/// Compute the specificity of a selector chain.
///
/// Pseudo-classes do not contribute; a pseudo-element counts as one tag.
pub fn specificity_of_chain(chain: &SelectorChain) -> Specificity {
    let mut ids = 0u32;
    let mut classes = 0u32;
    let mut tags = 0u32;
    for link in chain.links() {
        let SelectorLink::Compound(compound) = link else {
            continue;
        };
        if !compound.element_id.is_empty() {
            ids = ids.wrapping_add(1);
        }
        let class_like = compound
            .element_classes
            .len()
            .saturating_add(compound.attribute_selectors.len());
        classes = classes.wrapping_add(u32::try_from(class_like).unwrap_or(u32::MAX));
        if !compound.is_universal() {
            tags = tags.wrapping_add(1);
        }
    }
    if !chain.pseudo_element().is_empty() {
        tags = tags.wrapping_add(1);
    }
    Specificity::from_counts(ids, classes, tags)
}
