//! The element capability selector matching runs against.

use core::ops::{Deref, DerefMut};

/// A cursor over an element tree that selector matching can inspect and move.
///
/// Implement this for your DOM layer. Navigation moves the cursor in place;
/// `push` saves the current position and `pop` restores the most recently
/// saved one, even after a failed `parent`/`prev_sibling` call. Matching only
/// moves the cursor inside a [`CursorGuard`], so the position a caller hands in
/// is the position it gets back.
pub trait SelectableNode {
    /// Element name, compared ignoring ASCII case.
    fn name(&self) -> &str;

    /// Element id, or empty.
    fn id(&self) -> &str;

    /// Element language, or empty.
    fn lang(&self) -> &str;

    /// Class names. Only requested when a selector tests classes.
    fn element_classes(&self) -> Vec<String>;

    /// Active pseudo-classes (`hover`, `first-child`, ...). Only requested when
    /// a selector tests pseudo-classes.
    fn pseudo_classes(&self) -> Vec<String>;

    /// Attribute value if the attribute is present.
    fn attribute_value(&self, name: &str) -> Option<&str>;

    /// Move to the parent element. Returns false, without moving, at the root.
    fn parent(&mut self) -> bool;

    /// Move to the previous sibling element. Returns false, without moving, if there is none.
    fn prev_sibling(&mut self) -> bool;

    /// Save the current position.
    fn push(&mut self);

    /// Restore the most recently saved position.
    fn pop(&mut self);
}

/// Saves the cursor position on creation and restores it when dropped.
pub struct CursorGuard<'node, N: SelectableNode + ?Sized> {
    node: &'node mut N,
}

impl<'node, N: SelectableNode + ?Sized> CursorGuard<'node, N> {
    #[inline]
    pub fn new(node: &'node mut N) -> Self {
        node.push();
        Self { node }
    }
}

impl<N: SelectableNode + ?Sized> Deref for CursorGuard<'_, N> {
    type Target = N;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.node
    }
}

impl<N: SelectableNode + ?Sized> DerefMut for CursorGuard<'_, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.node
    }
}

impl<N: SelectableNode + ?Sized> Drop for CursorGuard<'_, N> {
    #[inline]
    fn drop(&mut self) {
        self.node.pop();
    }
}
