//! A small arena DOM that selector matching can walk.
//!
//! Elements carry their attributes and any dynamic pseudo-class states
//! (`hover`, `focus`, ...). [`DomCursor`] exposes an element to the matcher.

use anyhow::{Result, anyhow};
use css_selectors::SelectableNode;
use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
    /// Dynamic pseudo-classes currently active on the element.
    pub states: SmallVec<String, 2>,
}

impl DOMNode {
    #[inline]
    pub const fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Attribute value by name, ignoring ASCII case in the name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct DomTree {
    dom: Arena<DOMNode>,
    root: NodeId,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    pub fn new() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DOMNode::default()),
            dom,
        }
    }

    /// The document node.
    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn node(&self, node: NodeId) -> Option<&DOMNode> {
        self.dom.get(node).map(Node::get)
    }

    /// Append an element with `attrs` as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` is not a live node of this tree.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId> {
        let node = DOMNode {
            kind: NodeKind::Element {
                tag: tag.to_owned(),
            },
            attrs: attrs
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
            states: SmallVec::new(),
        };
        self.append(parent, node)
    }

    /// Append a text node as the last child of `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` is not a live node of this tree.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        self.append(
            parent,
            DOMNode {
                kind: NodeKind::Text {
                    text: text.to_owned(),
                },
                ..DOMNode::default()
            },
        )
    }

    fn append(&mut self, parent: NodeId, node: DOMNode) -> Result<NodeId> {
        if self.dom.get(parent).is_none_or(|parent_node| parent_node.is_removed()) {
            return Err(anyhow!("Parent node {parent} does not exist"));
        }
        let child = self.dom.new_node(node);
        parent
            .checked_append(child, &mut self.dom)
            .map_err(|err| anyhow!("Failed to append node to {parent}: {err:?}"))?;
        Ok(child)
    }

    /// Set or replace an attribute.
    ///
    /// # Errors
    /// Returns an error if `node` is not an element of this tree.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut(node)?;
        match element
            .attrs
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some(entry) => value.clone_into(&mut entry.1),
            None => element.attrs.push((name.to_owned(), value.to_owned())),
        }
        Ok(())
    }

    /// Turn a dynamic pseudo-class such as `hover` on or off.
    ///
    /// # Errors
    /// Returns an error if `node` is not an element of this tree.
    pub fn set_state(&mut self, node: NodeId, state: &str, active: bool) -> Result<()> {
        let element = self.element_mut(node)?;
        let present = element
            .states
            .iter()
            .position(|existing| existing.eq_ignore_ascii_case(state));
        match (present, active) {
            (None, true) => element.states.push(state.to_ascii_lowercase()),
            (Some(index), false) => {
                element.states.remove(index);
            }
            _ => {}
        }
        Ok(())
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut DOMNode> {
        self.dom
            .get_mut(node)
            .map(Node::get_mut)
            .filter(|dom_node| dom_node.is_element())
            .ok_or_else(|| anyhow!("Node {node} is not an element"))
    }

    /// A matching cursor positioned on `node`.
    #[inline]
    pub fn cursor(&self, node: NodeId) -> DomCursor<'_> {
        DomCursor {
            tree: self,
            current: node,
            saved: Vec::new(),
        }
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(DOMNode::is_element)
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.dom
            .get(node)?
            .parent()
            .filter(|parent| self.is_element(*parent))
    }

    fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        node.preceding_siblings(&self.dom)
            .skip(1)
            .find(|sibling| self.is_element(*sibling))
    }
}

/// A [`SelectableNode`] over a [`DomTree`] element.
#[derive(Debug, Clone)]
pub struct DomCursor<'tree> {
    tree: &'tree DomTree,
    current: NodeId,
    saved: Vec<NodeId>,
}

impl<'tree> DomCursor<'tree> {
    /// The node under the cursor.
    #[inline]
    pub const fn current(&self) -> NodeId {
        self.current
    }

    fn node(&self) -> Option<&'tree DOMNode> {
        self.tree.node(self.current)
    }

    fn attr(&self, name: &str) -> Option<&'tree str> {
        self.node()?.attr(name)
    }
}

impl SelectableNode for DomCursor<'_> {
    fn name(&self) -> &str {
        match self.node().map(|node| &node.kind) {
            Some(NodeKind::Element { tag }) => tag,
            _ => "",
        }
    }

    fn id(&self) -> &str {
        self.attr("id").unwrap_or("")
    }

    fn lang(&self) -> &str {
        self.attr("lang")
            .or_else(|| self.attr("xml:lang"))
            .unwrap_or("")
    }

    fn element_classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|classes| classes.split_ascii_whitespace().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    fn pseudo_classes(&self) -> Vec<String> {
        let mut pseudo_classes: Vec<String> = self
            .node()
            .map(|node| node.states.iter().cloned().collect())
            .unwrap_or_default();
        if self.tree.parent_element(self.current).is_some()
            && self.tree.previous_element_sibling(self.current).is_none()
        {
            pseudo_classes.push("first-child".to_owned());
        }
        pseudo_classes
    }

    fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attr(name)
    }

    fn parent(&mut self) -> bool {
        match self.tree.parent_element(self.current) {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    fn prev_sibling(&mut self) -> bool {
        match self.tree.previous_element_sibling(self.current) {
            Some(sibling) => {
                self.current = sibling;
                true
            }
            None => false,
        }
    }

    fn push(&mut self) {
        self.saved.push(self.current);
    }

    fn pop(&mut self) {
        if let Some(saved) = self.saved.pop() {
            self.current = saved;
        }
    }
}
