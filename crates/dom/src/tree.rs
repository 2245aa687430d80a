//! Read-only link view over a DOM tree
//!
//! Traversal code only ever needs five O(1) lookups. Anything that can
//! answer them (the arena, or a foreign DOM behind an adapter) is a `Tree`.

use crate::types::{NodeId, NodeType};

/// Pointer-style link lookups over an immutable tree
///
/// Every lookup returns `None` for an absent link or an unknown node.
pub trait Tree {
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn first_child(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn node_type(&self, node: NodeId) -> Option<NodeType>;

    /// Unknown nodes are not elements.
    fn is_element(&self, node: NodeId) -> bool {
        self.node_type(node) == Some(NodeType::Element)
    }

    /// `node.parent`, `node.parent.parent`, ... up to the root
    fn ancestors(&self, node: NodeId) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }

    /// Pre-order walk of the subtree rooted at `root`, `root` first
    fn descendants(&self, root: NodeId) -> Descendants<'_, Self>
    where
        Self: Sized,
    {
        Descendants {
            tree: self,
            root,
            next: self.node_type(root).map(|_| root),
        }
    }
}

/// Iterator returned by [`Tree::ancestors`]
pub struct Ancestors<'t, T> {
    tree: &'t T,
    next: Option<NodeId>,
}

impl<T: Tree> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Iterator returned by [`Tree::descendants`]
///
/// Uses the links instead of a stack: go down if possible, otherwise
/// right, otherwise climb until some ancestor (below `root`) has a right
/// sibling.
pub struct Descendants<'t, T> {
    tree: &'t T,
    root: NodeId,
    next: Option<NodeId>,
}

impl<T: Tree> Descendants<'_, T> {
    fn advance(&self, current: NodeId) -> Option<NodeId> {
        if let Some(child) = self.tree.first_child(current) {
            return Some(child);
        }
        let mut node = current;
        loop {
            if node == self.root {
                return None;
            }
            if let Some(sibling) = self.tree.next_sibling(node) {
                return Some(sibling);
            }
            node = self.tree.parent(node)?;
        }
    }
}

impl<T: Tree> Iterator for Descendants<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.advance(current);
        Some(current)
    }
}
