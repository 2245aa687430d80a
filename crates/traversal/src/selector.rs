//! Selector capability
//!
//! Traversal never parses selector text itself. Callers bring a compiled
//! [`Selector`] (or a [`SelectorCompiler`] that produces one) and pass it
//! into each operation explicitly. Nothing is cached between calls.

use dom::{NodeId, Tree};

use crate::error::Result;
use crate::node_set::NodeSet;

/// A compiled selector over trees of type `T`
pub trait Selector<T: Tree> {
    /// Does `node` itself match?
    fn matches(&self, tree: &T, node: NodeId) -> bool;

    /// Every match in the subtree rooted at `root`, `root` included, in
    /// pre-order.
    fn match_all(&self, tree: &T, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .filter(|&node| self.matches(tree, node))
            .collect()
    }
}

/// Plain predicates are selectors
impl<T, F> Selector<T> for F
where
    T: Tree,
    F: Fn(&T, NodeId) -> bool,
{
    fn matches(&self, tree: &T, node: NodeId) -> bool {
        self(tree, node)
    }
}

/// Turns selector text into a compiled selector
pub trait SelectorCompiler<T: Tree> {
    type Selector: Selector<T>;

    /// Fails with [`TraversalError::SelectorSyntax`](crate::TraversalError::SelectorSyntax)
    /// on text the compiler does not accept.
    fn compile(&self, text: &str) -> Result<Self::Selector>;
}

/// Boundary for `*_until` walks and ancestor walks
///
/// The walk stops at the first candidate for which the condition holds,
/// without including it.
pub enum Until<'a, T: Tree> {
    /// Never stop early
    None,
    /// Stop at the first candidate matching the selector
    Selector(&'a dyn Selector<T>),
    /// Stop at the first candidate that is one of these nodes
    Nodes(&'a NodeSet),
}

impl<T: Tree> Until<'_, T> {
    pub fn reached(&self, tree: &T, node: NodeId) -> bool {
        match self {
            Until::None => false,
            Until::Selector(selector) => selector.matches(tree, node),
            Until::Nodes(nodes) => nodes.contains(node),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Until::None)
    }
}

impl<T: Tree> Clone for Until<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tree> Copy for Until<'_, T> {}

impl<T: Tree> std::fmt::Debug for Until<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Until::None => f.write_str("None"),
            Until::Selector(_) => f.write_str("Selector(..)"),
            Until::Nodes(nodes) => f.debug_tuple("Nodes").field(&nodes.as_slice()).finish(),
        }
    }
}
