//! Ordered, duplicate-free node sets and the fan-in merge
//!
//! Every traversal that starts from several nodes funnels through
//! [`map_nodes`]: each source is expanded in turn and the expansions are
//! appended, dropping nodes already present. Order is first occurrence,
//! not document order.

use std::ops::Deref;

use ahash::AHashSet;
use dom::NodeId;

/// Ordered set of node references
///
/// `nodes` keeps insertion order, `seen` answers membership in O(1).
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: Vec<NodeId>,
    seen: AHashSet<NodeId>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            seen: AHashSet::with_capacity(capacity),
        }
    }

    /// Append `node` unless already present. Returns whether it was added.
    pub fn insert(&mut self, node: NodeId) -> bool {
        if !self.seen.insert(node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.seen.contains(&node)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl Deref for NodeSet {
    type Target = [NodeId];

    fn deref(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl PartialEq for NodeSet {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for NodeSet {}

impl Extend<NodeId> for NodeSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        for node in iter {
            self.insert(node);
        }
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        set.extend(iter);
        set
    }
}

impl<const N: usize> From<[NodeId; N]> for NodeSet {
    fn from(nodes: [NodeId; N]) -> Self {
        nodes.into_iter().collect()
    }
}

impl From<&[NodeId]> for NodeSet {
    fn from(nodes: &[NodeId]) -> Self {
        nodes.iter().copied().collect()
    }
}

impl From<NodeSet> for Vec<NodeId> {
    fn from(set: NodeSet) -> Self {
        set.nodes
    }
}

impl IntoIterator for NodeSet {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Expand every source node and merge the results
///
/// `expand` gets the source's index and id. Nodes already in the result are
/// dropped; everything else is appended in the order produced.
pub fn map_nodes<F, I>(sources: &[NodeId], mut expand: F) -> NodeSet
where
    F: FnMut(usize, NodeId) -> I,
    I: IntoIterator<Item = NodeId>,
{
    let mut result = NodeSet::new();
    for (index, &node) in sources.iter().enumerate() {
        result.extend(expand(index, node));
    }
    tracing::trace!(
        sources = sources.len(),
        results = result.len(),
        "Merged node expansions"
    );
    result
}
