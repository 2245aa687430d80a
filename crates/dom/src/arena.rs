//! Arena-based DOM tree storage
//!
//! All nodes live in one `Vec`, links between them are `NodeId` indices.
//! Building is append-only: nodes are added, then attached under a parent.
//! Once built, the arena is only read.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```

use crate::error::{DomError, Result};
use crate::tree::Tree;
use crate::types::{DomNode, NodeId, NodeType};
use ahash::AHashMap;

/// Arena allocator for DOM nodes
///
/// Design:
/// - Single Vec<DomNode> for sequential allocation
/// - HashMap for backend_node_id → NodeId lookup (snapshots use backend IDs)
/// - No Rc/Arc: use indices everywhere
#[derive(Debug)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Backend node ID → NodeId lookup
    backend_id_map: AHashMap<u32, NodeId>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            backend_id_map: AHashMap::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Add a detached node to the arena, returns its ID
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        node.parent_id = None;
        node.first_child_id = None;
        node.last_child_id = None;
        node.prev_sibling_id = None;
        node.next_sibling_id = None;
        self.backend_id_map.insert(node.backend_node_id, node_id);
        self.nodes.push(node);
        node_id
    }

    /// Attach a detached node as the last child of `parent_id`
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        // The child must not be the parent itself or one of its ancestors
        let mut cursor = Some(parent_id);
        while let Some(id) = cursor {
            if id == child_id {
                return Err(DomError::WouldCycle {
                    child: child_id,
                    parent: parent_id,
                });
            }
            cursor = self.get(id)?.parent_id;
        }
        if let Some(existing) = self.get(child_id)?.parent_id {
            return Err(DomError::AlreadyAttached {
                child: child_id,
                parent: existing,
            });
        }
        let previous_last = self.get(parent_id)?.last_child_id;

        {
            let child = self.get_mut(child_id)?;
            child.parent_id = Some(parent_id);
            child.prev_sibling_id = previous_last;
        }
        if let Some(last_id) = previous_last {
            self.get_mut(last_id)?.next_sibling_id = Some(child_id);
        }

        let parent = self.get_mut(parent_id)?;
        if parent.first_child_id.is_none() {
            parent.first_child_id = Some(child_id);
        }
        parent.last_child_id = Some(child_id);
        Ok(())
    }

    /// Add a node and attach it under `parent_id` in one step
    pub fn add_child(&mut self, parent_id: NodeId, node: DomNode) -> Result<NodeId> {
        let child_id = self.add_node(node);
        self.append_child(parent_id, child_id)?;
        Ok(child_id)
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable). Crate-private: links must stay consistent.
    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by backend node ID
    pub fn get_by_backend_id(&self, backend_id: u32) -> Result<&DomNode> {
        let node_id = self
            .backend_id_map
            .get(&backend_id)
            .ok_or(DomError::NodeNotFound(backend_id))?;
        self.get(*node_id)
    }

    /// Get node ID by backend node ID
    pub fn get_node_id_by_backend(&self, backend_id: u32) -> Option<NodeId> {
        self.backend_id_map.get(&backend_id).copied()
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Iterator over all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| i as NodeId)
    }

    /// IDs of the direct children of a node, all node types, in order
    pub fn children(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.first_child(node_id);
        std::iter::successors(first, move |&id| self.next_sibling(id))
    }

    /// Find nodes matching predicate
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes
            .iter()
            .filter(|node| predicate(node))
            .map(|node| node.node_id)
            .collect()
    }

    /// Find first node matching predicate
    pub fn find_one<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes
            .iter()
            .find(|node| predicate(node))
            .map(|node| node.node_id)
    }

    /// Find all elements by tag name
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find(|node| {
            node.node_type == NodeType::Element && node.node_name.eq_ignore_ascii_case(tag)
        })
    }

    /// Find element by ID attribute
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_one(|node| node.node_type == NodeType::Element && node.attr("id") == Some(id))
    }

    /// Clear arena (reuse allocation)
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.backend_id_map.clear();
        self.root_id = None;
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree for DomArena {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node as usize)?.parent_id
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node as usize)?.first_child_id
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node as usize)?.next_sibling_id
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node as usize)?.prev_sibling_id
    }

    fn node_type(&self, node: NodeId) -> Option<NodeType> {
        self.nodes.get(node as usize).map(|n| n.node_type)
    }
}
