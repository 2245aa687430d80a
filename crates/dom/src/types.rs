//! Core type definitions for the arena DOM
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Links are indices too: parent, first/last child, prev/next sibling
//! 3. Every link lookup is O(1), no child vectors to scan

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any webpage
pub type NodeId = u32;

/// Node type matching DOM specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

/// A single node of the tree
///
/// Design philosophy:
/// - Small fixed-size fields first (better packing)
/// - Use indices instead of pointers
/// - Links are owned by the arena, only `append_child` writes them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    // IDs
    pub node_id: NodeId,
    pub backend_node_id: u32,
    pub node_type: NodeType,

    // Navigation links
    pub parent_id: Option<NodeId>,
    pub first_child_id: Option<NodeId>,
    pub last_child_id: Option<NodeId>,
    pub prev_sibling_id: Option<NodeId>,
    pub next_sibling_id: Option<NodeId>,

    pub node_name: String,
    pub node_value: String,
    pub attributes: AHashMap<String, String>,
}

impl DomNode {
    /// Create a detached node with required fields
    pub fn new(backend_node_id: u32, node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_id: 0,
            backend_node_id,
            node_type,
            parent_id: None,
            first_child_id: None,
            last_child_id: None,
            prev_sibling_id: None,
            next_sibling_id: None,
            node_name: node_name.into(),
            node_value: String::new(),
            attributes: AHashMap::new(),
        }
    }

    /// Element node with a lowercase tag name
    pub fn element(backend_node_id: u32, tag: &str) -> Self {
        Self::new(backend_node_id, NodeType::Element, tag.to_ascii_lowercase())
    }

    /// Text node
    pub fn text(backend_node_id: u32, value: impl Into<String>) -> Self {
        Self::new(backend_node_id, NodeType::Text, "#text").with_value(value)
    }

    /// Comment node
    pub fn comment(backend_node_id: u32, value: impl Into<String>) -> Self {
        Self::new(backend_node_id, NodeType::Comment, "#comment").with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.node_value = value.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Whitespace-separated `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}
