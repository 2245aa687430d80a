//! Snapshot loader - builds a `DomArena` from an already-parsed tree
//!
//! Input is the JSON shape of a CDP `DOM.getDocument` response. No HTML is
//! parsed here; the snapshot already carries the structure.
//!
//! This handles:
//! - Node type / name / value / attribute extraction
//! - Child, content document and shadow root nesting
//! - Whitespace-only text filtering (optional)
//! - Depth limiting

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::*;
use serde_json::Value;

/// Configuration for the snapshot loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Keep text nodes that contain only whitespace
    pub keep_whitespace_text: bool,
    /// Deepest nesting accepted before giving up
    pub max_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            keep_whitespace_text: true,
            max_depth: 512,
        }
    }
}

/// Builds arenas from snapshot JSON
pub struct SnapshotLoader {
    config: LoaderConfig,
}

impl SnapshotLoader {
    /// Create loader with default config
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create loader with custom config
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Parse a snapshot string and build an arena
    pub fn load_str(&self, json: &str) -> Result<DomArena> {
        let value: Value = serde_json::from_str(json)?;
        self.load(&value)
    }

    /// Build an arena from a snapshot value
    ///
    /// Input format matches CDP's DOM.getDocument response:
    /// ```json
    /// {
    ///   "root": {
    ///     "backendNodeId": 1,
    ///     "nodeType": 9,
    ///     "nodeName": "#document",
    ///     "children": [...]
    ///   }
    /// }
    /// ```
    pub fn load(&self, snapshot: &Value) -> Result<DomArena> {
        let root = snapshot
            .get("root")
            .ok_or_else(|| DomError::Snapshot("Missing 'root' in snapshot".to_string()))?;

        let mut arena = DomArena::new();
        let root_id = self
            .parse_node(&mut arena, root, None, 0)?
            .ok_or_else(|| DomError::Snapshot("Root node was filtered out".to_string()))?;
        arena.set_root(root_id)?;

        tracing::debug!("Loaded snapshot with {} nodes", arena.len());
        Ok(arena)
    }

    /// Parse one snapshot node and everything below it
    ///
    /// Returns `None` when the node is filtered out by config.
    fn parse_node(
        &self,
        arena: &mut DomArena,
        raw: &Value,
        parent_id: Option<NodeId>,
        depth: usize,
    ) -> Result<Option<NodeId>> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                current: depth,
                max: self.config.max_depth,
            });
        }

        let backend_node_id = raw["backendNodeId"]
            .as_u64()
            .ok_or_else(|| DomError::Snapshot("Missing backendNodeId".to_string()))?
            as u32;

        let node_type_val = raw["nodeType"]
            .as_u64()
            .ok_or_else(|| DomError::Snapshot("Missing nodeType".to_string()))?;

        let node_type = u8::try_from(node_type_val)
            .ok()
            .and_then(NodeType::from_u8)
            .ok_or_else(|| DomError::InvalidNodeType {
                expected: "valid NodeType".to_string(),
                actual: format!("{}", node_type_val),
            })?;

        let node_value = raw["nodeValue"].as_str().unwrap_or("");
        if node_type == NodeType::Text
            && !self.config.keep_whitespace_text
            && node_value.trim().is_empty()
        {
            return Ok(None);
        }

        let raw_name = raw["nodeName"].as_str().unwrap_or("");
        let mut node = if node_type == NodeType::Element {
            DomNode::element(backend_node_id, raw_name)
        } else {
            DomNode::new(backend_node_id, node_type, raw_name)
        };
        node.node_value = node_value.to_string();

        // Attributes come as a flat [name, value, name, value, ...] array
        if let Some(attrs) = raw["attributes"].as_array() {
            for pair in attrs.chunks_exact(2) {
                if let (Some(key), Some(value)) = (pair[0].as_str(), pair[1].as_str()) {
                    node.attributes.insert(key.to_string(), value.to_string());
                }
            }
        }

        let node_id = arena.add_node(node);
        if let Some(parent_id) = parent_id {
            arena.append_child(parent_id, node_id)?;
        }

        // Shadow roots and content documents are laid out as children, in
        // front of the light children
        for key in ["shadowRoots", "contentDocument", "children"] {
            let nested: Vec<&Value> = match &raw[key] {
                Value::Array(items) => items.iter().collect(),
                Value::Object(_) => vec![&raw[key]],
                _ => continue,
            };
            for child in nested {
                self.parse_node(arena, child, Some(node_id), depth + 1)?;
            }
        }

        Ok(Some(node_id))
    }
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}
