//! DOM Serializer - short human-readable renderings of nodes
//!
//! This module handles:
//! - One-line node labels (`p#intro.lead`, `#text "hello"`, `#comment`)
//! - Indented outlines of a subtree
//!
//! Used for logging traversal results and for readable test assertions.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;
use crate::utils::cap_text_length;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Attributes rendered as `[name=value]` after id/class
    pub include_attributes: Vec<String>,
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            include_attributes: Vec::new(),
            max_text_length: 40,
        }
    }
}

/// DOM Tree Serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// One-line label for a node
    pub fn label(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let node = arena.get(node_id)?;

        let label = match node.node_type {
            NodeType::Element => {
                let mut out = node.node_name.clone();
                if let Some(id) = node.attr("id") {
                    out.push('#');
                    out.push_str(id);
                }
                if let Some(classes) = node.attr("class") {
                    for class in classes.split_ascii_whitespace() {
                        out.push('.');
                        out.push_str(class);
                    }
                }
                for attr_name in &self.config.include_attributes {
                    if let Some(value) = node.attr(attr_name) {
                        out.push_str(&format!("[{}={}]", attr_name, value));
                    }
                }
                out
            }
            NodeType::Text | NodeType::Comment | NodeType::CdataSection => {
                let text = node.node_value.trim();
                if text.is_empty() {
                    node.node_name.clone()
                } else {
                    format!(
                        "{} {:?}",
                        node.node_name,
                        cap_text_length(text, self.config.max_text_length)
                    )
                }
            }
            _ => node.node_name.clone(),
        };

        Ok(label)
    }

    /// Labels for a list of nodes, in order
    pub fn labels(&self, arena: &DomArena, node_ids: &[NodeId]) -> Result<Vec<String>> {
        node_ids.iter().map(|&id| self.label(arena, id)).collect()
    }

    /// Indented outline of the subtree rooted at `node_id`, one node per line
    pub fn outline(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        self.outline_node(arena, node_id, 0, &mut output)?;
        Ok(output)
    }

    fn outline_node(
        &self,
        arena: &DomArena,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        output.push_str(&"  ".repeat(depth));
        output.push_str(&self.label(arena, node_id)?);
        output.push('\n');

        for child_id in arena.children(node_id) {
            self.outline_node(arena, child_id, depth + 1, output)?;
        }
        Ok(())
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}
