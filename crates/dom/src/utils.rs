//! Utility functions for DOM processing

use crate::arena::DomArena;
use crate::error::Result;
use crate::tree::Tree;
use crate::types::{NodeId, NodeType};

/// Cap text length, respecting char boundaries
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Get all text content from node and its descendants
pub fn get_text_content(arena: &DomArena, node_id: NodeId) -> Result<String> {
    arena.get(node_id)?;

    let mut text = String::new();
    for id in arena.descendants(node_id) {
        let node = arena.get(id)?;
        if node.node_type == NodeType::Text {
            text.push_str(&node.node_value);
        }
    }

    Ok(text.trim().to_string())
}
