//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Node {child} is already attached to parent {parent}")]
    AlreadyAttached { child: u32, parent: u32 },

    #[error("Attaching node {child} under {parent} would create a cycle")]
    WouldCycle { child: u32, parent: u32 },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Maximum tree depth exceeded: {current} > {max}")]
    MaxDepthExceeded { current: usize, max: usize },
}
