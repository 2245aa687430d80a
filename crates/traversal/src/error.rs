//! Error types for traversal
//!
//! Walks themselves cannot fail. Only turning selector text into a
//! compiled selector can.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraversalError>;

#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("Invalid selector {selector:?}: {reason}")]
    SelectorSyntax { selector: String, reason: String },
}

impl TraversalError {
    pub fn selector_syntax(selector: &str, reason: impl Into<String>) -> Self {
        TraversalError::SelectorSyntax {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
