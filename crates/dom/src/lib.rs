//! Arena DOM tree
//!
//! Read-mostly DOM storage with O(1) parent / child / sibling links.
//!
//! ## Core Design
//!
//! ```text
//! snapshot JSON → SnapshotLoader → DomArena (owned) → Tree (links) → traversal
//!                                      ↓
//!                               NodeId (u32)
//! ```
//!
//! The [`Tree`] trait is the only thing traversal code depends on; the
//! arena is one implementation of it.

pub mod arena;
pub mod error;
pub mod serializer;
pub mod snapshot;
pub mod tree;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use serializer::{DomSerializer, SerializerConfig};
pub use snapshot::{LoaderConfig, SnapshotLoader};
pub use tree::Tree;
pub use types::*;
