//! jQuery-style traversal over a DOM tree
//!
//! Given a set of matched nodes, compute related sets: children, parents,
//! siblings, descendants. Results are duplicate-free and keep
//! first-occurrence order.
//!
//! ```text
//! &[NodeId] ──► Traversal ──► walker (one sibling chain per source)
//!                   │
//!                   └──────► node_set::map_nodes (merge, dedup) ──► NodeSet
//! ```
//!
//! The tree comes from [`dom::Tree`]; selector matching comes from the
//! caller through [`Selector`] / [`SelectorCompiler`].

pub mod error;
pub mod node_set;
pub mod selector;
pub mod traverse;
pub mod walker;

#[cfg(test)]
mod testing;

pub use error::{Result, TraversalError};
pub use node_set::{map_nodes, NodeSet};
pub use selector::{Selector, SelectorCompiler, Until};
pub use traverse::{compile, Traversal};
pub use walker::{walk, Direction, WalkMode, WalkPlan};
