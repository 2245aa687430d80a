//! Directional sibling walker
//!
//! Every sibling or child query is a walk along one sibling chain:
//!
//! ```text
//!   parent
//!     │ first_child
//!     ▼
//!   [c0] ⇄ [c1] ⇄ [pivot] ⇄ [c3] ⇄ [c4]
//!          ◄── Backward       Forward ──►
//! ```
//!
//! A [`WalkMode`] resolves to a [`WalkPlan`]: where to start, which way to
//! step, whether non-elements are skipped, whether one node is enough and
//! whether a boundary applies. The plan then composes plain iterator
//! adapters over the raw [`SiblingChain`].

use dom::{NodeId, Tree};
use smallvec::SmallVec;

use crate::selector::Until;

/// Nodes produced by one walk. Most walks yield only a few nodes.
pub type Walked = SmallVec<[NodeId; 8]>;

/// Which nodes a sibling walk produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkMode {
    /// Preceding elements, stopping before the boundary
    PrevUntil,
    /// All preceding elements, nearest first
    PrevAll,
    /// Nearest preceding element
    Prev,
    /// Element children of the parent, pivot excluded
    All,
    /// Nearest following element
    Next,
    /// All following elements
    NextAll,
    /// Following elements, stopping before the boundary
    NextUntil,
    /// Children of the parent of every node type, pivot excluded
    AllIncludingNonElements,
}

impl WalkMode {
    pub fn direction(self) -> Direction {
        match self {
            WalkMode::PrevUntil | WalkMode::PrevAll | WalkMode::Prev => Direction::Backward,
            WalkMode::All
            | WalkMode::Next
            | WalkMode::NextAll
            | WalkMode::NextUntil
            | WalkMode::AllIncludingNonElements => Direction::Forward,
        }
    }

    /// Walks starting at the parent's first child rather than next to the pivot
    pub fn is_children(self) -> bool {
        matches!(self, WalkMode::All | WalkMode::AllIncludingNonElements)
    }

    pub fn elements_only(self) -> bool {
        self != WalkMode::AllIncludingNonElements
    }

    pub fn is_single(self) -> bool {
        matches!(self, WalkMode::Prev | WalkMode::Next)
    }

    pub fn is_bounded(self) -> bool {
        matches!(self, WalkMode::PrevUntil | WalkMode::NextUntil)
    }
}

/// Link to follow from one sibling to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn step<T: Tree>(self, tree: &T, node: NodeId) -> Option<NodeId> {
        match self {
            Direction::Forward => tree.next_sibling(node),
            Direction::Backward => tree.prev_sibling(node),
        }
    }
}

/// Raw sibling chain in one direction, every node type, starting at `start`
pub struct SiblingChain<'t, T> {
    tree: &'t T,
    next: Option<NodeId>,
    direction: Direction,
}

impl<'t, T: Tree> SiblingChain<'t, T> {
    pub fn new(tree: &'t T, start: Option<NodeId>, direction: Direction) -> Self {
        Self {
            tree,
            next: start,
            direction,
        }
    }
}

impl<T: Tree> Iterator for SiblingChain<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.direction.step(self.tree, current);
        Some(current)
    }
}

/// A walk mode resolved against a concrete parent / pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkPlan {
    pub start: Option<NodeId>,
    pub direction: Direction,
    pub skip: Option<NodeId>,
    pub elements_only: bool,
    pub limit: usize,
    pub bounded: bool,
}

impl WalkPlan {
    /// Children modes start at `parent`'s first child; sibling modes start
    /// next to `pivot`. A missing anchor yields an empty plan.
    pub fn new<T: Tree>(
        tree: &T,
        mode: WalkMode,
        parent: Option<NodeId>,
        pivot: Option<NodeId>,
    ) -> Self {
        let direction = mode.direction();
        let start = if mode.is_children() {
            parent.and_then(|p| tree.first_child(p))
        } else {
            pivot.and_then(|p| direction.step(tree, p))
        };

        Self {
            start,
            direction,
            skip: pivot,
            elements_only: mode.elements_only(),
            limit: if mode.is_single() { 1 } else { usize::MAX },
            bounded: mode.is_bounded(),
        }
    }

    /// Run the plan. `until` is only consulted by bounded plans.
    pub fn run<T: Tree>(&self, tree: &T, until: Until<'_, T>) -> Walked {
        SiblingChain::new(tree, self.start, self.direction)
            .filter(|&node| Some(node) != self.skip)
            .filter(|&node| !self.elements_only || tree.is_element(node))
            .take_while(|&node| !(self.bounded && until.reached(tree, node)))
            .take(self.limit)
            .collect()
    }
}

/// Walk the children of `parent` (children modes) or the siblings of
/// `pivot` (sibling modes) according to `mode`.
pub fn walk<T: Tree>(
    tree: &T,
    parent: Option<NodeId>,
    mode: WalkMode,
    pivot: Option<NodeId>,
    until: Until<'_, T>,
) -> Walked {
    WalkPlan::new(tree, mode, parent, pivot).run(tree, until)
}
