//! Traversal operations
//!
//! jQuery-style queries over a set of source nodes. Each operation expands
//! every source with a sibling walk or a parent walk and merges the
//! expansions through [`map_nodes`], so results are always duplicate-free
//! and in first-occurrence order.
//!
//! | Operation                  | Walk                          | Boundary          |
//! |----------------------------|-------------------------------|-------------------|
//! | `contents`                 | children, every node type     | -                 |
//! | `children`                 | children, elements            | -                 |
//! | `parent`                   | parent link, elements         | -                 |
//! | `parents` / `parents_until`| parent chain                  | selector or nodes |
//! | `siblings`                 | children of parent minus self | -                 |
//! | `next` / `prev`            | nearest sibling               | -                 |
//! | `next_all` / `prev_all`    | sibling chain                 | -                 |
//! | `next_until` / `prev_until`| sibling chain                 | selector or nodes |
//! | `closest`                  | self, then parent chain       | match wins        |
//!
//! Filtered variants are a walk followed by [`Traversal::filter`].

use ahash::AHashSet;
use dom::{NodeId, Tree};

use crate::error::Result;
use crate::node_set::{map_nodes, NodeSet};
use crate::selector::{Selector, SelectorCompiler, Until};
use crate::walker::{walk, WalkMode};

/// Traversal queries bound to one tree
pub struct Traversal<'t, T> {
    tree: &'t T,
}

impl<T> Clone for Traversal<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Traversal<'_, T> {}

impl<'t, T: Tree> Traversal<'t, T> {
    pub fn new(tree: &'t T) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &'t T {
        self.tree
    }

    // ---- children -------------------------------------------------------

    /// Children of every node, text and comments included
    pub fn contents(&self, nodes: &[NodeId]) -> NodeSet {
        self.children_with(nodes, WalkMode::AllIncludingNonElements)
    }

    /// Element children of every node
    pub fn children(&self, nodes: &[NodeId]) -> NodeSet {
        self.children_with(nodes, WalkMode::All)
    }

    fn children_with(&self, nodes: &[NodeId], mode: WalkMode) -> NodeSet {
        let result = map_nodes(nodes, |_, node| {
            walk(self.tree, Some(node), mode, None, Until::None)
        });
        tracing::trace!(?mode, sources = nodes.len(), results = result.len(), "children");
        result
    }

    // ---- ancestors ------------------------------------------------------

    /// Element parent of every node
    pub fn parent(&self, nodes: &[NodeId]) -> NodeSet {
        map_nodes(nodes, |_, node| {
            self.tree
                .parent(node)
                .filter(|&parent| self.tree.is_element(parent))
        })
    }

    /// Element ancestors of every node, nearest first
    pub fn parents(&self, nodes: &[NodeId]) -> NodeSet {
        self.parents_until(nodes, Until::None)
    }

    /// Element ancestors of every node, up to but excluding the first
    /// ancestor that reaches `until`
    pub fn parents_until(&self, nodes: &[NodeId], until: Until<'_, T>) -> NodeSet {
        let result = map_nodes(nodes, |_, node| {
            self.tree
                .ancestors(node)
                .take_while(|&ancestor| !until.reached(self.tree, ancestor))
                .filter(|&ancestor| self.tree.is_element(ancestor))
                .collect::<Vec<_>>()
        });
        tracing::trace!(?until, sources = nodes.len(), results = result.len(), "parents");
        result
    }

    /// For every node, the node itself or its nearest ancestor matching
    /// `selector`
    pub fn closest<S>(&self, nodes: &[NodeId], selector: &S) -> NodeSet
    where
        S: Selector<T> + ?Sized,
    {
        map_nodes(nodes, |_, node| {
            self.self_and_ancestors(node)
                .find(|&candidate| selector.matches(self.tree, candidate))
        })
    }

    /// For every node, the node itself or its nearest ancestor that is one
    /// of `targets`
    pub fn closest_nodes(&self, nodes: &[NodeId], targets: &[NodeId]) -> NodeSet {
        let targets: AHashSet<NodeId> = targets.iter().copied().collect();
        map_nodes(nodes, |_, node| {
            self.self_and_ancestors(node)
                .find(|candidate| targets.contains(candidate))
        })
    }

    fn self_and_ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + 't {
        std::iter::once(node).chain(self.tree.ancestors(node))
    }

    // ---- siblings -------------------------------------------------------

    /// Element siblings of every node, the node itself excluded
    pub fn siblings(&self, nodes: &[NodeId]) -> NodeSet {
        self.siblings_with(nodes, WalkMode::All, Until::None)
    }

    /// Nearest following element sibling of every node
    pub fn next(&self, nodes: &[NodeId]) -> NodeSet {
        self.siblings_with(nodes, WalkMode::Next, Until::None)
    }

    /// Nearest preceding element sibling of every node
    pub fn prev(&self, nodes: &[NodeId]) -> NodeSet {
        self.siblings_with(nodes, WalkMode::Prev, Until::None)
    }

    /// All following element siblings of every node
    pub fn next_all(&self, nodes: &[NodeId]) -> NodeSet {
        self.siblings_with(nodes, WalkMode::NextAll, Until::None)
    }

    /// All preceding element siblings of every node, nearest first
    pub fn prev_all(&self, nodes: &[NodeId]) -> NodeSet {
        self.siblings_with(nodes, WalkMode::PrevAll, Until::None)
    }

    /// Following element siblings up to but excluding the first one that
    /// reaches `until`. With `Until::None` this is `next_all`.
    pub fn next_until(&self, nodes: &[NodeId], until: Until<'_, T>) -> NodeSet {
        self.siblings_with(nodes, WalkMode::NextUntil, until)
    }

    /// Preceding element siblings up to but excluding the first one that
    /// reaches `until`, nearest first. With `Until::None` this is `prev_all`.
    pub fn prev_until(&self, nodes: &[NodeId], until: Until<'_, T>) -> NodeSet {
        self.siblings_with(nodes, WalkMode::PrevUntil, until)
    }

    fn siblings_with(
        &self,
        nodes: &[NodeId],
        mode: WalkMode,
        until: Until<'_, T>,
    ) -> NodeSet {
        let result = map_nodes(nodes, |_, node| {
            walk(self.tree, self.tree.parent(node), mode, Some(node), until)
        });
        tracing::trace!(?mode, sources = nodes.len(), results = result.len(), "siblings");
        result
    }

    // ---- descendants ----------------------------------------------------

    /// Descendants of every node matching `selector`
    ///
    /// The search starts at each node's element children, so a source node
    /// never matches itself.
    pub fn find<S>(&self, nodes: &[NodeId], selector: &S) -> NodeSet
    where
        S: Selector<T> + ?Sized,
    {
        let result = map_nodes(nodes, |_, node| {
            walk(self.tree, Some(node), WalkMode::All, None, Until::None)
                .into_iter()
                .flat_map(|child| selector.match_all(self.tree, child))
                .collect::<Vec<_>>()
        });
        tracing::trace!(sources = nodes.len(), results = result.len(), "find");
        result
    }

    /// The `candidates` that are strict descendants of at least one of
    /// `nodes`, in candidate order
    pub fn find_nodes(&self, nodes: &[NodeId], candidates: &[NodeId]) -> NodeSet {
        let roots: AHashSet<NodeId> = nodes.iter().copied().collect();
        map_nodes(candidates, |_, candidate| {
            self.tree
                .ancestors(candidate)
                .any(|ancestor| roots.contains(&ancestor))
                .then_some(candidate)
        })
    }

    // ---- filtering ------------------------------------------------------

    /// Nodes matching `selector`, order kept
    pub fn filter<S>(&self, nodes: &[NodeId], selector: &S) -> NodeSet
    where
        S: Selector<T> + ?Sized,
    {
        nodes
            .iter()
            .copied()
            .filter(|&node| selector.matches(self.tree, node))
            .collect()
    }

    /// Nodes that are also in `allowed`, order kept
    pub fn filter_nodes(&self, nodes: &[NodeId], allowed: &[NodeId]) -> NodeSet {
        let allowed: AHashSet<NodeId> = allowed.iter().copied().collect();
        nodes
            .iter()
            .copied()
            .filter(|node| allowed.contains(node))
            .collect()
    }

    /// Does any node match `selector`?
    pub fn is<S>(&self, nodes: &[NodeId], selector: &S) -> bool
    where
        S: Selector<T> + ?Sized,
    {
        nodes.iter().any(|&node| selector.matches(self.tree, node))
    }

    /// Is any node one of `targets`?
    pub fn is_nodes(&self, nodes: &[NodeId], targets: &[NodeId]) -> bool {
        let targets: AHashSet<NodeId> = targets.iter().copied().collect();
        nodes.iter().any(|node| targets.contains(node))
    }

    /// `parents_until` followed by `filter`
    pub fn parents_filtered_until<S>(
        &self,
        nodes: &[NodeId],
        filter: &S,
        until: Until<'_, T>,
    ) -> NodeSet
    where
        S: Selector<T> + ?Sized,
    {
        self.filter(&self.parents_until(nodes, until), filter)
    }

    /// `next_until` followed by `filter`
    pub fn next_filtered_until<S>(
        &self,
        nodes: &[NodeId],
        filter: &S,
        until: Until<'_, T>,
    ) -> NodeSet
    where
        S: Selector<T> + ?Sized,
    {
        self.filter(&self.next_until(nodes, until), filter)
    }

    /// `prev_until` followed by `filter`
    pub fn prev_filtered_until<S>(
        &self,
        nodes: &[NodeId],
        filter: &S,
        until: Until<'_, T>,
    ) -> NodeSet
    where
        S: Selector<T> + ?Sized,
    {
        self.filter(&self.prev_until(nodes, until), filter)
    }

    // ---- selector text ----------------------------------------------------
    //
    // Each of these compiles its selector once, before walking anything, so
    // bad selector text fails the whole call with no partial result.

    /// `find` with selector text
    pub fn find_str<C>(
        &self,
        nodes: &[NodeId],
        compiler: &C,
        selector: &str,
    ) -> Result<NodeSet>
    where
        C: SelectorCompiler<T>,
    {
        let compiled = compile::<T, C>(compiler, selector)?;
        Ok(self.find(nodes, &compiled))
    }

    /// `filter` with selector text
    pub fn filter_str<C>(
        &self,
        nodes: &[NodeId],
        compiler: &C,
        selector: &str,
    ) -> Result<NodeSet>
    where
        C: SelectorCompiler<T>,
    {
        let compiled = compile::<T, C>(compiler, selector)?;
        Ok(self.filter(nodes, &compiled))
    }

    /// `closest` with selector text
    pub fn closest_str<C>(
        &self,
        nodes: &[NodeId],
        compiler: &C,
        selector: &str,
    ) -> Result<NodeSet>
    where
        C: SelectorCompiler<T>,
    {
        let compiled = compile::<T, C>(compiler, selector)?;
        Ok(self.closest(nodes, &compiled))
    }

    /// `parents_until` with selector text; empty text means no boundary
    pub fn parents_until_str<C>(
        &self,
        nodes: &[NodeId],
        compiler: &C,
        until: &str,
    ) -> Result<NodeSet>
    where
        C: SelectorCompiler<T>,
    {
        let compiled = compile_boundary::<T, C>(compiler, until)?;
        Ok(self.parents_until(nodes, boundary(&compiled)))
    }

    /// `next_until` with selector text; empty text means no boundary
    pub fn next_until_str<C>(
        &self,
        nodes: &[NodeId],
        compiler: &C,
        until: &str,
    ) -> Result<NodeSet>
    where
        C: SelectorCompiler<T>,
    {
        let compiled = compile_boundary::<T, C>(compiler, until)?;
        Ok(self.next_until(nodes, boundary(&compiled)))
    }

    /// `prev_until` with selector text; empty text means no boundary
    pub fn prev_until_str<C>(
        &self,
        nodes: &[NodeId],
        compiler: &C,
        until: &str,
    ) -> Result<NodeSet>
    where
        C: SelectorCompiler<T>,
    {
        let compiled = compile_boundary::<T, C>(compiler, until)?;
        Ok(self.prev_until(nodes, boundary(&compiled)))
    }
}

/// Compile selector text, logging rejections
pub fn compile<T, C>(compiler: &C, selector: &str) -> Result<C::Selector>
where
    T: Tree,
    C: SelectorCompiler<T>,
{
    tracing::debug!(selector, "Compiling selector");
    compiler.compile(selector).inspect_err(|err| {
        tracing::warn!(selector, error = %err, "Selector rejected");
    })
}

fn compile_boundary<T, C>(compiler: &C, until: &str) -> Result<Option<C::Selector>>
where
    T: Tree,
    C: SelectorCompiler<T>,
{
    if until.is_empty() {
        return Ok(None);
    }
    compile::<T, C>(compiler, until).map(Some)
}

fn boundary<'a, T, S>(compiled: &'a Option<S>) -> Until<'a, T>
where
    T: Tree,
    S: Selector<T>,
{
    match compiled {
        Some(selector) => Until::Selector(selector),
        None => Until::None,
    }
}
