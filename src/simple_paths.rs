//! Exhaustive enumeration of simple paths by depth-first backtracking.
//!
//! Every path from `start` to `target` that repeats no node is reported, in the
//! order a depth-first walk over edges in insertion order discovers them. Reaching
//! `target` closes the branch: the target is never an intermediate node.
//!
//! The number of simple paths grows exponentially with density. For anything but
//! small graphs, pass [`EnumerationLimits`] to bound the search.

use crate::graph::{Graph, NodeId, Result};

/// Budget for [`all_simple_paths_limited`]. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumerationLimits {
    /// Stop after this many paths have been recorded.
    pub max_paths: Option<usize>,
    /// Ignore paths with more than this many edges.
    pub max_depth: Option<usize>,
}

impl EnumerationLimits {
    /// No limits.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Builder: cap the number of recorded paths.
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }

    /// Builder: cap the number of edges per path.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Paths found by [`all_simple_paths_limited`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Simple paths in discovery order.
    pub paths: Vec<Vec<NodeId>>,
    /// Set when more than `max_paths` paths exist; the search stopped at the first extra one.
    pub truncated: bool,
}

struct Search<'a> {
    graph: &'a Graph,
    target: NodeId,
    limits: EnumerationLimits,
    on_path: Vec<bool>,
    path: Vec<NodeId>,
    found: Vec<Vec<NodeId>>,
    truncated: bool,
}

impl Search<'_> {
    fn full(&self) -> bool {
        self.limits.max_paths.is_some_and(|m| self.found.len() >= m)
    }

    fn visit(&mut self, u: NodeId) {
        if self.truncated {
            return;
        }
        self.path.push(u);
        if u == self.target {
            if self.full() {
                self.truncated = true;
            } else {
                self.found.push(self.path.clone());
            }
            self.path.pop();
            return;
        }
        let depth = self.path.len() - 1;
        if self.limits.max_depth.map_or(true, |d| depth < d) {
            self.on_path[u] = true;
            let graph = self.graph;
            let edges = graph.neighbors(u);
            for (i, e) in edges.iter().enumerate() {
                // Parallel edges lead to the same node sequence; explore once.
                if self.on_path[e.to] || edges[..i].iter().any(|p| p.to == e.to) {
                    continue;
                }
                self.visit(e.to);
                if self.truncated {
                    break;
                }
            }
            self.on_path[u] = false;
        }
        self.path.pop();
    }
}

/// Every simple path from `start` to `target`, in depth-first discovery order.
///
/// An unreachable target gives an empty list; `start == target` gives `[[start]]`.
pub fn all_simple_paths(graph: &Graph, start: NodeId, target: NodeId) -> Result<Vec<Vec<NodeId>>> {
    all_simple_paths_limited(graph, start, target, &EnumerationLimits::unbounded())
        .map(|e| e.paths)
}

/// [`all_simple_paths`] under an [`EnumerationLimits`] budget.
pub fn all_simple_paths_limited(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    limits: &EnumerationLimits,
) -> Result<Enumeration> {
    graph.check_node(start)?;
    graph.check_node(target)?;

    let mut search = Search {
        graph,
        target,
        limits: *limits,
        on_path: vec![false; graph.node_count() + 1],
        path: Vec::new(),
        found: Vec::new(),
        truncated: false,
    };
    search.visit(start);

    tracing::debug!(
        start,
        target,
        paths = search.found.len(),
        truncated = search.truncated,
        "enumerated simple paths"
    );
    Ok(Enumeration {
        paths: search.found,
        truncated: search.truncated,
    })
}
