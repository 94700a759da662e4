//! Most reliable path: maximize the product of edge probabilities.
//!
//! Treating each edge weight \(p_e\) as an independent success probability, the
//! reliability of a path is \(\prod_{e\in\pi} p_e\). Taking \(-\ln\) turns this into
//! an ordinary shortest-path problem:
//! \[
//! \arg\max_\pi \prod_{e\in\pi} p_e = \arg\min_\pi \sum_{e\in\pi} -\ln p_e .
//! \]
//! Because \(p_e \in [0, 1]\), every transformed cost is non-negative, so a
//! Dijkstra-style search with lazy deletion applies directly.
//!
//! A weight of `0` maps to a cost of `+inf` by IEEE arithmetic. Such an edge is only
//! used when nothing better reaches its destination, and the resulting path has
//! probability exactly `0`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{Graph, NodeId, Result};

/// Outcome of [`most_reliable_path`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReliablePath {
    /// Product of edge weights along `path`, in `[0, 1]`.
    pub probability: f64,
    /// Node ids from start to target inclusive; empty when the target is unreachable.
    pub path: Vec<NodeId>,
}

impl ReliablePath {
    /// The "no path" outcome: probability `0`, empty path.
    pub fn unreachable() -> Self {
        Self {
            probability: 0.0,
            path: Vec::new(),
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Transformed cost `-ln(probability)`.
    pub fn cost(&self) -> f64 {
        transformed_cost(self.probability)
    }
}

/// Additive cost of traversing an edge with success probability `weight`.
///
/// Returns `+inf` for a weight of `0`.
pub fn transformed_cost(weight: f64) -> f64 {
    if weight <= 0.0 {
        f64::INFINITY
    } else {
        -weight.ln()
    }
}

#[derive(Copy, Clone, Debug)]
struct State {
    cost: f64,
    node: NodeId,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we pop the cheapest (then lowest id).
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the path from `start` to `target` with the largest product of edge weights.
///
/// `start == target` yields `[start]` with probability `1`. An unreachable target
/// yields [`ReliablePath::unreachable`]. Only ids outside the graph are errors.
pub fn most_reliable_path(graph: &Graph, start: NodeId, target: NodeId) -> Result<ReliablePath> {
    graph.check_node(start)?;
    graph.check_node(target)?;

    // Index by node id; slot 0 is unused.
    let slots = graph.node_count() + 1;
    let mut dist = vec![f64::INFINITY; slots];
    let mut parent: Vec<Option<NodeId>> = vec![None; slots];
    let mut reached = vec![false; slots];
    let mut heap = BinaryHeap::new();

    dist[start] = 0.0;
    reached[start] = true;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node: u }) = heap.pop() {
        if cost > dist[u] {
            continue;
        }
        for e in graph.neighbors(u) {
            let v = e.to;
            let next = cost + transformed_cost(e.weight);
            // First arrival counts even at +inf, so zero-weight edges still connect.
            if !reached[v] || next < dist[v] {
                reached[v] = true;
                dist[v] = next;
                parent[v] = Some(u);
                heap.push(State {
                    cost: next,
                    node: v,
                });
            }
        }
    }

    if !reached[target] {
        tracing::debug!(start, target, "no path");
        return Ok(ReliablePath::unreachable());
    }

    let mut path = vec![target];
    let mut curr = target;
    while curr != start {
        match parent[curr] {
            Some(p) => {
                path.push(p);
                curr = p;
            }
            None => break,
        }
    }
    path.reverse();

    let probability = (-dist[target]).exp();
    tracing::debug!(start, target, probability, hops = path.len() - 1, "most reliable path");
    Ok(ReliablePath { probability, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Error;
    use proptest::prelude::*;

    // Best parallel edge per hop, which is the one the search relaxes through.
    fn product_along(g: &Graph, path: &[NodeId]) -> f64 {
        path.windows(2)
            .map(|w| {
                g.neighbors(w[0])
                    .iter()
                    .filter(|e| e.to == w[1])
                    .map(|e| e.weight)
                    .fold(0.0, f64::max)
            })
            .product()
    }

    #[test]
    fn prefers_higher_product_over_fewer_hops() {
        // 1->3 directly is 0.3; 1->2->3 is 0.9 * 0.9 = 0.81.
        let g = Graph::builder(3)
            .edge(1, 3, 0.3)
            .edge(1, 2, 0.9)
            .edge(2, 3, 0.9)
            .build()
            .unwrap();
        let r = most_reliable_path(&g, 1, 3).unwrap();
        assert_eq!(r.path, vec![1, 2, 3]);
        assert!((r.probability - 0.81).abs() < 1e-12);
        assert!((r.cost() - -(0.81f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn start_equals_target_is_trivial() {
        let g = Graph::from_adjacency(vec![vec![(2, 0.5)], vec![(1, 0.5)]]).unwrap();
        let r = most_reliable_path(&g, 2, 2).unwrap();
        assert_eq!(r.path, vec![2]);
        assert_eq!(r.probability, 1.0);
    }

    #[test]
    fn unreachable_target_is_not_an_error() {
        let g = Graph::from_adjacency(vec![vec![], vec![(1, 0.5)]]).unwrap();
        let r = most_reliable_path(&g, 1, 2).unwrap();
        assert_eq!(r, ReliablePath::unreachable());
        assert!(!r.is_found());
    }

    #[test]
    fn unknown_endpoints_are_errors() {
        let g = Graph::from_adjacency(vec![vec![(2, 0.5)], vec![]]).unwrap();
        assert_eq!(
            most_reliable_path(&g, 0, 2),
            Err(Error::UnknownNode { id: 0, n: 2 })
        );
        assert_eq!(
            most_reliable_path(&g, 1, 3),
            Err(Error::UnknownNode { id: 3, n: 2 })
        );
    }

    #[test]
    fn zero_weight_edge_is_used_only_as_a_last_resort() {
        // Sole connection: path returned, probability exactly 0.
        let g = Graph::from_adjacency(vec![vec![(2, 0.0)], vec![(3, 0.5)], vec![]]).unwrap();
        let r = most_reliable_path(&g, 1, 3).unwrap();
        assert_eq!(r.path, vec![1, 2, 3]);
        assert_eq!(r.probability, 0.0);
        assert!(r.cost().is_infinite());

        // Any positive alternative wins over the zero edge.
        let g = Graph::builder(3)
            .edge(1, 3, 0.0)
            .edge(1, 2, 0.01)
            .edge(2, 3, 0.01)
            .build()
            .unwrap();
        let r = most_reliable_path(&g, 1, 3).unwrap();
        assert_eq!(r.path, vec![1, 2, 3]);
        assert!((r.probability - 1e-4).abs() < 1e-15);
    }

    #[test]
    fn transformed_cost_is_finite_and_non_negative_for_positive_weights() {
        assert_eq!(transformed_cost(1.0), 0.0);
        assert!(transformed_cost(0.0).is_infinite());
        for w in [1e-300, 0.1, 0.5, 0.999] {
            let c = transformed_cost(w);
            assert!(c.is_finite() && c > 0.0, "w={w} c={c}");
        }
    }

    #[test]
    fn cycles_do_not_trap_the_search() {
        let g = Graph::from_adjacency(vec![
            vec![(2, 0.5)],
            vec![(1, 1.0), (3, 0.5)],
            vec![(2, 1.0)],
        ])
        .unwrap();
        let r = most_reliable_path(&g, 1, 3).unwrap();
        assert_eq!(r.path, vec![1, 2, 3]);
        assert!((r.probability - 0.25).abs() < 1e-12);
    }

    fn brute_force_best(g: &Graph, start: NodeId, target: NodeId) -> Option<f64> {
        fn go(
            g: &Graph,
            u: NodeId,
            target: NodeId,
            acc: f64,
            on_path: &mut Vec<bool>,
            best: &mut Option<f64>,
        ) {
            if u == target {
                *best = Some(best.map_or(acc, |b: f64| b.max(acc)));
                return;
            }
            on_path[u] = true;
            for e in g.neighbors(u) {
                if !on_path[e.to] {
                    go(g, e.to, target, acc * e.weight, on_path, best);
                }
            }
            on_path[u] = false;
        }
        let mut best = None;
        let mut on_path = vec![false; g.node_count() + 1];
        go(g, start, target, 1.0, &mut on_path, &mut best);
        best
    }

    fn small_query() -> impl Strategy<Value = (Graph, NodeId, NodeId)> {
        (2usize..=6).prop_flat_map(|n| {
            let rows = prop::collection::vec(
                prop::collection::vec((1..=n, 0.01f64..=1.0), 0..=3),
                n,
            );
            (rows, 1..=n, 1..=n)
                .prop_map(|(rows, s, t)| (Graph::from_adjacency(rows).unwrap(), s, t))
        })
    }

    proptest! {
        #[test]
        fn matches_brute_force_maximum_product((g, s, t) in small_query()) {
            let r = most_reliable_path(&g, s, t).unwrap();
            match brute_force_best(&g, s, t) {
                None => prop_assert!(!r.is_found()),
                Some(best) => {
                    prop_assert!(r.is_found());
                    prop_assert_eq!(r.path[0], s);
                    prop_assert_eq!(*r.path.last().unwrap(), t);
                    prop_assert!((r.probability - best).abs() < 1e-9, "got={} best={}", r.probability, best);
                    let direct = product_along(&g, &r.path);
                    prop_assert!((r.probability - direct).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn repeated_queries_agree((g, s, t) in small_query()) {
            prop_assert_eq!(most_reliable_path(&g, s, t), most_reliable_path(&g, s, t));
        }

        #[test]
        fn path_has_no_repeated_node((g, s, t) in small_query()) {
            let r = most_reliable_path(&g, s, t).unwrap();
            let mut seen = std::collections::HashSet::new();
            for &v in &r.path {
                prop_assert!(seen.insert(v));
            }
        }
    }
}
