//! Path scoring and top-k selection.
//!
//! Two path metrics are supported and never mixed:
//!
//! - [`ScoringMode::Additive`]: sum of edge weights. This is the enumerator's
//!   historical ranking metric; it is *not* a probability.
//! - [`ScoringMode::Multiplicative`]: product of edge weights, i.e. the success
//!   probability that [`most_reliable_path`](crate::most_reliable_path) maximizes.
//!
//! Scores look up each hop through the source node's edge list (first matching edge),
//! so a path with a hop that is not an edge is rejected with [`Error::InvalidPath`].

use crate::graph::{Graph, NodeId};

/// Errors for path scoring.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Consecutive path nodes are not joined by an edge.
    #[error("path step {from}->{to} is not an edge of the graph")]
    InvalidPath {
        /// Node the step leaves.
        from: NodeId,
        /// Node the step should reach.
        to: NodeId,
    },
    /// Paths must contain at least one node.
    #[error("cannot score an empty path")]
    EmptyPath,
}

/// Convenience result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

/// How a path's edge weights combine into a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoringMode {
    /// Sum of edge weights.
    #[default]
    Additive,
    /// Product of edge weights.
    Multiplicative,
}

/// Sort direction for [`rank_paths`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankOrder {
    /// Lowest score first.
    Ascending,
    /// Highest score first.
    #[default]
    Descending,
}

/// A path together with its score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredPath {
    /// Node ids, start to target.
    pub path: Vec<NodeId>,
    /// Score under `mode`.
    pub score: f64,
    /// Metric that produced `score`.
    pub mode: ScoringMode,
}

fn hop_weights<'a>(graph: &'a Graph, path: &'a [NodeId]) -> impl Iterator<Item = Result<f64>> + 'a {
    path.windows(2).map(move |w| {
        graph
            .edge_weight(w[0], w[1])
            .ok_or(Error::InvalidPath {
                from: w[0],
                to: w[1],
            })
    })
}

/// Additive score: sum of edge weights along `path`.
pub fn score(graph: &Graph, path: &[NodeId]) -> Result<f64> {
    score_with(graph, path, ScoringMode::Additive)
}

/// Multiplicative score: product of edge weights along `path`.
pub fn path_probability(graph: &Graph, path: &[NodeId]) -> Result<f64> {
    score_with(graph, path, ScoringMode::Multiplicative)
}

/// Score `path` under `mode`. A single-node path scores `0` (additive) or `1` (multiplicative).
pub fn score_with(graph: &Graph, path: &[NodeId], mode: ScoringMode) -> Result<f64> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }
    let mut acc = match mode {
        ScoringMode::Additive => 0.0,
        ScoringMode::Multiplicative => 1.0,
    };
    for w in hop_weights(graph, path) {
        let w = w?;
        match mode {
            ScoringMode::Additive => acc += w,
            ScoringMode::Multiplicative => acc *= w,
        }
    }
    Ok(acc)
}

fn scored(graph: &Graph, paths: &[Vec<NodeId>], mode: ScoringMode) -> Result<Vec<ScoredPath>> {
    paths
        .iter()
        .map(|p| {
            Ok(ScoredPath {
                path: p.clone(),
                score: score_with(graph, p, mode)?,
                mode,
            })
        })
        .collect()
}

/// Sort `paths` by score and keep at most `k`.
///
/// The sort is stable, so equal scores keep their input (enumeration) order.
pub fn rank_paths(
    graph: &Graph,
    paths: &[Vec<NodeId>],
    mode: ScoringMode,
    order: RankOrder,
    k: usize,
) -> Result<Vec<ScoredPath>> {
    let mut ranked = scored(graph, paths, mode)?;
    match order {
        RankOrder::Ascending => ranked.sort_by(|a, b| a.score.total_cmp(&b.score)),
        RankOrder::Descending => ranked.sort_by(|a, b| b.score.total_cmp(&a.score)),
    }
    ranked.truncate(k);
    tracing::trace!(candidates = paths.len(), kept = ranked.len(), ?mode, ?order, "ranked paths");
    Ok(ranked)
}

/// The `k` highest additive scores, best first.
pub fn k_most_reliable(graph: &Graph, paths: &[Vec<NodeId>], k: usize) -> Result<Vec<ScoredPath>> {
    rank_paths(graph, paths, ScoringMode::Additive, RankOrder::Descending, k)
}

/// The `k` lowest additive scores, worst first.
pub fn k_least_reliable(graph: &Graph, paths: &[Vec<NodeId>], k: usize) -> Result<Vec<ScoredPath>> {
    rank_paths(graph, paths, ScoringMode::Additive, RankOrder::Ascending, k)
}

/// Highest-scoring path; the first one wins ties. `None` for no paths.
pub fn select_best(graph: &Graph, paths: &[Vec<NodeId>], mode: ScoringMode) -> Result<Option<ScoredPath>> {
    let mut best: Option<ScoredPath> = None;
    for p in scored(graph, paths, mode)? {
        if best.as_ref().map_or(true, |b| p.score > b.score) {
            best = Some(p);
        }
    }
    Ok(best)
}
