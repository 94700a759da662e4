//! Reliability-optimal paths on directed graphs with probabilistic edge weights.
//!
//! Each edge carries the probability that traversing it succeeds. This crate answers
//! two questions about a path from `start` to `target`:
//!
//! - which single path is most likely to succeed ([`most_reliable_path`]), and
//! - what all the simple paths are, and how they rank under a path score
//!   ([`all_simple_paths`], [`rank_paths`]).
//!
//! Public invariants (must not change):
//! - A [`Graph`] is immutable once built; every query is a pure function of its inputs.
//! - Node ids are dense, `1..=n`. Id `0` is never valid.
//! - "No path" is an ordinary result (empty path, probability `0`), never an error.
//! - The solver's metric (product of weights) and the additive ranking metric are
//!   kept apart; see [`ScoringMode`].

pub mod graph;
pub mod rank;
pub mod reliable_path;
pub mod simple_paths;

pub use graph::{Edge, Graph, GraphBuilder, NodeId};
pub use rank::{
    k_least_reliable, k_most_reliable, path_probability, rank_paths, score, score_with,
    select_best, RankOrder, ScoredPath, ScoringMode,
};
pub use reliable_path::{most_reliable_path, transformed_cost, ReliablePath};
pub use simple_paths::{all_simple_paths, all_simple_paths_limited, Enumeration, EnumerationLimits};
