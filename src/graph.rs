//! Immutable directed graph with probabilistic edge weights.
//!
//! Nodes are identified by dense ids `1..=n`; id `0` is reserved and never valid.
//! Every node owns an ordered list of outgoing [`Edge`]s. Each edge weight is the
//! probability that traversing it succeeds, so it lies in `[0, 1]`.
//!
//! A weight of exactly `0` is accepted: it is a certain-failure edge, and the
//! reliability solver gives it an infinite transformed cost rather than rejecting it.

/// Dense node identifier (`1..=n`).
pub type NodeId = usize;

/// Errors raised while building a graph or addressing its nodes.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An edge points at a node outside `1..=n`.
    #[error("edge {from}->{to} points outside the node range 1..={n}")]
    DestinationOutOfRange {
        /// Source node of the offending edge.
        from: NodeId,
        /// Destination that failed the range check.
        to: NodeId,
        /// Number of nodes in the graph.
        n: usize,
    },
    /// An edge was added from a node outside `1..=n`.
    #[error("edge {from}->{to} starts outside the node range 1..={n}")]
    SourceOutOfRange {
        /// Source that failed the range check.
        from: NodeId,
        /// Destination of the offending edge.
        to: NodeId,
        /// Number of nodes in the graph.
        n: usize,
    },
    /// Edge weight is NaN or outside `[0, 1]`.
    #[error("edge {from}->{to} has weight {weight}, expected a probability in [0, 1]")]
    InvalidWeight {
        /// Source node of the offending edge.
        from: NodeId,
        /// Destination node of the offending edge.
        to: NodeId,
        /// The rejected weight.
        weight: f64,
    },
    /// A query named a node the graph does not have.
    #[error("unknown node {id}, graph has nodes 1..={n}")]
    UnknownNode {
        /// The requested id.
        id: NodeId,
        /// Number of nodes in the graph.
        n: usize,
    },
}

/// Convenience result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Outgoing edge, owned by its source node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Destination node id.
    pub to: NodeId,
    /// Probability that the edge is traversed successfully.
    pub weight: f64,
}

/// Directed graph over nodes `1..=n`, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    // adjacency[i] holds the out-edges of node i + 1
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph from adjacency rows.
    ///
    /// `rows[i]` is the ordered list of `(destination, weight)` pairs leaving node
    /// `i + 1`, so the graph has `rows.len()` nodes.
    pub fn from_adjacency<R, E>(rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = E>,
        E: IntoIterator<Item = (NodeId, f64)>,
    {
        let adjacency: Vec<Vec<Edge>> = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(to, weight)| Edge { to, weight })
                    .collect()
            })
            .collect();
        Self::validated(adjacency)
    }

    /// Start a [`GraphBuilder`] for a graph with `n` nodes.
    pub fn builder(n: usize) -> GraphBuilder {
        GraphBuilder::new(n)
    }

    fn validated(adjacency: Vec<Vec<Edge>>) -> Result<Self> {
        let n = adjacency.len();
        let mut edge_count = 0;
        for (i, row) in adjacency.iter().enumerate() {
            let from = i + 1;
            for e in row {
                if e.to == 0 || e.to > n {
                    return Err(Error::DestinationOutOfRange { from, to: e.to, n });
                }
                if !(0.0..=1.0).contains(&e.weight) {
                    return Err(Error::InvalidWeight {
                        from,
                        to: e.to,
                        weight: e.weight,
                    });
                }
            }
            edge_count += row.len();
        }
        tracing::debug!(nodes = n, edges = edge_count, "built graph");
        Ok(Self {
            adjacency,
            edge_count,
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `id` names a node of this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id >= 1 && id <= self.adjacency.len()
    }

    /// All node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        1..=self.adjacency.len()
    }

    /// Outgoing edges of `id` in insertion order.
    ///
    /// Nodes without outgoing edges, and ids outside the graph, yield an empty slice.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        match id.checked_sub(1).and_then(|i| self.adjacency.get(i)) {
            Some(row) => row.as_slice(),
            None => &[],
        }
    }

    /// Weight of the first edge `from -> to`, if any.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.weight)
    }

    /// Error unless `id` names a node of this graph.
    pub fn check_node(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownNode {
                id,
                n: self.node_count(),
            })
        }
    }
}

/// Incremental construction of a [`Graph`]; validation happens in [`GraphBuilder::build`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    n: usize,
    edges: Vec<(NodeId, Edge)>,
}

impl GraphBuilder {
    /// Builder for a graph with nodes `1..=n`.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            edges: Vec::new(),
        }
    }

    /// Append the edge `from -> to` after any edges already leaving `from`.
    pub fn edge(mut self, from: NodeId, to: NodeId, weight: f64) -> Self {
        self.edges.push((from, Edge { to, weight }));
        self
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<Graph> {
        let n = self.n;
        let mut adjacency = vec![Vec::new(); n];
        for (from, e) in self.edges {
            if from == 0 || from > n {
                return Err(Error::SourceOutOfRange { from, to: e.to, n });
            }
            adjacency[from - 1].push(e);
        }
        Graph::validated(adjacency)
    }
}
