//! Problem instance: vertices, weighted edges, clusters.

use super::lookup::WeightLookup;
use std::fmt;

/// An undirected weighted edge of the instance graph.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WeightedEdge {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

impl WeightedEdge {
    pub fn new(u: usize, v: usize, weight: f64) -> Self {
        Self { u, v, weight }
    }
}

impl From<(usize, usize, f64)> for WeightedEdge {
    fn from((u, v, weight): (usize, usize, f64)) -> Self {
        Self { u, v, weight }
    }
}

/// Reasons an instance is rejected at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    /// An edge endpoint is not a vertex id in `[0, n)`.
    EdgeOutOfRange { u: usize, v: usize, n: usize },
    /// An edge connects a vertex to itself.
    SelfLoop { vertex: usize },
    /// An edge weight is zero, negative, or not finite.
    InvalidWeight { u: usize, v: usize, weight: f64 },
    /// A cluster has no members.
    EmptyCluster { cluster: usize },
    /// A cluster lists a vertex id outside `[0, n)`.
    ClusterVertexOutOfRange {
        cluster: usize,
        vertex: usize,
        n: usize,
    },
    /// A vertex is listed in more than one cluster (or twice in one).
    OverlappingClusters {
        vertex: usize,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for InstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceError::EdgeOutOfRange { u, v, n } => {
                write!(f, "edge ({u}, {v}) has an endpoint outside [0, {n})")
            }
            InstanceError::SelfLoop { vertex } => write!(f, "self loop on vertex {vertex}"),
            InstanceError::InvalidWeight { u, v, weight } => {
                write!(f, "edge ({u}, {v}) has non-positive weight {weight}")
            }
            InstanceError::EmptyCluster { cluster } => write!(f, "cluster {cluster} is empty"),
            InstanceError::ClusterVertexOutOfRange { cluster, vertex, n } => write!(
                f,
                "cluster {cluster} lists vertex {vertex} outside [0, {n})"
            ),
            InstanceError::OverlappingClusters {
                vertex,
                first,
                second,
            } => write!(
                f,
                "vertex {vertex} appears in clusters {first} and {second}"
            ),
        }
    }
}

impl std::error::Error for InstanceError {}

/// A clustered Steiner tree instance.
///
/// Terminals are exactly the union of the clusters. The instance is
/// immutable once built; all lookups are derived in [`Instance::new`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instance {
    name: String,
    n: usize,
    edges: Vec<WeightedEdge>,
    clusters: Vec<Vec<usize>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    cluster_of: Vec<Option<usize>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    adjacency: Vec<Vec<(usize, f64)>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    weights: WeightLookup,
}

impl Instance {
    /// Validates the inputs and builds the instance.
    ///
    /// # Errors
    /// Returns the first violated invariant; malformed input is never
    /// repaired.
    pub fn new(
        name: impl Into<String>,
        n: usize,
        edges: Vec<WeightedEdge>,
        clusters: Vec<Vec<usize>>,
    ) -> Result<Self, InstanceError> {
        for e in &edges {
            if e.u >= n || e.v >= n {
                return Err(InstanceError::EdgeOutOfRange { u: e.u, v: e.v, n });
            }
            if e.u == e.v {
                return Err(InstanceError::SelfLoop { vertex: e.u });
            }
            if !(e.weight.is_finite() && e.weight > 0.0) {
                return Err(InstanceError::InvalidWeight {
                    u: e.u,
                    v: e.v,
                    weight: e.weight,
                });
            }
        }

        let mut cluster_of: Vec<Option<usize>> = vec![None; n];
        for (k, members) in clusters.iter().enumerate() {
            if members.is_empty() {
                return Err(InstanceError::EmptyCluster { cluster: k });
            }
            for &v in members {
                if v >= n {
                    return Err(InstanceError::ClusterVertexOutOfRange {
                        cluster: k,
                        vertex: v,
                        n,
                    });
                }
                if let Some(first) = cluster_of[v] {
                    return Err(InstanceError::OverlappingClusters {
                        vertex: v,
                        first,
                        second: k,
                    });
                }
                cluster_of[v] = Some(k);
            }
        }

        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for e in &edges {
            adjacency[e.u].push((e.v, e.weight));
            adjacency[e.v].push((e.u, e.weight));
        }
        let weights = WeightLookup::from_edges(&edges);

        Ok(Self {
            name: name.into(),
            n,
            edges,
            clusters,
            cluster_of,
            adjacency,
            weights,
        })
    }

    /// Same as [`Instance::new`] with edges given as `(u, v, weight)` triples.
    pub fn from_triples(
        name: impl Into<String>,
        n: usize,
        edges: &[(usize, usize, f64)],
        clusters: Vec<Vec<usize>>,
    ) -> Result<Self, InstanceError> {
        let edges = edges.iter().copied().map(WeightedEdge::from).collect();
        Self::new(name, n, edges, clusters)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of vertices `n`.
    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Cluster index of `v`, or `None` for non-required vertices.
    ///
    /// Out-of-range ids are reported as non-required.
    #[inline]
    pub fn cluster_of(&self, v: usize) -> Option<usize> {
        self.cluster_of.get(v).copied().flatten()
    }

    #[inline]
    pub fn is_terminal(&self, v: usize) -> bool {
        self.cluster_of(v).is_some()
    }

    /// All required vertices, sorted ascending.
    pub fn terminals(&self) -> Vec<usize> {
        (0..self.n).filter(|&v| self.is_terminal(v)).collect()
    }

    /// Neighbors of `v` with the connecting edge weight.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[(usize, f64)] {
        &self.adjacency[v]
    }

    /// Symmetric `(u, v) -> weight` lookup over the instance edges.
    pub fn weights(&self) -> &WeightLookup {
        &self.weights
    }
}
