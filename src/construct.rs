//! Initial solution construction.
//!
//! The two-level MST baseline first spans each cluster with a minimum
//! spanning tree over its own terminals, then joins the clusters with a
//! minimum spanning tree whose edges are the cheapest direct terminal to
//! terminal edges between cluster pairs. Local trees only use their own
//! cluster's vertices, so the result is always cluster-disjoint.

use crate::graph::{normalize_edge, prim_dense, Instance, TreeEdge};
use crate::solution::Solution;
use std::fmt;

/// Failure to build the baseline from direct edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The terminals of a cluster cannot be spanned with direct edges
    /// among themselves.
    ClusterNotSpannable { cluster: usize },
    /// Some clusters have no direct terminal edge path joining them.
    ClustersNotSpannable,
    /// A produced edge has no weight in the instance.
    UnknownEdge { u: usize, v: usize },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::ClusterNotSpannable { cluster } => write!(
                f,
                "cluster {cluster} cannot be spanned with direct edges between its terminals"
            ),
            ConstructionError::ClustersNotSpannable => {
                write!(f, "clusters cannot be joined with direct terminal edges")
            }
            ConstructionError::UnknownEdge { u, v } => {
                write!(f, "edge ({u}, {v}) is not an instance edge")
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

/// Builds the two-level MST baseline.
///
/// # Errors
/// [`ConstructionError`] when direct edges are missing; on complete
/// graphs construction always succeeds.
pub fn two_level_mst(instance: &Instance) -> Result<Solution, ConstructionError> {
    let weights = instance.weights();
    let clusters = instance.clusters();
    let mut edges: Vec<TreeEdge> = Vec::new();

    for (k, terminals) in clusters.iter().enumerate() {
        let matrix: Vec<Vec<f64>> = terminals
            .iter()
            .map(|&a| {
                terminals
                    .iter()
                    .map(|&b| {
                        if a == b {
                            0.0
                        } else {
                            weights.get(a, b).unwrap_or(f64::INFINITY)
                        }
                    })
                    .collect()
            })
            .collect();
        let tree =
            prim_dense(&matrix).ok_or(ConstructionError::ClusterNotSpannable { cluster: k })?;
        edges.extend(
            tree.into_iter()
                .map(|(a, b)| normalize_edge(terminals[a], terminals[b])),
        );
    }

    let h = clusters.len();
    if h > 1 {
        // cheapest direct edge between each cluster pair
        let mut best: Vec<Vec<Option<(f64, TreeEdge)>>> = vec![vec![None; h]; h];
        for i in 0..h {
            for j in (i + 1)..h {
                let mut pair: Option<(f64, TreeEdge)> = None;
                for &u in &clusters[i] {
                    for &v in &clusters[j] {
                        if let Some(w) = weights.get(u, v) {
                            if pair.is_none_or(|(bw, _)| w < bw) {
                                pair = Some((w, normalize_edge(u, v)));
                            }
                        }
                    }
                }
                best[i][j] = pair;
                best[j][i] = pair;
            }
        }

        let matrix: Vec<Vec<f64>> = (0..h)
            .map(|i| {
                (0..h)
                    .map(|j| match best[i][j] {
                        _ if i == j => 0.0,
                        Some((w, _)) => w,
                        None => f64::INFINITY,
                    })
                    .collect()
            })
            .collect();
        let tree = prim_dense(&matrix).ok_or(ConstructionError::ClustersNotSpannable)?;
        for (a, b) in tree {
            let (_, edge) = best[a][b].ok_or(ConstructionError::ClustersNotSpannable)?;
            edges.push(edge);
        }
    }

    Solution::from_edges(instance, edges).map_err(|(u, v)| ConstructionError::UnknownEdge { u, v })
}
