//! Candidate trees and local/global edge classification.

use crate::graph::{normalize_edge, Instance, TreeEdge};
use std::collections::BTreeSet;

/// A candidate tree over an instance.
///
/// Edges are stored normalized (smaller id first). Nothing here enforces
/// that they form a feasible tree; that is the job of
/// [`verify`](crate::verify::verify).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub instance_name: String,
    pub cost: f64,
    pub edges: Vec<TreeEdge>,
}

impl Solution {
    /// Builds a solution with an explicit cost, normalizing every edge.
    pub fn new(instance_name: impl Into<String>, cost: f64, edges: Vec<TreeEdge>) -> Self {
        Self {
            instance_name: instance_name.into(),
            cost,
            edges: edges.into_iter().map(|(u, v)| normalize_edge(u, v)).collect(),
        }
    }

    /// Builds a solution whose cost is the sum of its instance edge weights.
    ///
    /// # Errors
    /// Returns the first edge that is not an edge of `instance`.
    pub fn from_edges(instance: &Instance, edges: Vec<TreeEdge>) -> Result<Self, TreeEdge> {
        let mut solution = Self::new(instance.name(), 0.0, edges);
        solution.cost = instance.weights().total(&solution.edges)?;
        Ok(solution)
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Cost recomputed from the instance weights, `None` if some edge is
    /// not an instance edge.
    pub fn recompute_cost(&self, instance: &Instance) -> Option<f64> {
        instance.weights().total(&self.edges).ok()
    }

    /// Every vertex incident to at least one edge.
    pub fn touched_vertices(&self) -> BTreeSet<usize> {
        self.edges.iter().flat_map(|&(u, v)| [u, v]).collect()
    }
}

/// Role of an edge with respect to the clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Both endpoints are terminals of the same cluster.
    Local,
    /// Anything else: crosses clusters or touches a non-terminal.
    Global,
}

#[inline]
pub fn classify_edge(instance: &Instance, u: usize, v: usize) -> EdgeKind {
    match (instance.cluster_of(u), instance.cluster_of(v)) {
        (Some(a), Some(b)) if a == b => EdgeKind::Local,
        _ => EdgeKind::Global,
    }
}

/// Splits `edges` into `(local, global)`, normalizing each edge and
/// preserving input order within each side.
pub fn split_local_global(instance: &Instance, edges: &[TreeEdge]) -> (Vec<TreeEdge>, Vec<TreeEdge>) {
    let mut local = Vec::new();
    let mut global = Vec::new();
    for &(u, v) in edges {
        let e = normalize_edge(u, v);
        match classify_edge(instance, u, v) {
            EdgeKind::Local => local.push(e),
            EdgeKind::Global => global.push(e),
        }
    }
    (local, global)
}
