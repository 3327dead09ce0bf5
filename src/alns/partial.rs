//! Partial states produced by destroy operators.

use crate::graph::{Instance, TreeEdge};
use crate::solution::Solution;
use petgraph::unionfind::UnionFind;

/// Cluster-level connected components.
///
/// Each cluster is contracted into a supernode, then joined through the
/// global edges present. Components list their cluster ids ascending and
/// are ordered by their smallest cluster id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterComponents {
    pub components: Vec<Vec<usize>>,
    /// Component index of each cluster.
    pub cluster_to_component: Vec<usize>,
}

impl ClusterComponents {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Every terminal of every cluster in component `c`.
    pub fn terminals_of(&self, instance: &Instance, c: usize) -> Vec<usize> {
        self.components[c]
            .iter()
            .flat_map(|&k| instance.clusters()[k].iter().copied())
            .collect()
    }
}

/// Computes the cluster-level components induced by `global_edges`.
///
/// Union-find runs over all vertices, so paths through non-terminal
/// vertices connect the clusters at their ends.
///
/// # Panics
/// Panics if an edge endpoint is not a vertex of `instance`.
pub fn cluster_components(instance: &Instance, global_edges: &[TreeEdge]) -> ClusterComponents {
    let mut dsu: UnionFind<usize> = UnionFind::new(instance.num_vertices());

    for terminals in instance.clusters() {
        if let Some((&first, rest)) = terminals.split_first() {
            for &t in rest {
                dsu.union(first, t);
            }
        }
    }
    for &(u, v) in global_edges {
        dsu.union(u, v);
    }

    let h = instance.num_clusters();
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut root_to_component: Vec<Option<usize>> = vec![None; instance.num_vertices()];
    let mut cluster_to_component = vec![0; h];

    for (k, terminals) in instance.clusters().iter().enumerate() {
        let root = dsu.find_mut(terminals[0]);
        let c = *root_to_component[root].get_or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[c].push(k);
        cluster_to_component[k] = c;
    }

    ClusterComponents {
        components,
        cluster_to_component,
    }
}

/// What a destroy operator did, with its own typed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyInfo {
    /// D1: `requested` global edges were asked for, `removed` were taken.
    RemoveGlobalEdges { requested: usize, removed: usize },
    /// D2: `cluster` is the cluster that lost an incident global edge, or
    /// `None` when no cluster had one.
    DisconnectCluster { cluster: Option<usize> },
}

impl DestroyInfo {
    /// Cluster the repair layer should reconnect from first, if any.
    pub fn focus_cluster(&self) -> Option<usize> {
        match *self {
            DestroyInfo::RemoveGlobalEdges { .. } => None,
            DestroyInfo::DisconnectCluster { cluster } => cluster,
        }
    }

    /// Whether the operator removed nothing.
    pub fn is_noop(&self) -> bool {
        match *self {
            DestroyInfo::RemoveGlobalEdges { removed, .. } => removed == 0,
            DestroyInfo::DisconnectCluster { cluster } => cluster.is_none(),
        }
    }
}

/// Intermediate structure between one destroy and one repair.
///
/// Local edges are never touched; `remaining` and `removed` partition the
/// base solution's global edges.
#[derive(Debug, Clone)]
pub struct PartialState<'a> {
    pub base: &'a Solution,
    pub local_edges: Vec<TreeEdge>,
    pub remaining: Vec<TreeEdge>,
    pub removed: Vec<TreeEdge>,
    pub components: ClusterComponents,
    pub info: DestroyInfo,
}

impl<'a> PartialState<'a> {
    /// Builds the state and computes its components from `remaining`.
    pub fn new(
        instance: &Instance,
        base: &'a Solution,
        local_edges: Vec<TreeEdge>,
        remaining: Vec<TreeEdge>,
        removed: Vec<TreeEdge>,
        info: DestroyInfo,
    ) -> Self {
        let components = cluster_components(instance, &remaining);
        Self {
            base,
            local_edges,
            remaining,
            removed,
            components,
            info,
        }
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn focus_cluster(&self) -> Option<usize> {
        self.info.focus_cluster()
    }

    /// Local edges followed by the remaining global edges.
    pub fn current_edges(&self) -> Vec<TreeEdge> {
        let mut edges = Vec::with_capacity(self.local_edges.len() + self.remaining.len());
        edges.extend_from_slice(&self.local_edges);
        edges.extend_from_slice(&self.remaining);
        edges
    }
}
