//! Feasibility verification.
//!
//! A solution is feasible when
//!
//! 1. every edge endpoint is a vertex of the instance,
//! 2. its edges form a tree over the vertices they touch (connected, and
//!    `|E| = |V| - 1`),
//! 3. every terminal is touched,
//! 4. the local trees of any two clusters share no vertex. The local tree
//!    of a cluster is the union of the tree paths between each pair of its
//!    terminals; a singleton cluster's local tree is its one terminal.
//!
//! All checks run and their violations accumulate in order.

use crate::graph::Instance;
use crate::solution::Solution;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;

/// One broken feasibility condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Violation {
    /// An edge endpoint lies outside `[0, n)`.
    EdgeOutOfRange { u: usize, v: usize, n: usize },
    /// The solution has no edges at all.
    EmptySolution,
    /// Some touched vertices are unreachable from `start`.
    Disconnected { start: usize, unreachable: Vec<usize> },
    /// `|E| != |V| - 1` over the touched vertices.
    EdgeCountMismatch { edges: usize, vertices: usize },
    /// Terminals that no edge touches.
    MissingTerminals { terminals: Vec<usize> },
    /// Two terminals of the cluster have no path between them.
    ClusterDisconnected { cluster: usize },
    /// The local trees of two clusters share vertices.
    ClusterOverlap {
        first: usize,
        second: usize,
        shared: Vec<usize>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EdgeOutOfRange { u, v, n } => {
                write!(f, "edge ({u}, {v}) outside vertex range [0, {n})")
            }
            Violation::EmptySolution => write!(f, "solution has no vertices (empty edge list)"),
            Violation::Disconnected { start, unreachable } => write!(
                f,
                "tree not connected: vertices unreachable from {start}: {unreachable:?}"
            ),
            Violation::EdgeCountMismatch { edges, vertices } => write!(
                f,
                "|E| = |V| - 1 does not hold ({edges} edges for {vertices} vertices)"
            ),
            Violation::MissingTerminals { terminals } => {
                write!(f, "terminals missing from solution: {terminals:?}")
            }
            Violation::ClusterDisconnected { cluster } => {
                write!(f, "terminals of cluster {cluster} are not connected in the solution")
            }
            Violation::ClusterOverlap {
                first,
                second,
                shared,
            } => write!(
                f,
                "local trees of clusters {first} and {second} share vertices {shared:?}"
            ),
        }
    }
}

/// Outcome of [`verify`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VerificationReport {
    pub violations: Vec<Violation>,
    /// Cost recomputed from the instance weights, when every edge is an
    /// instance edge.
    pub cost: Option<f64>,
}

impl VerificationReport {
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// Human-readable violation descriptions, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

type SolutionGraph = HashMap<usize, Vec<usize>>;

/// Checks `solution` against every feasibility condition of `instance`.
///
/// Pure; cost is O(h · r² · n) for h clusters of at most r terminals.
pub fn verify(instance: &Instance, solution: &Solution) -> VerificationReport {
    let mut violations = Vec::new();
    let n = instance.num_vertices();

    let mut adj: SolutionGraph = HashMap::new();
    for &(u, v) in &solution.edges {
        adj.entry(u).or_default().push(v);
        adj.entry(v).or_default().push(u);
    }
    let touched = solution.touched_vertices();

    for &(u, v) in &solution.edges {
        if u >= n || v >= n {
            violations.push(Violation::EdgeOutOfRange { u, v, n });
        }
    }

    check_tree(&adj, &touched, solution.edges.len(), &mut violations);

    let missing: Vec<usize> = instance
        .terminals()
        .into_iter()
        .filter(|t| !touched.contains(t))
        .collect();
    if !missing.is_empty() {
        violations.push(Violation::MissingTerminals { terminals: missing });
    }

    check_cluster_disjointness(instance, &adj, &mut violations);

    VerificationReport {
        violations,
        cost: solution.recompute_cost(instance),
    }
}

/// Shorthand for `verify(instance, solution).is_feasible()`.
pub fn is_feasible(instance: &Instance, solution: &Solution) -> bool {
    verify(instance, solution).is_feasible()
}

fn check_tree(
    adj: &SolutionGraph,
    touched: &BTreeSet<usize>,
    num_edges: usize,
    violations: &mut Vec<Violation>,
) {
    let Some(&start) = touched.iter().next() else {
        violations.push(Violation::EmptySolution);
        return;
    };

    let reached = bfs_parents(adj, start);
    let unreachable: Vec<usize> = touched
        .iter()
        .copied()
        .filter(|v| !reached.contains_key(v))
        .collect();
    if !unreachable.is_empty() {
        violations.push(Violation::Disconnected { start, unreachable });
    }

    if num_edges + 1 != touched.len() {
        violations.push(Violation::EdgeCountMismatch {
            edges: num_edges,
            vertices: touched.len(),
        });
    }
}

/// BFS parent map from `start`; the start maps to itself.
fn bfs_parents(adj: &SolutionGraph, start: usize) -> HashMap<usize, usize> {
    let mut parent = HashMap::new();
    parent.insert(start, start);
    let mut queue = VecDeque::from([start]);
    while let Some(u) = queue.pop_front() {
        for &v in adj.get(&u).map(Vec::as_slice).unwrap_or_default() {
            if let std::collections::hash_map::Entry::Vacant(slot) = parent.entry(v) {
                slot.insert(u);
                queue.push_back(v);
            }
        }
    }
    parent
}

/// Local-tree vertex set of one cluster, and whether every pair of its
/// terminals was connected.
fn local_tree_vertices(adj: &SolutionGraph, terminals: &[usize]) -> (BTreeSet<usize>, bool) {
    let mut vertices = BTreeSet::new();
    let mut connected = true;

    if let [only] = terminals {
        vertices.insert(*only);
        return (vertices, connected);
    }

    for (i, &a) in terminals.iter().enumerate() {
        let parent = bfs_parents(adj, a);
        for &b in &terminals[i + 1..] {
            if !parent.contains_key(&b) {
                connected = false;
                continue;
            }
            let mut cur = b;
            vertices.insert(cur);
            while cur != a {
                cur = parent[&cur];
                vertices.insert(cur);
            }
        }
    }
    (vertices, connected)
}

fn check_cluster_disjointness(
    instance: &Instance,
    adj: &SolutionGraph,
    violations: &mut Vec<Violation>,
) {
    let mut local_trees = Vec::with_capacity(instance.num_clusters());
    for (k, terminals) in instance.clusters().iter().enumerate() {
        let (vertices, connected) = local_tree_vertices(adj, terminals);
        if !connected {
            violations.push(Violation::ClusterDisconnected { cluster: k });
        }
        local_trees.push(vertices);
    }

    for i in 0..local_trees.len() {
        for j in (i + 1)..local_trees.len() {
            let shared: Vec<usize> = local_trees[i]
                .intersection(&local_trees[j])
                .copied()
                .collect();
            if !shared.is_empty() {
                violations.push(Violation::ClusterOverlap {
                    first: i,
                    second: j,
                    shared,
                });
            }
        }
    }
}
