//! Destroy operators.
//!
//! - **D1** ([`RemoveGlobalEdges`]): drop `k` global edges sampled
//!   uniformly without replacement.
//! - **D2** ([`DisconnectCluster`]): cut one global edge incident to a
//!   randomly chosen cluster, and remember that cluster as the repair
//!   focus.
//!
//! Neither touches local edges.

use super::partial::{DestroyInfo, PartialState};
use super::types::DestroyOperator;
use crate::graph::{Instance, TreeEdge};
use crate::solution::{split_local_global, Solution};
use rand::seq::SliceRandom;
use rand::Rng;

/// D1: remove `min(k, |global|)` global edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveGlobalEdges {
    pub k: usize,
}

impl Default for RemoveGlobalEdges {
    fn default() -> Self {
        Self { k: 2 }
    }
}

impl RemoveGlobalEdges {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl DestroyOperator for RemoveGlobalEdges {
    fn name(&self) -> &str {
        "D1_rm_k"
    }

    fn destroy<'a, R: Rng>(
        &self,
        instance: &Instance,
        solution: &'a Solution,
        rng: &mut R,
    ) -> PartialState<'a> {
        let (local, global) = split_local_global(instance, &solution.edges);

        if global.is_empty() {
            tracing::trace!("D1: no global edge to remove");
            let info = DestroyInfo::RemoveGlobalEdges {
                requested: self.k,
                removed: 0,
            };
            return PartialState::new(instance, solution, local, global, Vec::new(), info);
        }

        let take = self.k.min(global.len());
        let picked = rand::seq::index::sample(rng, global.len(), take);
        let mut taken = vec![false; global.len()];
        let removed: Vec<TreeEdge> = picked
            .iter()
            .map(|i| {
                taken[i] = true;
                global[i]
            })
            .collect();
        let remaining: Vec<TreeEdge> = global
            .iter()
            .zip(&taken)
            .filter(|&(_, &t)| !t)
            .map(|(&e, _)| e)
            .collect();

        let info = DestroyInfo::RemoveGlobalEdges {
            requested: self.k,
            removed: removed.len(),
        };
        PartialState::new(instance, solution, local, remaining, removed, info)
    }
}

/// D2: remove exactly one global edge incident to one cluster.
///
/// Clusters are tried in random order until one with an incident global
/// edge is found; the edge is then drawn uniformly among its incident ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisconnectCluster;

impl DestroyOperator for DisconnectCluster {
    fn name(&self) -> &str {
        "D2_disc_cluster"
    }

    fn destroy<'a, R: Rng>(
        &self,
        instance: &Instance,
        solution: &'a Solution,
        rng: &mut R,
    ) -> PartialState<'a> {
        let (local, global) = split_local_global(instance, &solution.edges);

        let mut order: Vec<usize> = (0..instance.num_clusters()).collect();
        order.shuffle(rng);

        for c in order {
            let incident: Vec<usize> = global
                .iter()
                .enumerate()
                .filter(|&(_, &(u, v))| {
                    instance.cluster_of(u) == Some(c) || instance.cluster_of(v) == Some(c)
                })
                .map(|(i, _)| i)
                .collect();
            if incident.is_empty() {
                continue;
            }

            let pick = incident[rng.random_range(0..incident.len())];
            let removed = vec![global[pick]];
            let remaining: Vec<TreeEdge> = global
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != pick)
                .map(|(_, &e)| e)
                .collect();
            let info = DestroyInfo::DisconnectCluster { cluster: Some(c) };
            return PartialState::new(instance, solution, local, remaining, removed, info);
        }

        tracing::trace!("D2: no cluster has an incident global edge");
        let info = DestroyInfo::DisconnectCluster { cluster: None };
        PartialState::new(instance, solution, local, global, Vec::new(), info)
    }
}

/// Enum dispatch over the destroy operators, for use in operator pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destroy {
    RemoveGlobalEdges(RemoveGlobalEdges),
    DisconnectCluster(DisconnectCluster),
}

impl Destroy {
    /// D1 with the given `k` and D2.
    pub fn standard_pool(k: usize) -> Vec<Destroy> {
        vec![
            Destroy::RemoveGlobalEdges(RemoveGlobalEdges::new(k)),
            Destroy::DisconnectCluster(DisconnectCluster),
        ]
    }
}

impl DestroyOperator for Destroy {
    fn name(&self) -> &str {
        match self {
            Destroy::RemoveGlobalEdges(d) => d.name(),
            Destroy::DisconnectCluster(d) => d.name(),
        }
    }

    fn destroy<'a, R: Rng>(
        &self,
        instance: &Instance,
        solution: &'a Solution,
        rng: &mut R,
    ) -> PartialState<'a> {
        match self {
            Destroy::RemoveGlobalEdges(d) => d.destroy(instance, solution, rng),
            Destroy::DisconnectCluster(d) => d.destroy(instance, solution, rng),
        }
    }
}
