//! R4: Steiner-hub reconnection.
//!
//! Picks one unused non-terminal vertex and joins it to the nearest
//! terminal of every component with a direct edge. The hub is a fresh
//! vertex, so the `C` new edges and one new vertex cannot close a cycle.
//!
//! Candidates are a uniform sample of at most `max_candidates` unused
//! Steiner vertices; a candidate missing a direct edge to some component
//! is skipped. With no eligible candidate the operator falls back to
//! [`ComponentMst`](super::repair::ComponentMst).

use super::error::RepairError;
use super::partial::PartialState;
use super::repair::{finish, reconnect_mst};
use super::types::RepairOperator;
use crate::graph::{normalize_edge, Instance, TreeEdge};
use crate::solution::Solution;
use rand::Rng;
use std::collections::HashSet;

/// R4 operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteinerHub {
    /// Maximum number of hub candidates evaluated per call.
    pub max_candidates: usize,
}

impl Default for SteinerHub {
    fn default() -> Self {
        Self { max_candidates: 25 }
    }
}

impl SteinerHub {
    pub fn new(max_candidates: usize) -> Self {
        Self { max_candidates }
    }
}

impl RepairOperator for SteinerHub {
    fn name(&self) -> &str {
        "R4_steiner_hub"
    }

    fn repair<R: Rng>(
        &self,
        instance: &Instance,
        partial: &PartialState<'_>,
        rng: &mut R,
    ) -> Result<Solution, RepairError> {
        if partial.num_components() <= 1 {
            return finish(instance, &partial.local_edges, &partial.remaining);
        }

        let used: HashSet<usize> = partial
            .local_edges
            .iter()
            .chain(&partial.remaining)
            .flat_map(|&(u, v)| [u, v])
            .collect();
        let steiners: Vec<usize> = (0..instance.num_vertices())
            .filter(|&v| !instance.is_terminal(v) && !used.contains(&v))
            .collect();
        if steiners.is_empty() {
            tracing::debug!("R4: no unused Steiner vertex, falling back to R3");
            return reconnect_mst(instance, partial);
        }

        let comps = &partial.components;
        let groups: Vec<Vec<usize>> = (0..comps.len())
            .map(|c| comps.terminals_of(instance, c))
            .collect();
        let weights = instance.weights();

        let picked = rand::seq::index::sample(
            rng,
            steiners.len(),
            self.max_candidates.min(steiners.len()),
        );

        let mut best: Option<(f64, usize, Vec<usize>)> = None;
        for i in picked.iter() {
            let hub = steiners[i];
            let attach: Option<Vec<(f64, usize)>> = groups
                .iter()
                .map(|terminals| {
                    terminals
                        .iter()
                        .filter_map(|&t| weights.get(hub, t).map(|w| (w, t)))
                        .reduce(|b, c| if c.0 < b.0 { c } else { b })
                })
                .collect();
            let Some(attach) = attach else {
                continue;
            };

            let total: f64 = attach.iter().map(|&(w, _)| w).sum();
            if best.as_ref().is_none_or(|&(b, _, _)| total < b) {
                best = Some((total, hub, attach.into_iter().map(|(_, t)| t).collect()));
            }
        }

        let Some((total, hub, attach)) = best else {
            tracing::debug!("R4: no candidate hub reaches every component, falling back to R3");
            return reconnect_mst(instance, partial);
        };
        tracing::trace!(hub, total, components = comps.len(), "R4: hub selected");

        let mut global: Vec<TreeEdge> = partial.remaining.clone();
        global.extend(attach.into_iter().map(|t| normalize_edge(hub, t)));
        finish(instance, &partial.local_edges, &global)
    }
}
