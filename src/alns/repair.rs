//! Repair operators.
//!
//! Every repair keeps the partial state's local edges exactly as given and
//! appends global edges until one cluster-level component remains. Output
//! edges are local edges first, then global edges in insertion order.
//!
//! - **R1** ([`GreedyPath`]): repeatedly connect a base component to the
//!   nearest terminal outside it along a shortest path.
//! - **R1-topL** ([`GreedyPathTopL`]): as R1, but draw the target among
//!   the `l` nearest candidates.
//! - **R3** ([`ComponentMst`]): minimum spanning tree over components,
//!   each tree edge expanded back into its shortest path.
//! - **R4** ([`SteinerHub`]): see [`super::hub`].

use super::error::RepairError;
use super::hub::SteinerHub;
use super::partial::{cluster_components, PartialState};
use super::types::RepairOperator;
use crate::graph::{prim_dense, Instance, ShortestPaths, TreeEdge};
use crate::solution::Solution;
use rand::Rng;
use std::collections::HashSet;

/// R1: greedy multi-source Dijkstra reconnection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyPath;

impl RepairOperator for GreedyPath {
    fn name(&self) -> &str {
        "R1_dijkstra"
    }

    fn repair<R: Rng>(
        &self,
        instance: &Instance,
        partial: &PartialState<'_>,
        rng: &mut R,
    ) -> Result<Solution, RepairError> {
        reconnect_greedy(instance, partial, None, rng)
    }
}

/// R1-topL: randomized greedy reconnection.
///
/// Candidates are the reachable out-of-component terminals, stably sorted
/// by distance; the target is drawn uniformly from the first `l` of them
/// (all of them when fewer exist). `l = 1` behaves like [`GreedyPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyPathTopL {
    pub l: usize,
}

impl Default for GreedyPathTopL {
    fn default() -> Self {
        Self { l: 5 }
    }
}

impl GreedyPathTopL {
    /// # Panics
    /// Panics if `l == 0`.
    pub fn new(l: usize) -> Self {
        assert!(l >= 1, "top-L pool must hold at least one candidate");
        Self { l }
    }
}

impl RepairOperator for GreedyPathTopL {
    fn name(&self) -> &str {
        "R1_topL"
    }

    fn repair<R: Rng>(
        &self,
        instance: &Instance,
        partial: &PartialState<'_>,
        rng: &mut R,
    ) -> Result<Solution, RepairError> {
        reconnect_greedy(instance, partial, Some(self.l), rng)
    }
}

/// R3: component-level minimum spanning tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentMst;

impl RepairOperator for ComponentMst {
    fn name(&self) -> &str {
        "R3_comp_mst"
    }

    fn repair<R: Rng>(
        &self,
        instance: &Instance,
        partial: &PartialState<'_>,
        _rng: &mut R,
    ) -> Result<Solution, RepairError> {
        reconnect_mst(instance, partial)
    }
}

/// Enum dispatch over the repair operators, for use in operator pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    GreedyPath(GreedyPath),
    GreedyPathTopL(GreedyPathTopL),
    ComponentMst(ComponentMst),
    SteinerHub(SteinerHub),
}

impl Repair {
    /// R1-topL (with `l`), R1, R3 and R4 (with default candidate cap).
    ///
    /// The order fixes which operator each seeded draw selects.
    pub fn standard_pool(l: usize) -> Vec<Repair> {
        vec![
            Repair::GreedyPathTopL(GreedyPathTopL::new(l)),
            Repair::GreedyPath(GreedyPath),
            Repair::ComponentMst(ComponentMst),
            Repair::SteinerHub(SteinerHub::default()),
        ]
    }
}

impl RepairOperator for Repair {
    fn name(&self) -> &str {
        match self {
            Repair::GreedyPath(r) => r.name(),
            Repair::GreedyPathTopL(r) => r.name(),
            Repair::ComponentMst(r) => r.name(),
            Repair::SteinerHub(r) => r.name(),
        }
    }

    fn repair<R: Rng>(
        &self,
        instance: &Instance,
        partial: &PartialState<'_>,
        rng: &mut R,
    ) -> Result<Solution, RepairError> {
        match self {
            Repair::GreedyPath(r) => r.repair(instance, partial, rng),
            Repair::GreedyPathTopL(r) => r.repair(instance, partial, rng),
            Repair::ComponentMst(r) => r.repair(instance, partial, rng),
            Repair::SteinerHub(r) => r.repair(instance, partial, rng),
        }
    }
}

/// Assembles `local ++ global` and prices it with the instance weights.
pub(crate) fn finish(
    instance: &Instance,
    local: &[TreeEdge],
    global: &[TreeEdge],
) -> Result<Solution, RepairError> {
    let mut edges = Vec::with_capacity(local.len() + global.len());
    edges.extend_from_slice(local);
    edges.extend_from_slice(global);
    let cost = instance
        .weights()
        .total(&edges)
        .map_err(|(u, v)| RepairError::UnknownEdge { u, v })?;
    Ok(Solution::new(instance.name(), cost, edges))
}

/// Shared loop of R1 and R1-topL; `top = None` picks the single nearest.
fn reconnect_greedy<R: Rng>(
    instance: &Instance,
    partial: &PartialState<'_>,
    top: Option<usize>,
    rng: &mut R,
) -> Result<Solution, RepairError> {
    let mut global = partial.remaining.clone();
    // a path may run along another cluster's local edge; that edge stays local
    let mut present: HashSet<TreeEdge> = partial.current_edges().into_iter().collect();

    loop {
        let comps = cluster_components(instance, &global);
        if comps.len() <= 1 {
            break;
        }

        let base = match partial.focus_cluster() {
            Some(c) => comps.cluster_to_component[c],
            None => rng.random_range(0..comps.len()),
        };
        let sp = ShortestPaths::multi_source(instance, &comps.terminals_of(instance, base));

        // out-of-component terminals in cluster order
        let mut candidates: Vec<(f64, usize)> = instance
            .clusters()
            .iter()
            .enumerate()
            .filter(|&(k, _)| comps.cluster_to_component[k] != base)
            .flat_map(|(_, terminals)| terminals.iter().copied())
            .filter(|&v| sp.is_reachable(v))
            .map(|v| (sp.distance(v), v))
            .collect();
        if candidates.is_empty() {
            return Err(RepairError::NoReachableTerminal {
                base_component: base,
            });
        }

        let target = match top {
            None => {
                candidates
                    .iter()
                    .copied()
                    .reduce(|best, c| if c.0 < best.0 { c } else { best })
                    .map(|(_, v)| v)
                    .ok_or(RepairError::NoReachableTerminal {
                        base_component: base,
                    })?
            }
            Some(l) => {
                candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
                let pool = l.clamp(1, candidates.len());
                candidates[rng.random_range(0..pool)].1
            }
        };

        let path = sp.path_edges(target);
        if path.is_empty() {
            return Err(RepairError::EmptyPath { target });
        }
        for e in path {
            if present.insert(e) {
                global.push(e);
            }
        }
    }

    finish(instance, &partial.local_edges, &global)
}

/// Body of R3; also the R4 fallback.
pub(crate) fn reconnect_mst(
    instance: &Instance,
    partial: &PartialState<'_>,
) -> Result<Solution, RepairError> {
    let mut global = partial.remaining.clone();
    let comps = &partial.components;
    let c = comps.len();
    if c <= 1 {
        return finish(instance, &partial.local_edges, &global);
    }

    let terminals: Vec<Vec<usize>> = (0..c).map(|i| comps.terminals_of(instance, i)).collect();
    let trees = shortest_path_trees(instance, &terminals);

    // nearest[i][j]: closest terminal of component j seen from component i
    let mut nearest: Vec<Vec<Option<(f64, usize)>>> = vec![vec![None; c]; c];
    for i in 0..c {
        for j in 0..c {
            if i == j {
                continue;
            }
            nearest[i][j] = terminals[j]
                .iter()
                .filter(|&&v| trees[i].is_reachable(v))
                .map(|&v| (trees[i].distance(v), v))
                .reduce(|best, cand| if cand.0 < best.0 { cand } else { best });
        }
    }

    let dist = |i: usize, j: usize| nearest[i][j].map_or(f64::INFINITY, |(d, _)| d);
    let matrix: Vec<Vec<f64>> = (0..c)
        .map(|i| {
            (0..c)
                .map(|j| if i == j { 0.0 } else { dist(i, j).min(dist(j, i)) })
                .collect()
        })
        .collect();
    let tree = prim_dense(&matrix).ok_or(RepairError::DisconnectedComponentTree { components: c })?;

    let mut present: HashSet<TreeEdge> = partial.current_edges().into_iter().collect();
    for (a, b) in tree {
        let path = match (nearest[a][b], nearest[b][a]) {
            (Some((da, ta)), back) if back.is_none_or(|(db, _)| da <= db) => {
                trees[a].path_edges(ta)
            }
            (_, Some((_, tb))) => trees[b].path_edges(tb),
            _ => return Err(RepairError::MissingTarget { from: a, to: b }),
        };
        if path.is_empty() {
            return Err(RepairError::EmptyPath { target: b });
        }
        for e in path {
            if present.insert(e) {
                global.push(e);
            }
        }
    }

    finish(instance, &partial.local_edges, &global)
}

/// One Dijkstra tree per component, in component order.
#[cfg(feature = "parallel")]
fn shortest_path_trees(instance: &Instance, sources: &[Vec<usize>]) -> Vec<ShortestPaths> {
    use rayon::prelude::*;
    sources
        .par_iter()
        .map(|s| ShortestPaths::multi_source(instance, s))
        .collect()
}

/// One Dijkstra tree per component, in component order.
#[cfg(not(feature = "parallel"))]
fn shortest_path_trees(instance: &Instance, sources: &[Vec<usize>]) -> Vec<ShortestPaths> {
    sources
        .iter()
        .map(|s| ShortestPaths::multi_source(instance, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alns::destroy::{DisconnectCluster, RemoveGlobalEdges};
    use crate::alns::partial::DestroyInfo;
    use crate::alns::types::DestroyOperator;
    use crate::random::create_rng;
    use crate::verify::verify;

    /// Clusters {0, 1}, {2}, {3}, {4}; 5 is a cheap central Steiner vertex.
    fn fixture() -> (Instance, Solution) {
        let inst = Instance::from_triples(
            "fx",
            6,
            &[
                (0, 1, 1.0),
                (1, 2, 2.0),
                (2, 5, 1.0),
                (5, 3, 1.0),
                (5, 4, 1.5),
                (0, 4, 6.0),
                (2, 3, 3.0),
                (3, 4, 2.5),
            ],
            vec![vec![0, 1], vec![2], vec![3], vec![4]],
        )
        .unwrap();
        let sol = Solution::from_edges(&inst, vec![(0, 1), (1, 2), (2, 5), (3, 5), (4, 5)])
            .unwrap();
        (inst, sol)
    }

    fn pool() -> Vec<Repair> {
        Repair::standard_pool(3)
    }

    #[test]
    fn test_repairs_reconnect_and_keep_local_edges() {
        let (inst, sol) = fixture();
        for seed in 0..30 {
            let mut rng = create_rng(seed);
            let ps = RemoveGlobalEdges::new(3).destroy(&inst, &sol, &mut rng);
            for op in pool() {
                let out = op.repair(&inst, &ps, &mut rng).unwrap();
                assert_eq!(&out.edges[..ps.local_edges.len()], &ps.local_edges[..]);
                let (_, global) = crate::solution::split_local_global(&inst, &out.edges);
                assert_eq!(cluster_components(&inst, &global).len(), 1, "{}", op.name());
                assert_eq!(out.recompute_cost(&inst), Some(out.cost));
            }
        }
    }

    #[test]
    fn test_connected_partial_is_returned_unchanged() {
        let (inst, sol) = fixture();
        let ps = PartialState::new(
            &inst,
            &sol,
            vec![(0, 1)],
            vec![(1, 2), (2, 5), (3, 5), (4, 5)],
            Vec::new(),
            DestroyInfo::RemoveGlobalEdges {
                requested: 0,
                removed: 0,
            },
        );
        let mut rng = create_rng(0);
        for op in pool() {
            let out = op.repair(&inst, &ps, &mut rng).unwrap();
            assert_eq!(out.edges, ps.current_edges(), "{}", op.name());
            assert!((out.cost - sol.cost).abs() < 1e-12);
        }
    }

    #[test]
    fn test_greedy_picks_nearest_terminal() {
        let (inst, sol) = fixture();
        // cluster 2 (vertex 3) cut off; nearest outside terminal is 5 -> 3
        let ps = PartialState::new(
            &inst,
            &sol,
            vec![(0, 1)],
            vec![(1, 2), (2, 5), (4, 5)],
            vec![(3, 5)],
            DestroyInfo::DisconnectCluster { cluster: Some(0) },
        );
        let mut rng = create_rng(1);
        let out = GreedyPath.repair(&inst, &ps, &mut rng).unwrap();
        assert_eq!(out.edges.last(), Some(&(3, 5)));
        assert!(verify(&inst, &out).is_feasible());
    }

    #[test]
    fn test_top_one_matches_greedy() {
        let (inst, sol) = fixture();
        for seed in 0..10 {
            let ps = DisconnectCluster.destroy(&inst, &sol, &mut create_rng(seed));
            let a = GreedyPath.repair(&inst, &ps, &mut create_rng(seed)).unwrap();
            let b = GreedyPathTopL::new(1)
                .repair(&inst, &ps, &mut create_rng(seed))
                .unwrap();
            assert_eq!(a.edges, b.edges);
        }
    }

    #[test]
    fn test_component_mst_on_two_clusters() {
        let inst = Instance::from_triples(
            "two",
            4,
            &[(0, 1, 1.0), (2, 3, 1.0), (1, 2, 5.0), (0, 3, 7.0)],
            vec![vec![0, 1], vec![2, 3]],
        )
        .unwrap();
        let sol = Solution::from_edges(&inst, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let ps = DisconnectCluster.destroy(&inst, &sol, &mut create_rng(3));
        assert_eq!(ps.num_components(), 2);
        let out = ComponentMst.repair(&inst, &ps, &mut create_rng(3)).unwrap();
        assert_eq!(out.edges, vec![(0, 1), (2, 3), (1, 2)]);
        assert!((out.cost - 7.0).abs() < 1e-12);
        assert!(verify(&inst, &out).is_feasible());
    }

    #[test]
    fn test_unreachable_component_is_fatal() {
        // vertex 2 has no edges at all
        let inst = Instance::from_triples(
            "cut",
            3,
            &[(0, 1, 1.0)],
            vec![vec![0], vec![1], vec![2]],
        )
        .unwrap();
        let sol = Solution::from_edges(&inst, vec![(0, 1)]).unwrap();
        let ps = RemoveGlobalEdges::new(1).destroy(&inst, &sol, &mut create_rng(0));
        let mut rng = create_rng(0);
        assert!(matches!(
            GreedyPath.repair(&inst, &ps, &mut rng),
            Err(RepairError::NoReachableTerminal { .. })
        ));
        assert!(matches!(
            ComponentMst.repair(&inst, &ps, &mut rng),
            Err(RepairError::DisconnectedComponentTree { components: 3 })
        ));
    }

    #[test]
    fn test_standard_pool_order() {
        let pool = pool();
        let names: Vec<&str> = pool.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["R1_topL", "R1_dijkstra", "R3_comp_mst", "R4_steiner_hub"]
        );
    }

    #[test]
    fn test_top_l_draws_only_among_nearest() {
        // cluster {0} reaches {1}, {2}, {3} directly at distances 1, 2, 3
        let inst = Instance::from_triples(
            "star",
            4,
            &[(0, 1, 1.0), (0, 2, 2.0), (0, 3, 3.0)],
            vec![vec![0], vec![1], vec![2], vec![3]],
        )
        .unwrap();
        let sol = Solution::from_edges(&inst, vec![(0, 1), (0, 2), (0, 3)]).unwrap();
        let ps = PartialState::new(
            &inst,
            &sol,
            Vec::new(),
            Vec::new(),
            sol.edges.clone(),
            DestroyInfo::DisconnectCluster { cluster: Some(0) },
        );

        let mut first = HashSet::new();
        for seed in 0..40 {
            let out = GreedyPathTopL::new(2)
                .repair(&inst, &ps, &mut create_rng(seed))
                .unwrap();
            assert!(verify(&inst, &out).is_feasible());
            first.insert(out.edges[0]);
        }
        assert_eq!(first, HashSet::from([(0, 1), (0, 2)]));
    }

    #[test]
    fn test_top_l_path_through_local_edge_keeps_it_local() {
        // from cluster {0, 1}: 2 at distance 2, 3 at distance 3 via 4 -> 2 -> 3
        let inst = Instance::from_triples(
            "pair",
            5,
            &[(0, 1, 1.0), (2, 3, 1.0), (1, 4, 1.0), (2, 4, 1.0)],
            vec![vec![0, 1], vec![2, 3]],
        )
        .unwrap();
        let sol = Solution::from_edges(&inst, vec![(0, 1), (2, 3), (1, 4), (2, 4)]).unwrap();
        let ps = PartialState::new(
            &inst,
            &sol,
            vec![(0, 1), (2, 3)],
            vec![(1, 4)],
            vec![(2, 4)],
            DestroyInfo::DisconnectCluster { cluster: Some(0) },
        );
        assert_eq!(ps.num_components(), 2);

        for seed in 0..40 {
            for op in [
                Repair::GreedyPathTopL(GreedyPathTopL::new(2)),
                Repair::ComponentMst(ComponentMst),
            ] {
                let out = op.repair(&inst, &ps, &mut create_rng(seed)).unwrap();
                assert_eq!(out.edges, vec![(0, 1), (2, 3), (1, 4), (2, 4)], "{}", op.name());
                assert!((out.cost - 4.0).abs() < 1e-12);
                assert!(verify(&inst, &out).is_feasible());
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_top_l_zero_panics() {
        let _ = GreedyPathTopL::new(0);
    }
}
