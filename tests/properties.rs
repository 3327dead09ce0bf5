//! Property tests over random small complete Euclidean instances.

use proptest::prelude::*;
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;
use u_clusteiner::alns::{
    cluster_components, AlnsSaConfig, AlnsSaRunner, ClusteredSteinerProblem, ComponentMst,
    CsvSink, Destroy, DestroyInfo, DestroyOperator, DisconnectCluster, GreedyPath, PartialState,
    RemoveGlobalEdges, Repair, RepairOperator, SearchProblem, StepClock,
};
use u_clusteiner::construct::two_level_mst;
use u_clusteiner::graph::{Instance, TreeEdge};
use u_clusteiner::random::create_rng;
use u_clusteiner::solution::{split_local_global, Solution};
use u_clusteiner::verify::verify;

/// `n` random points; the first two thirds are terminals dealt round-robin
/// into `h` clusters, the rest are Steiner vertices.
fn random_instance(n: usize, h: usize, seed: u64) -> Instance {
    let mut rng = create_rng(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
            edges.push((i, j, (dx * dx + dy * dy).sqrt().max(1e-6)));
        }
    }
    let terminals = n - n / 3;
    let mut clusters = vec![Vec::new(); h];
    for v in 0..terminals {
        clusters[v % h].push(v);
    }
    Instance::from_triples("rand", n, &edges, clusters).unwrap()
}

fn edge_set(edges: &[TreeEdge]) -> HashSet<TreeEdge> {
    edges.iter().copied().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn baseline_is_a_feasible_tree(n in 5usize..11, h in 2usize..4, seed in any::<u64>()) {
        let inst = random_instance(n, h, seed);
        let sol = two_level_mst(&inst).unwrap();
        let report = verify(&inst, &sol);
        prop_assert!(report.is_feasible(), "{:?}", report.messages());

        let touched = sol.touched_vertices();
        prop_assert_eq!(sol.num_edges() + 1, touched.len());
        for t in inst.terminals() {
            prop_assert!(touched.contains(&t));
        }
    }

    #[test]
    fn dropping_a_baseline_edge_breaks_feasibility(
        n in 5usize..11,
        h in 2usize..4,
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let inst = random_instance(n, h, seed);
        let sol = two_level_mst(&inst).unwrap();
        let mut edges = sol.edges.clone();
        edges.remove(pick.index(edges.len()));
        let broken = Solution::from_edges(&inst, edges).unwrap();
        prop_assert!(!verify(&inst, &broken).is_feasible());
    }

    #[test]
    fn destroy_partitions_global_edges(
        n in 5usize..11,
        h in 2usize..4,
        seed in any::<u64>(),
        k in 0usize..5,
    ) {
        let inst = random_instance(n, h, seed);
        let sol = two_level_mst(&inst).unwrap();
        let (local, global) = split_local_global(&inst, &sol.edges);

        let ops = [
            Destroy::RemoveGlobalEdges(RemoveGlobalEdges::new(k)),
            Destroy::DisconnectCluster(DisconnectCluster),
        ];
        for op in &ops {
            let ps = op.destroy(&inst, &sol, &mut create_rng(seed));
            prop_assert_eq!(&ps.local_edges, &local);

            let remaining = edge_set(&ps.remaining);
            let removed = edge_set(&ps.removed);
            prop_assert!(remaining.is_disjoint(&removed));
            let union: HashSet<TreeEdge> = remaining.union(&removed).copied().collect();
            prop_assert_eq!(union, edge_set(&global));
            prop_assert_eq!(ps.remaining.len() + ps.removed.len(), global.len());
        }
    }

    #[test]
    fn repair_keeps_local_edges_and_reconnects(
        n in 5usize..11,
        h in 2usize..4,
        seed in any::<u64>(),
        k in 1usize..4,
    ) {
        let inst = random_instance(n, h, seed);
        let sol = two_level_mst(&inst).unwrap();
        let mut rng = create_rng(seed);
        let destroy = Destroy::standard_pool(k);
        let repair = Repair::standard_pool(2);

        for d in &destroy {
            let ps = d.destroy(&inst, &sol, &mut rng);
            for r in &repair {
                let out = r.repair(&inst, &ps, &mut rng).unwrap();
                prop_assert_eq!(&out.edges[..ps.local_edges.len()], &ps.local_edges[..]);

                let (local, global) = split_local_global(&inst, &out.edges);
                prop_assert_eq!(&local, &ps.local_edges);
                prop_assert_eq!(cluster_components(&inst, &global).len(), 1);
                prop_assert!(edge_set(&ps.remaining).is_subset(&edge_set(&global)));

                let cost = out.recompute_cost(&inst).unwrap();
                prop_assert!((cost - out.cost).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn repair_of_connected_state_adds_nothing(
        n in 5usize..11,
        h in 2usize..4,
        seed in any::<u64>(),
    ) {
        let inst = random_instance(n, h, seed);
        let sol = two_level_mst(&inst).unwrap();
        let (local, global) = split_local_global(&inst, &sol.edges);
        let ps = PartialState::new(
            &inst,
            &sol,
            local,
            global,
            Vec::new(),
            DestroyInfo::RemoveGlobalEdges { requested: 0, removed: 0 },
        );
        prop_assert_eq!(ps.num_components(), 1);

        let mut rng = create_rng(seed);
        let r1 = GreedyPath.repair(&inst, &ps, &mut rng).unwrap();
        let r3 = ComponentMst.repair(&inst, &ps, &mut rng).unwrap();
        prop_assert_eq!(&r1.edges, &ps.current_edges());
        prop_assert_eq!(&r3.edges, &ps.current_edges());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn search_log_is_deterministic(n in 5usize..9, h in 2usize..4, seed in any::<u64>()) {
        let inst = random_instance(n, h, seed);
        let problem = ClusteredSteinerProblem::new(&inst);
        let config = AlnsSaConfig::default()
            .with_seed(seed)
            .with_max_iterations(25)
            .with_time_limit(Duration::from_secs(600));

        let run = || {
            let mut sink = CsvSink::new(Vec::new()).unwrap();
            let result = AlnsSaRunner::run_with_clock(
                &problem,
                &Destroy::standard_pool(2),
                &Repair::standard_pool(3),
                &config,
                &mut sink,
                &StepClock::new(0.001),
            )
            .unwrap();
            (sink.into_inner(), result.best)
        };
        let (log_a, best_a) = run();
        let (log_b, best_b) = run();
        prop_assert_eq!(log_a, log_b);
        prop_assert_eq!(&best_a, &best_b);

        let initial = problem.initial_solution().unwrap();
        prop_assert!(best_a.cost <= initial.cost + 1e-9);
        prop_assert!(verify(&inst, &best_a).is_feasible());
    }
}
