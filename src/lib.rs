//! Adaptive large neighborhood search for the clustered Steiner tree
//! problem.
//!
//! Given a weighted undirected graph whose required vertices are partitioned
//! into clusters, find a low-cost tree that spans every required vertex while
//! the subtree induced by each cluster stays vertex-disjoint from every other
//! cluster's subtree.
//!
//! - **Graph model** ([`graph`]): validated, immutable [`graph::Instance`]
//!   with adjacency, symmetric weight lookup, multi-source Dijkstra and
//!   dense Prim.
//! - **Solutions** ([`solution`]): edge lists with cost, local/global edge
//!   classification.
//! - **Verifier** ([`verify`]): tree property, terminal coverage and
//!   cluster disjointness, reported as an ordered violation list.
//! - **Construction** ([`construct`]): two-level MST baseline.
//! - **Search** ([`alns`]): destroy operators, repair operators and the
//!   simulated annealing loop with a per-iteration log.
//! - **Metrics** ([`metrics`]): AVG, BF, RPD and improvement percentage.
//!
//! # Example
//!
//! ```
//! use u_clusteiner::alns::{AlnsSaConfig, AlnsSaRunner, ClusteredSteinerProblem, Destroy, Repair};
//! use u_clusteiner::alns::IterationRecord;
//! use u_clusteiner::graph::Instance;
//! use u_clusteiner::verify::verify;
//!
//! let instance = Instance::from_triples(
//!     "toy",
//!     5,
//!     &[(0, 1, 1.0), (1, 2, 2.0), (1, 3, 1.0), (3, 4, 3.0), (0, 2, 4.0), (2, 4, 5.0)],
//!     vec![vec![0], vec![2], vec![4]],
//! )
//! .unwrap();
//!
//! let problem = ClusteredSteinerProblem::new(&instance);
//! let config = AlnsSaConfig::default().with_max_iterations(50).with_seed(42);
//! let mut log: Vec<IterationRecord> = Vec::new();
//! let result = AlnsSaRunner::run(
//!     &problem,
//!     &Destroy::standard_pool(2),
//!     &Repair::standard_pool(3),
//!     &config,
//!     &mut log,
//! )
//! .unwrap();
//!
//! assert!(verify(&instance, &result.best).is_feasible());
//! assert!(result.best_cost <= 9.0);
//! ```

pub mod alns;
pub mod construct;
pub mod graph;
pub mod metrics;
pub mod random;
pub mod solution;
pub mod verify;
