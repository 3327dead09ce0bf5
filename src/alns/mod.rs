//! Destroy/repair search over clustered Steiner trees.
//!
//! Each iteration removes some global edges from the current tree, then
//! reconnects the resulting cluster-level components; local edges survive
//! every cycle untouched. Candidates are accepted by the simulated annealing
//! (Metropolis) criterion and operators are drawn uniformly from the pools.
//!
//! # Operators
//!
//! | Name | Type | Kind |
//! |------|------|------|
//! | `D1_rm_k` | [`RemoveGlobalEdges`] | destroy |
//! | `D2_disc_cluster` | [`DisconnectCluster`] | destroy |
//! | `R1_dijkstra` | [`GreedyPath`] | repair |
//! | `R1_topL` | [`GreedyPathTopL`] | repair |
//! | `R3_comp_mst` | [`ComponentMst`] | repair |
//! | `R4_steiner_hub` | [`SteinerHub`] | repair |
//!
//! # References
//!
//! Ropke & Pisinger (2006), "An Adaptive Large Neighborhood Search Heuristic
//! for the Pickup and Delivery Problem with Time Windows"
//!
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod destroy;
mod error;
mod hub;
mod log;
mod partial;
mod repair;
mod runner;
mod types;

pub use config::AlnsSaConfig;
pub use destroy::{Destroy, DisconnectCluster, RemoveGlobalEdges};
pub use error::{RepairError, SearchError};
pub use hub::SteinerHub;
pub use log::{
    Clock, CsvSink, IterationRecord, IterationSink, StepClock, Stopwatch, CSV_HEADER,
};
pub use partial::{cluster_components, ClusterComponents, DestroyInfo, PartialState};
pub use repair::{ComponentMst, GreedyPath, GreedyPathTopL, Repair};
pub use runner::{metropolis_accept, AlnsSaRunner, SearchResult};
pub use types::{ClusteredSteinerProblem, DestroyOperator, RepairOperator, SearchProblem};
