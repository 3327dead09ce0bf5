//! Core traits for the destroy/repair search.

use super::error::RepairError;
use super::partial::PartialState;
use crate::construct::{two_level_mst, ConstructionError};
use crate::graph::Instance;
use crate::solution::Solution;
use crate::verify;
use rand::Rng;

/// A destroy operator removes global edges from a solution.
///
/// Local edges (inside one cluster) are carried over untouched; only the
/// global edges are split into remaining and removed.
///
/// # References
///
/// Ropke & Pisinger (2006), Section 2
pub trait DestroyOperator: Send + Sync {
    /// Name written to the iteration log.
    fn name(&self) -> &str;

    /// Produces a fresh partial state from `solution`.
    fn destroy<'a, R: Rng>(
        &self,
        instance: &Instance,
        solution: &'a Solution,
        rng: &mut R,
    ) -> PartialState<'a>;
}

/// A repair operator reconnects a partial state into a complete tree.
///
/// The output keeps the partial state's local edges exactly (same edges,
/// same order) and only adds global edges until a single cluster-level
/// component remains.
///
/// # References
///
/// Ropke & Pisinger (2006), Section 2
pub trait RepairOperator: Send + Sync {
    /// Name written to the iteration log.
    fn name(&self) -> &str;

    /// Repairs `partial` into a complete solution.
    ///
    /// # Errors
    /// [`RepairError`] on an internal invariant violation; never for a
    /// merely poor or infeasible result.
    fn repair<R: Rng>(
        &self,
        instance: &Instance,
        partial: &PartialState<'_>,
        rng: &mut R,
    ) -> Result<Solution, RepairError>;
}

/// Caller-supplied strategy functions for a search run.
///
/// Only [`instance`](SearchProblem::instance) and
/// [`initial_solution`](SearchProblem::initial_solution) are required.
/// Feasibility defaults to the full verifier; callers may substitute a
/// cheaper predicate.
pub trait SearchProblem {
    fn instance(&self) -> &Instance;

    /// Builds the starting solution.
    fn initial_solution(&self) -> Result<Solution, ConstructionError>;

    /// Cost of a solution. Lower is better.
    fn cost(&self, solution: &Solution) -> f64 {
        solution.cost
    }

    fn is_feasible(&self, solution: &Solution) -> bool {
        verify::is_feasible(self.instance(), solution)
    }

    /// Edge count reported in the iteration log.
    fn edge_count(&self, solution: &Solution) -> usize {
        solution.num_edges()
    }
}

/// Default problem: two-level MST start, stored cost, full verification.
#[derive(Debug, Clone, Copy)]
pub struct ClusteredSteinerProblem<'a> {
    instance: &'a Instance,
}

impl<'a> ClusteredSteinerProblem<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }
}

impl SearchProblem for ClusteredSteinerProblem<'_> {
    fn instance(&self) -> &Instance {
        self.instance
    }

    fn initial_solution(&self) -> Result<Solution, ConstructionError> {
        two_level_mst(self.instance)
    }
}
