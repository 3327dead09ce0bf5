//! ALNS + simulated annealing execution loop.

use super::config::AlnsSaConfig;
use super::error::SearchError;
use super::log::{Clock, IterationRecord, IterationSink, Stopwatch};
use super::types::{DestroyOperator, RepairOperator, SearchProblem};
use crate::metrics;
use crate::random::create_rng;
use crate::solution::Solution;
use rand::Rng;

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best solution found.
    pub best: Solution,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Iterations executed after the initial record.
    pub iterations: usize,

    /// Candidates that replaced the current solution.
    pub accepted_moves: usize,

    /// Times the best solution improved.
    pub improvements: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Clock reading when the loop exited.
    pub elapsed_secs: f64,
}

/// Metropolis acceptance for a feasible candidate.
///
/// Not worse: always accepted. Worse: accepted with probability
/// `exp(-(candidate - current) / temperature)`, or never once
/// `temperature <= floor`. Consumes one random draw only in the
/// probabilistic case.
pub fn metropolis_accept<R: Rng>(
    current: f64,
    candidate: f64,
    temperature: f64,
    floor: f64,
    rng: &mut R,
) -> bool {
    if candidate <= current {
        return true;
    }
    if temperature <= floor {
        return false;
    }
    let p = (-(candidate - current) / temperature).exp();
    rng.random::<f64>() < p
}

/// Executes the search.
pub struct AlnsSaRunner;

impl AlnsSaRunner {
    /// Runs the search against the wall clock.
    ///
    /// # Arguments
    /// * `problem` - Instance, initial-solution builder, cost and feasibility
    /// * `destroy_ops` - Destroy pool, sampled uniformly
    /// * `repair_ops` - Repair pool, sampled uniformly
    /// * `config` - Budgets and annealing parameters
    /// * `sink` - Receives one record per iteration, including iteration 0
    ///
    /// # Errors
    /// Invalid configuration, empty pools, non-positive reference cost,
    /// initial-solution failure (including edges outside the instance), repair invariant violations and sink I/O
    /// failures abort the run. Rejected candidates never do.
    pub fn run<P, D, R, S>(
        problem: &P,
        destroy_ops: &[D],
        repair_ops: &[R],
        config: &AlnsSaConfig,
        sink: &mut S,
    ) -> Result<SearchResult, SearchError>
    where
        P: SearchProblem,
        D: DestroyOperator,
        R: RepairOperator,
        S: IterationSink + ?Sized,
    {
        let clock = Stopwatch::start();
        Self::run_with_clock(problem, destroy_ops, repair_ops, config, sink, &clock)
    }

    /// Runs the search with an explicit clock.
    pub fn run_with_clock<P, D, RP, S, C>(
        problem: &P,
        destroy_ops: &[D],
        repair_ops: &[RP],
        config: &AlnsSaConfig,
        sink: &mut S,
        clock: &C,
    ) -> Result<SearchResult, SearchError>
    where
        P: SearchProblem,
        D: DestroyOperator,
        RP: RepairOperator,
        S: IterationSink + ?Sized,
        C: Clock + ?Sized,
    {
        config.validate().map_err(SearchError::InvalidConfig)?;
        if destroy_ops.is_empty() {
            return Err(SearchError::EmptyOperatorPool("destroy"));
        }
        if repair_ops.is_empty() {
            return Err(SearchError::EmptyOperatorPool("repair"));
        }

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let instance = problem.instance();

        // Initialize
        let mut current = problem.initial_solution()?;
        let n = instance.num_vertices();
        if let Some(&(u, v)) = current.edges.iter().find(|&&(u, v)| u >= n || v >= n) {
            return Err(SearchError::InitialVertexOutOfRange { u, v, num_vertices: n });
        }
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let reference = config.reference_cost.unwrap_or(current_cost);
        let gap = |cost: f64| {
            metrics::rpd(cost, reference).map_err(|_| SearchError::InvalidReferenceCost(reference))
        };
        let mut prev_rpd = gap(current_cost)?;
        let mut temperature = config.resolve_initial_temperature(current_cost);

        tracing::info!(
            instance = instance.name(),
            initial_cost = current_cost,
            reference,
            temperature,
            "search started"
        );

        sink.record(&IterationRecord {
            iter: 0,
            time_s: clock.elapsed_secs(),
            cost: current_cost,
            best_cost,
            rpd: prev_rpd,
            delta_rpd: 0.0,
            accepted: true,
            temp: temperature,
            destroy_op: "none".into(),
            repair_op: "none".into(),
            feasible: problem.is_feasible(&current),
            num_edges: problem.edge_count(&current),
        })?;

        let time_limit = config.time_limit.as_secs_f64();
        let mut iteration = 0usize;
        let mut accepted_moves = 0usize;
        let mut improvements = 0usize;

        while iteration < config.max_iterations && clock.elapsed_secs() < time_limit {
            iteration += 1;

            let destroy = &destroy_ops[rng.random_range(0..destroy_ops.len())];
            let repair = &repair_ops[rng.random_range(0..repair_ops.len())];

            let partial = destroy.destroy(instance, &current, &mut rng);
            let candidate = repair.repair(instance, &partial, &mut rng)?;
            let candidate_cost = problem.cost(&candidate);
            let destroy_noop = partial.info.is_noop();

            // infeasible candidates are rejected without a random draw
            let accepted = problem.is_feasible(&candidate)
                && metropolis_accept(
                    current_cost,
                    candidate_cost,
                    temperature,
                    config.temperature_floor,
                    &mut rng,
                );
            if accepted {
                current = candidate;
                current_cost = candidate_cost;
                accepted_moves += 1;
            }

            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
                improvements += 1;
            }

            let rpd = gap(current_cost)?;
            tracing::debug!(
                iteration,
                destroy = destroy.name(),
                repair = repair.name(),
                destroy_noop,
                candidate_cost,
                current_cost,
                best_cost,
                accepted,
                "iteration"
            );
            sink.record(&IterationRecord {
                iter: iteration,
                time_s: clock.elapsed_secs(),
                cost: current_cost,
                best_cost,
                rpd,
                delta_rpd: rpd - prev_rpd,
                accepted,
                temp: temperature,
                destroy_op: destroy.name().to_string(),
                repair_op: repair.name().to_string(),
                feasible: problem.is_feasible(&current),
                num_edges: problem.edge_count(&current),
            })?;
            prev_rpd = rpd;

            temperature *= config.cooling_rate;
        }

        let elapsed_secs = clock.elapsed_secs();
        tracing::info!(
            instance = instance.name(),
            best_cost,
            iterations = iteration,
            accepted_moves,
            improvements,
            elapsed_secs,
            "search finished"
        );

        Ok(SearchResult {
            best,
            best_cost,
            iterations: iteration,
            accepted_moves,
            improvements,
            final_temperature: temperature,
            elapsed_secs,
        })
    }
}
