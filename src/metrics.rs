//! Solution-quality metrics used when reporting runs.
//!
//! - AVG: mean cost over repeated runs
//! - BF: best (lowest) cost found
//! - RPD: relative percentage difference to a reference (best-known) cost
//! - PI: improvement percentage of one algorithm's average over another's

use std::fmt;

/// Invalid metric input.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// No costs were supplied.
    EmptyCosts,
    /// A reference cost was zero or negative.
    NonPositiveReference(f64),
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::EmptyCosts => write!(f, "cost list is empty"),
            MetricsError::NonPositiveReference(r) => {
                write!(f, "reference cost must be positive, got {r}")
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Mean of `costs`.
pub fn avg_cost(costs: &[f64]) -> Result<f64, MetricsError> {
    if costs.is_empty() {
        return Err(MetricsError::EmptyCosts);
    }
    Ok(costs.iter().sum::<f64>() / costs.len() as f64)
}

/// Minimum of `costs`.
pub fn best_found(costs: &[f64]) -> Result<f64, MetricsError> {
    costs
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or(MetricsError::EmptyCosts)
}

/// Relative percentage difference `100 · (cost − reference) / reference`.
pub fn rpd(cost: f64, reference: f64) -> Result<f64, MetricsError> {
    if reference <= 0.0 {
        return Err(MetricsError::NonPositiveReference(reference));
    }
    Ok(100.0 * (cost - reference) / reference)
}

/// Improvement of `avg_a` over `avg_b`: `100 · (avg_b − avg_a) / avg_b`.
pub fn improvement_percentage(avg_a: f64, avg_b: f64) -> Result<f64, MetricsError> {
    if avg_b <= 0.0 {
        return Err(MetricsError::NonPositiveReference(avg_b));
    }
    Ok(100.0 * (avg_b - avg_a) / avg_b)
}
