//! Search configuration.

use std::time::Duration;

/// Configuration for the ALNS + simulated annealing loop.
///
/// # Budgets
///
/// The loop runs while fewer than `max_iterations` iterations have been
/// executed **and** less than `time_limit` has elapsed. Both are checked
/// only at the top of an iteration; a started iteration always completes.
///
/// # Acceptance Criterion
///
/// Metropolis: a feasible candidate no worse than the current solution is
/// always accepted; a worse one with probability `exp(-delta / T)` while
/// `T > temperature_floor`. `T` starts at `initial_temperature` (or
/// `initial_temperature_ratio` times the initial cost) and is multiplied by
/// `cooling_rate` after every iteration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_clusteiner::alns::AlnsSaConfig;
///
/// let config = AlnsSaConfig::default()
///     .with_max_iterations(1000)
///     .with_time_limit(Duration::from_secs(5))
///     .with_cooling_rate(0.999)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AlnsSaConfig {
    /// Wall-clock budget.
    pub time_limit: Duration,

    /// Iteration budget. Zero runs only the initial record.
    pub max_iterations: usize,

    /// Random seed for reproducibility. `None` draws one at random.
    pub seed: Option<u64>,

    /// Starting temperature. `None` derives it from the initial cost.
    pub initial_temperature: Option<f64>,

    /// Fraction of the initial cost used when `initial_temperature` is
    /// unset.
    pub initial_temperature_ratio: f64,

    /// Geometric cooling factor (alpha), in (0, 1).
    pub cooling_rate: f64,

    /// At or below this temperature, worse candidates are always rejected.
    pub temperature_floor: f64,

    /// Best-known cost for the relative gap. `None` uses the initial cost.
    pub reference_cost: Option<f64>,
}

impl Default for AlnsSaConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(2),
            max_iterations: 200,
            seed: None,
            initial_temperature: None,
            initial_temperature_ratio: 0.05,
            cooling_rate: 0.995,
            temperature_floor: 1e-12,
            reference_cost: None,
        }
    }
}

impl AlnsSaConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_initial_temperature(mut self, t0: f64) -> Self {
        self.initial_temperature = Some(t0);
        self
    }

    pub fn with_initial_temperature_ratio(mut self, ratio: f64) -> Self {
        self.initial_temperature_ratio = ratio;
        self
    }

    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    pub fn with_temperature_floor(mut self, floor: f64) -> Self {
        self.temperature_floor = floor;
        self
    }

    pub fn with_reference_cost(mut self, cost: f64) -> Self {
        self.reference_cost = Some(cost);
        self
    }

    /// Starting temperature for a run whose initial cost is `initial_cost`.
    pub fn resolve_initial_temperature(&self, initial_cost: f64) -> f64 {
        self.initial_temperature
            .unwrap_or(self.initial_temperature_ratio * initial_cost)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if let Some(t0) = self.initial_temperature {
            if !t0.is_finite() || t0 < 0.0 {
                return Err(format!(
                    "initial_temperature must be finite and non-negative, got {t0}"
                ));
            }
        }
        if !self.initial_temperature_ratio.is_finite() || self.initial_temperature_ratio < 0.0 {
            return Err(format!(
                "initial_temperature_ratio must be finite and non-negative, got {}",
                self.initial_temperature_ratio
            ));
        }
        if self.temperature_floor.is_nan() || self.temperature_floor < 0.0 {
            return Err("temperature_floor must be non-negative".into());
        }
        if let Some(r) = self.reference_cost {
            if !r.is_finite() || r <= 0.0 {
                return Err(format!("reference_cost must be positive, got {r}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AlnsSaConfig::default();
        assert_eq!(config.time_limit, Duration::from_secs(2));
        assert_eq!(config.max_iterations, 200);
        assert!((config.cooling_rate - 0.995).abs() < 1e-10);
        assert!((config.initial_temperature_ratio - 0.05).abs() < 1e-10);
        assert_eq!(config.seed, None);
        assert_eq!(config.reference_cost, None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(AlnsSaConfig::default().validate().is_ok());
        assert!(AlnsSaConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(AlnsSaConfig::default()
            .with_cooling_rate(0.0)
            .validate()
            .is_err());
        assert!(AlnsSaConfig::default()
            .with_cooling_rate(1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_temperature() {
        assert!(AlnsSaConfig::default()
            .with_initial_temperature(-1.0)
            .validate()
            .is_err());
        assert!(AlnsSaConfig::default()
            .with_initial_temperature(f64::NAN)
            .validate()
            .is_err());
        assert!(AlnsSaConfig::default()
            .with_temperature_floor(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_reference_cost() {
        let config = AlnsSaConfig::default().with_reference_cost(0.0);
        assert!(config.validate().is_err());
        let config = AlnsSaConfig::default().with_reference_cost(-3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_initial_temperature() {
        let config = AlnsSaConfig::default();
        assert!((config.resolve_initial_temperature(200.0) - 10.0).abs() < 1e-10);
        let config = config.with_initial_temperature(3.0);
        assert!((config.resolve_initial_temperature(200.0) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_builder_chain() {
        let config = AlnsSaConfig::default()
            .with_time_limit(Duration::from_millis(500))
            .with_max_iterations(50)
            .with_seed(7)
            .with_initial_temperature_ratio(0.1)
            .with_cooling_rate(0.9)
            .with_temperature_floor(1e-6)
            .with_reference_cost(99.0);

        assert_eq!(config.time_limit, Duration::from_millis(500));
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.seed, Some(7));
        assert!((config.cooling_rate - 0.9).abs() < 1e-10);
        assert_eq!(config.reference_cost, Some(99.0));
    }
}
