//! Seeded random number generation.
//!
//! Every stochastic decision in the search (operator selection, edge
//! sampling, acceptance) draws from one generator created here, so a run
//! is reproducible from its seed alone.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
