//! Simulation engine support.
//!
//! Holds the deterministic RNG used by the stochastic solver. Each Monte
//! Carlo sample draws from an independently partitioned stream so results
//! are reproducible regardless of sample ordering.

pub mod rng;

pub use rng::SimRng;
