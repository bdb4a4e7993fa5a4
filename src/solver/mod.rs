//! Solvers that advance a `PopulationState` through time.
//!
//! Two independent paths share the rate model: a deterministic fixed-step
//! RK4 integrator and a discrete-time stochastic sampler.

pub mod monte_carlo;
pub mod rk4;

pub use monte_carlo::{Ensemble, MonteCarloSimulator};
pub use rk4::Rk4Integrator;
