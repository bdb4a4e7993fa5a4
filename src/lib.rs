//! # episim
//!
//! Compartmental S/I/R epidemic simulation engine.
//!
//! Two solvers share one rate model:
//! - a deterministic fixed-step RK4 integrator, supporting a closed
//!   population and an open population with vital dynamics and seasonal
//!   transmission forcing
//! - a discrete-time Monte Carlo sampler for the closed population, with
//!   per-timestep ensemble mean/variance statistics
//!
//! ## Example
//!
//! ```rust
//! use episim::prelude::*;
//!
//! let rates = RateModel::Closed {
//!     transmission: 4.0,
//!     recovery: 1.0,
//!     immunity_loss: 0.5,
//! };
//! let mut population = PopulationState::new(300.0, 100.0, 0.0, rates)?;
//! Rk4Integrator::new().integrate(&mut population, 0.1, 150)?;
//! assert_eq!(population.len(), 150);
//! # Ok::<(), episim::SimError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops,    // Numerical code choices are intentional
    clippy::imprecise_flops,     // Numerical code choices are intentional
    clippy::missing_const_for_fn // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod scenarios;
pub mod solver;
pub mod stats;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{SimConfig, SimConfigBuilder};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{SimError, SimResult};
    pub use crate::model::{PopulationState, RateModel, SirPoint, Trajectory};
    pub use crate::solver::{Ensemble, MonteCarloSimulator, Rk4Integrator};
    pub use crate::stats::EnsembleStatistics;
}

/// Re-export for public API
pub use error::{SimError, SimResult};
