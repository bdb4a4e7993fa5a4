//! Compartmental S/I/R model: rate equations and population state.

pub mod population;
pub mod rates;

pub use population::{PopulationState, SirPoint, Trajectory};
pub use rates::RateModel;
