//! Ensemble statistics across Monte Carlo sample paths.
//!
//! Derived data only: recomputed from the full set of trajectories, never
//! mutated directly. The variance pass runs after every sample trajectory
//! is fully materialized, because the unbiased estimator needs the
//! completed per-timestep means.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::model::population::{SirPoint, Trajectory};

/// Per-timestep mean and variance for each compartment across all
/// samples, plus an overall time/sample-averaged standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleStatistics {
    /// Arithmetic mean over samples, one point per time step.
    mean: Vec<SirPoint>,
    /// Unbiased sample variance over samples, one point per time step.
    variance: Vec<SirPoint>,
    /// `Σ_t sqrt(var[t]) / (samples · ntimes)` per compartment.
    avg_std_dev: SirPoint,
    /// Number of samples aggregated.
    samples: usize,
}

impl EnsembleStatistics {
    /// Compute statistics from a set of sample trajectories.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if fewer than two samples are supplied
    /// (the unbiased estimator divides by `samples − 1`) or the
    /// trajectories disagree on length.
    pub fn from_trajectories(trajectories: &[Trajectory]) -> SimResult<Self> {
        let samples = trajectories.len();
        if samples < 2 {
            return Err(SimError::config(format!(
                "ensemble statistics need at least 2 samples, got {samples}"
            )));
        }
        let ntimes = trajectories[0].len();
        if ntimes == 0 {
            return Err(SimError::config("ensemble trajectories are empty"));
        }
        if let Some(bad) = trajectories.iter().find(|t| t.len() != ntimes) {
            return Err(SimError::config(format!(
                "trajectory length mismatch: expected {ntimes}, got {}",
                bad.len()
            )));
        }

        let n = samples as f64;

        // Mean pass.
        let mut mean = vec![SirPoint::default(); ntimes];
        for trajectory in trajectories {
            for (t, point) in trajectory.iter().enumerate() {
                mean[t].s += point.s / n;
                mean[t].i += point.i / n;
                mean[t].r += point.r / n;
            }
        }

        // Variance pass, unbiased over samples.
        let mut variance = vec![SirPoint::default(); ntimes];
        for trajectory in trajectories {
            for (t, point) in trajectory.iter().enumerate() {
                variance[t].s += (mean[t].s - point.s).powi(2) / (n - 1.0);
                variance[t].i += (mean[t].i - point.i).powi(2) / (n - 1.0);
                variance[t].r += (mean[t].r - point.r).powi(2) / (n - 1.0);
            }
        }

        // Diagnostic scalar: time/sample-averaged standard deviation.
        let mut avg_std_dev = SirPoint::default();
        let norm = n * ntimes as f64;
        for v in &variance {
            avg_std_dev.s += v.s.sqrt() / norm;
            avg_std_dev.i += v.i.sqrt() / norm;
            avg_std_dev.r += v.r.sqrt() / norm;
        }

        Ok(Self {
            mean,
            variance,
            avg_std_dev,
            samples,
        })
    }

    /// Per-timestep ensemble means.
    #[must_use]
    pub fn mean(&self) -> &[SirPoint] {
        &self.mean
    }

    /// Per-timestep ensemble variances.
    #[must_use]
    pub fn variance(&self) -> &[SirPoint] {
        &self.variance
    }

    /// Time/sample-averaged standard deviation per compartment.
    #[must_use]
    pub const fn avg_std_dev(&self) -> SirPoint {
        self.avg_std_dev
    }

    /// Number of aggregated samples.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Number of time steps covered.
    #[must_use]
    pub fn ntimes(&self) -> usize {
        self.mean.len()
    }
}
