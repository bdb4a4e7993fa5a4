//! Population state: compartment trajectories and parameters.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::model::rates::RateModel;

/// One `(S, I, R)` triple at a single time step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SirPoint {
    /// Susceptible count.
    pub s: f64,
    /// Infected count.
    pub i: f64,
    /// Recovered count.
    pub r: f64,
}

impl SirPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(s: f64, i: f64, r: f64) -> Self {
        Self { s, i, r }
    }

    /// Total population at this point.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.s + self.i + self.r
    }
}

/// One Monte Carlo sample path: an ordered sequence of `(S, I, R)`
/// triples, one per discrete time step. Owned exclusively by the sample
/// that produced it until aggregated into ensemble statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<SirPoint>,
}

impl Trajectory {
    /// Create an empty trajectory with reserved capacity.
    #[must_use]
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            points: Vec::with_capacity(steps),
        }
    }

    /// Append a time step.
    pub fn push(&mut self, point: SirPoint) {
        self.points.push(point);
    }

    /// Number of recorded time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trajectory holds no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at time step `t`, if recorded.
    #[must_use]
    pub fn point(&self, t: usize) -> Option<&SirPoint> {
        self.points.get(t)
    }

    /// Iterate over the recorded points in time order.
    pub fn iter(&self) -> impl Iterator<Item = &SirPoint> {
        self.points.iter()
    }
}

impl FromIterator<SirPoint> for Trajectory {
    fn from_iter<T: IntoIterator<Item = SirPoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Time-indexed trajectories of the three compartments plus the rate
/// parameters.
///
/// Created once with initial compartment values, mutated step-by-step by
/// exactly one solver, read-only afterward. The trajectory vectors start
/// with the initial values at index 0 and grow as the solver advances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationState {
    /// Susceptible trajectory, `s[t]`.
    s: Vec<f64>,
    /// Infected trajectory, `i[t]`.
    i: Vec<f64>,
    /// Recovered trajectory, `r[t]`.
    r: Vec<f64>,
    /// Initial total population `S0 + I0 + R0`.
    n0: f64,
    /// Rate parameters.
    rates: RateModel,
}

impl PopulationState {
    /// Create a population with initial compartment values.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Parameter` if any initial compartment is
    /// negative, the total population is not positive, or the rates fail
    /// validation.
    pub fn new(s0: f64, i0: f64, r0: f64, rates: RateModel) -> SimResult<Self> {
        for (name, value) in [("S0", s0), ("I0", i0), ("R0", r0)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::parameter(format!(
                    "initial {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        let n0 = s0 + i0 + r0;
        if n0 <= 0.0 {
            return Err(SimError::parameter(format!(
                "total population must be positive, got {n0}"
            )));
        }
        rates.validate()?;

        Ok(Self {
            s: vec![s0],
            i: vec![i0],
            r: vec![r0],
            n0,
            rates,
        })
    }

    /// Initial total population.
    #[must_use]
    pub const fn initial_population(&self) -> f64 {
        self.n0
    }

    /// Total population at step `t`, summed from the current
    /// compartments rather than assumed constant, so births, deaths, and
    /// integration drift all show up in the reported series.
    #[must_use]
    pub fn population_at(&self, t: usize) -> Option<f64> {
        Some(self.s.get(t)? + self.i.get(t)? + self.r.get(t)?)
    }

    /// Rate parameters.
    #[must_use]
    pub const fn rates(&self) -> &RateModel {
        &self.rates
    }

    /// Number of recorded time steps (including the initial state).
    #[must_use]
    pub fn len(&self) -> usize {
        self.s.len()
    }

    /// Whether only the initial state is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        // Construction always records step 0.
        false
    }

    /// Compartment values at step `t`.
    #[must_use]
    pub fn point(&self, t: usize) -> Option<SirPoint> {
        Some(SirPoint::new(
            *self.s.get(t)?,
            *self.i.get(t)?,
            *self.r.get(t)?,
        ))
    }

    /// The most recently recorded compartment values.
    #[must_use]
    pub fn last(&self) -> SirPoint {
        let t = self.len() - 1;
        SirPoint::new(self.s[t], self.i[t], self.r[t])
    }

    /// Susceptible trajectory.
    #[must_use]
    pub fn susceptible(&self) -> &[f64] {
        &self.s
    }

    /// Infected trajectory.
    #[must_use]
    pub fn infected(&self) -> &[f64] {
        &self.i
    }

    /// Recovered trajectory.
    #[must_use]
    pub fn recovered(&self) -> &[f64] {
        &self.r
    }

    /// Append the next time step. Solver use only.
    pub(crate) fn push(&mut self, point: SirPoint) {
        self.s.push(point.s);
        self.i.push(point.i);
        self.r.push(point.r);
    }

    /// Reserve room for `steps` further time steps.
    pub(crate) fn reserve(&mut self, steps: usize) {
        self.s.reserve(steps);
        self.i.reserve(steps);
        self.r.reserve(steps);
    }
}
