//! Fixed-step fourth-order Runge-Kutta integration.
//!
//! The scheme is applied per compartment: each compartment's k2/k3/k4
//! stages offset the state slots with that compartment's *own* previous
//! k-value, rather than evaluating the joint state vector at a shared
//! midpoint. This staging is part of the model's defined behavior and is
//! deliberately not replaced with a fully coupled vector RK4 (see
//! DESIGN.md).

use crate::error::{SimError, SimResult};
use crate::model::population::{PopulationState, SirPoint};

/// Values this far below zero are treated as rounding noise and clamped;
/// anything lower aborts the run as a numerical instability.
const NEGATIVE_TOLERANCE: f64 = 1e-9;

/// Classical four-stage Runge-Kutta integrator with a fixed step size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4Integrator;

impl Rk4Integrator {
    /// Create an integrator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Advance `state` by `steps − 1` RK4 steps of size `h`, so the
    /// trajectory holds `steps` samples including the initial values.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Parameter` for a non-positive step size or a
    /// step count below 2, and `SimError::NumericalInstability` if any
    /// compartment goes non-finite or meaningfully negative mid-run.
    pub fn integrate(&self, state: &mut PopulationState, h: f64, steps: usize) -> SimResult<()> {
        if !h.is_finite() || h <= 0.0 {
            return Err(SimError::parameter(format!(
                "step size must be positive and finite, got {h}"
            )));
        }
        if steps < 2 {
            return Err(SimError::parameter(format!(
                "step count must be at least 2, got {steps}"
            )));
        }

        state.reserve(steps - 1);
        let rates = *state.rates();

        for idx in 0..steps - 1 {
            let t = idx as f64 * h;
            let SirPoint { s, i, r } = state.last();

            // Rate terms divide by the fixed initial total. Feeding the
            // drifting S+I+R back into the e·N birth inflow makes the
            // high-mortality open scenarios diverge; the reported totals
            // still move, via PopulationState::population_at.
            let n = state.initial_population();

            let s_k1 = h * rates.ds_dt(t, s, i, r, n);
            let i_k1 = h * rates.di_dt(t, s, i, n);
            let r_k1 = h * rates.dr_dt(i, r);

            let s_k2 = h * rates.ds_dt(t + h / 2.0, s + s_k1 / 2.0, i + s_k1 / 2.0, r + s_k1 / 2.0, n);
            let i_k2 = h * rates.di_dt(t + h / 2.0, s + i_k1 / 2.0, i + i_k1 / 2.0, n);
            let r_k2 = h * rates.dr_dt(i + r_k1 / 2.0, r + r_k1 / 2.0);

            let s_k3 = h * rates.ds_dt(t + h / 2.0, s + s_k2 / 2.0, i + s_k2 / 2.0, r + s_k2 / 2.0, n);
            let i_k3 = h * rates.di_dt(t + h / 2.0, s + i_k2 / 2.0, i + i_k2 / 2.0, n);
            let r_k3 = h * rates.dr_dt(i + r_k2 / 2.0, r + r_k2 / 2.0);

            let s_k4 = h * rates.ds_dt(t + h, s + s_k3, i + s_k3, r + s_k3, n);
            let i_k4 = h * rates.di_dt(t + h, s + i_k3, i + i_k3, n);
            let r_k4 = h * rates.dr_dt(i + r_k3, r + r_k3);

            let next = SirPoint::new(
                s + (s_k1 + 2.0 * s_k2 + 2.0 * s_k3 + s_k4) / 6.0,
                i + (i_k1 + 2.0 * i_k2 + 2.0 * i_k3 + i_k4) / 6.0,
                r + (r_k1 + 2.0 * r_k2 + 2.0 * r_k3 + r_k4) / 6.0,
            );

            state.push(Self::guard(next, idx + 1)?);
        }

        Ok(())
    }

    /// Reject non-finite or negative compartments; clamp rounding noise.
    fn guard(point: SirPoint, step: usize) -> SimResult<SirPoint> {
        let mut guarded = point;
        for (compartment, value) in [
            ("S", &mut guarded.s),
            ("I", &mut guarded.i),
            ("R", &mut guarded.r),
        ] {
            if !value.is_finite() || *value < -NEGATIVE_TOLERANCE {
                return Err(SimError::NumericalInstability {
                    step,
                    compartment,
                    value: *value,
                });
            }
            if *value < 0.0 {
                *value = 0.0;
            }
        }
        Ok(guarded)
    }
}
