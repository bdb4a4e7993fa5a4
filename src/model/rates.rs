//! Rate equations for the S/I/R compartments.
//!
//! Two parameter variants share one abstraction:
//! - `Closed`: constant transmission rate, population conserved. Used by
//!   the Monte Carlo solver.
//! - `Open`: seasonally forced transmission `a(t) = cos(0.05·t) + 4`,
//!   plus birth inflow, natural death, and disease-induced death. Used by
//!   the RK4 solver.
//!
//! All functions are pure in `(t, S, I, R)` and the parameters, so they
//! can be evaluated at interpolated midpoint states as RK4 requires.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Seasonal forcing amplitude for the open model.
const SEASONAL_AMPLITUDE: f64 = 1.0;
/// Seasonal forcing angular frequency (1/days).
const SEASONAL_FREQUENCY: f64 = 0.05;
/// Baseline transmission rate for the open model.
const SEASONAL_BASELINE: f64 = 4.0;

/// Tagged rate-parameter set selecting the derivative functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateModel {
    /// Closed SIR: fixed transmission, no vital dynamics.
    Closed {
        /// Transmission rate a (S→I).
        transmission: f64,
        /// Recovery rate b (I→R).
        recovery: f64,
        /// Immunity-loss rate c (R→S).
        immunity_loss: f64,
    },
    /// Open SIR with vital dynamics and seasonally forced transmission.
    Open {
        /// Recovery rate b (I→R).
        recovery: f64,
        /// Immunity-loss rate c (R→S).
        immunity_loss: f64,
        /// Natural death rate d (out of S and I).
        death: f64,
        /// Disease-induced death rate dI (out of I).
        disease_death: f64,
        /// Birth rate e (inflow of susceptible newborns, e·N).
        birth: f64,
    },
}

impl RateModel {
    /// Validate that all rates are usable.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Parameter` for non-positive transmission,
    /// recovery, or immunity-loss rates, or negative vital rates.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            Self::Closed {
                transmission,
                recovery,
                immunity_loss,
            } => {
                if transmission <= 0.0 {
                    return Err(SimError::parameter(format!(
                        "transmission rate must be positive, got {transmission}"
                    )));
                }
                check_positive("recovery rate", recovery)?;
                check_positive("immunity-loss rate", immunity_loss)?;
            }
            Self::Open {
                recovery,
                immunity_loss,
                death,
                disease_death,
                birth,
            } => {
                check_positive("recovery rate", recovery)?;
                check_positive("immunity-loss rate", immunity_loss)?;
                check_non_negative("death rate", death)?;
                check_non_negative("disease death rate", disease_death)?;
                check_non_negative("birth rate", birth)?;
            }
        }
        Ok(())
    }

    /// Transmission rate at time `t` (constant for the closed model,
    /// seasonally forced for the open model).
    #[must_use]
    pub fn transmission_at(&self, t: f64) -> f64 {
        match *self {
            Self::Closed { transmission, .. } => transmission,
            Self::Open { .. } => {
                SEASONAL_AMPLITUDE * (SEASONAL_FREQUENCY * t).cos() + SEASONAL_BASELINE
            }
        }
    }

    /// dS/dt at `(t, s, i, r)` for total population `n`.
    #[must_use]
    pub fn ds_dt(&self, t: f64, s: f64, i: f64, r: f64, n: f64) -> f64 {
        match *self {
            Self::Closed { immunity_loss, .. } => {
                immunity_loss * r - self.transmission_at(t) * s * i / n
            }
            Self::Open {
                immunity_loss,
                death,
                birth,
                ..
            } => {
                immunity_loss * r - self.transmission_at(t) * s * i / n - death * s + birth * n
            }
        }
    }

    /// dI/dt at `(t, s, i)` for total population `n`.
    #[must_use]
    pub fn di_dt(&self, t: f64, s: f64, i: f64, n: f64) -> f64 {
        match *self {
            Self::Closed { recovery, .. } => self.transmission_at(t) * s * i / n - recovery * i,
            Self::Open {
                recovery,
                death,
                disease_death,
                ..
            } => {
                self.transmission_at(t) * s * i / n - recovery * i - death * i - disease_death * i
            }
        }
    }

    /// dR/dt at `(i, r)`.
    ///
    /// The open model subtracts `death·i` here, not `death·r`: natural
    /// mortality among the infected is booked against the recovered
    /// balance. Part of the model's defined behavior, see DESIGN.md.
    #[must_use]
    pub fn dr_dt(&self, i: f64, r: f64) -> f64 {
        match *self {
            Self::Closed {
                recovery,
                immunity_loss,
                ..
            } => recovery * i - immunity_loss * r,
            Self::Open {
                recovery,
                immunity_loss,
                death,
                ..
            } => recovery * i - immunity_loss * r - death * i,
        }
    }

    /// All three derivatives at `(t, s, i, r)` for total population `n`.
    #[must_use]
    pub fn derivatives(&self, t: f64, s: f64, i: f64, r: f64, n: f64) -> (f64, f64, f64) {
        (
            self.ds_dt(t, s, i, r, n),
            self.di_dt(t, s, i, n),
            self.dr_dt(i, r),
        )
    }

    /// Whether this parameter set conserves total population.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

fn check_positive(name: &str, value: f64) -> SimResult<()> {
    if value <= 0.0 {
        return Err(SimError::parameter(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> SimResult<()> {
    if value < 0.0 {
        return Err(SimError::parameter(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(())
}
