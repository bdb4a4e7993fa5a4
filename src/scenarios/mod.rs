//! Named scenario presets and batch orchestration.
//!
//! Four scenarios "A"–"D" share each solver with different rate
//! parameters. The deterministic battery runs the open model over a full
//! year; the stochastic battery runs the closed model over 15 days. The
//! batteries are thin orchestration loops above the solvers: build the
//! population, run it, hand the rows to the output writer.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::engine::rng::SimRng;
use crate::error::SimResult;
use crate::model::population::PopulationState;
use crate::model::rates::RateModel;
use crate::output;
use crate::solver::monte_carlo::MonteCarloSimulator;
use crate::solver::rk4::Rk4Integrator;

/// Simulated days for the deterministic battery.
pub const RK4_DAYS: f64 = 365.0;
/// Step size in days for the deterministic battery.
pub const RK4_STEP_SIZE: f64 = 0.1;
/// Simulated days for the stochastic battery.
pub const MONTE_CARLO_DAYS: f64 = 15.0;

/// A named population setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    /// Scenario label ("A".."D").
    pub name: &'static str,
    /// Initial susceptible count.
    pub s0: f64,
    /// Initial infected count.
    pub i0: f64,
    /// Initial recovered count.
    pub r0: f64,
    /// Rate parameters.
    pub rates: RateModel,
}

impl Scenario {
    /// Build the population state for this scenario.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Parameter` if the preset parameters fail
    /// validation (they do not, but the constructor checks regardless).
    pub fn population(&self) -> SimResult<PopulationState> {
        PopulationState::new(self.s0, self.i0, self.r0, self.rates)
    }
}

/// The four deterministic scenarios: open model, increasing vital and
/// disease mortality. The birth rate doubles as the recovery coefficient
/// in these presets, so both fields carry the same value.
#[must_use]
pub fn rk4_battery() -> [Scenario; 4] {
    let preset = |name, birth: f64, death, disease_death| Scenario {
        name,
        s0: 300.0,
        i0: 100.0,
        r0: 0.0,
        rates: RateModel::Open {
            recovery: birth,
            immunity_loss: 0.5,
            death,
            disease_death,
            birth,
        },
    };
    [
        preset("A", 1.0, 0.6, 1.0),
        preset("B", 2.0, 0.8, 1.3),
        preset("C", 3.0, 1.0, 1.6),
        preset("D", 4.0, 1.2, 1.9),
    ]
}

/// The four stochastic scenarios: closed model, increasing recovery rate.
#[must_use]
pub fn monte_carlo_battery() -> [Scenario; 4] {
    let preset = |name, recovery| Scenario {
        name,
        s0: 300.0,
        i0: 100.0,
        r0: 0.0,
        rates: RateModel::Closed {
            transmission: 4.0,
            recovery,
            immunity_loss: 0.5,
        },
    };
    [
        preset("A", 1.0),
        preset("B", 2.0),
        preset("C", 3.0),
        preset("D", 4.0),
    ]
}

/// Integrate every deterministic scenario and write one `S I R N` file
/// per scenario, named `<base_name><label>.dat`.
///
/// Returns the paths written.
///
/// # Errors
///
/// Propagates solver and I/O errors.
pub fn run_rk4_battery(
    directory: &Path,
    base_name: &str,
    days: f64,
    step_size: f64,
) -> SimResult<Vec<PathBuf>> {
    let integrator = Rk4Integrator::new();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (days / step_size).round() as usize;

    let mut written = Vec::with_capacity(4);
    for scenario in rk4_battery() {
        let mut population = scenario.population()?;
        integrator.integrate(&mut population, step_size, steps)?;

        let path = directory.join(format!("{base_name}{}.dat", scenario.name));
        let mut writer = BufWriter::new(File::create(&path)?);
        output::write_population(&mut writer, &population)?;
        written.push(path);
    }
    Ok(written)
}

/// Run every stochastic scenario: write one `S I R N` file per sample
/// (`<base_name><label>_<n>.dat`) plus the per-scenario variance series
/// (`<base_name><label>_var.dat`).
///
/// All scenarios draw from one master-seeded RNG, each sample from its
/// own partitioned stream. Returns the paths written.
///
/// # Errors
///
/// Propagates solver and I/O errors.
pub fn run_monte_carlo_battery(
    directory: &Path,
    base_name: &str,
    samples: usize,
    days: f64,
    seed: u64,
) -> SimResult<Vec<PathBuf>> {
    let mut rng = SimRng::new(seed);
    let mut written = Vec::new();

    for scenario in monte_carlo_battery() {
        let population = scenario.population()?;
        let simulator = MonteCarloSimulator::new(&population)?;
        let ensemble = simulator.solve(&population, samples, days, &mut rng)?;

        for (n, trajectory) in ensemble.trajectories.iter().enumerate() {
            let path = directory.join(format!("{base_name}{}_{n}.dat", scenario.name));
            let mut writer = BufWriter::new(File::create(&path)?);
            output::write_trajectory(&mut writer, trajectory)?;
            written.push(path);
        }

        let path = directory.join(format!("{base_name}{}_var.dat", scenario.name));
        let mut writer = BufWriter::new(File::create(&path)?);
        output::write_variances(&mut writer, &ensemble.statistics)?;
        written.push(path);
    }
    Ok(written)
}
