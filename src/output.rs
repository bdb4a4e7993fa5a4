//! Flat fixed-width numeric records.
//!
//! One row per time step, each value right-aligned in a 15-character
//! column with 8 significant digits:
//! - deterministic runs: `S I R N`
//! - Monte Carlo samples: `S I R N`
//! - Monte Carlo variance dumps: `varS varI varR`
//!
//! The statistics algorithm itself never needs the disk round-trip; the
//! write/read pair exists as the I/O collaborator contract for callers
//! that persist per-sample trajectories.

use std::io::{BufRead, Write};

use crate::error::{SimError, SimResult};
use crate::model::population::{PopulationState, SirPoint, Trajectory};
use crate::stats::EnsembleStatistics;

/// Column width of every value.
const COLUMN_WIDTH: usize = 15;
/// Significant digits per value.
const SIGNIFICANT_DIGITS: i32 = 8;

/// Format a value with a fixed number of significant digits, without
/// scientific notation for the magnitudes this model produces.
fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    #[allow(clippy::cast_possible_truncation)]
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0);
    #[allow(clippy::cast_sign_loss)]
    let decimals = decimals as usize;
    format!("{value:.decimals$}")
}

fn write_row<W: Write>(writer: &mut W, values: &[f64]) -> SimResult<()> {
    for value in values {
        write!(writer, "{:>COLUMN_WIDTH$}", format_value(*value))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write a deterministic trajectory as `S I R N` rows, one per step.
///
/// # Errors
///
/// Returns `SimError::Io` on write failure.
pub fn write_population<W: Write>(writer: &mut W, population: &PopulationState) -> SimResult<()> {
    for t in 0..population.len() {
        let point = population
            .point(t)
            .ok_or_else(|| SimError::record(format!("missing trajectory step {t}")))?;
        write_row(writer, &[point.s, point.i, point.r, point.total()])?;
    }
    Ok(())
}

/// Write one Monte Carlo sample trajectory as `S I R N` rows.
///
/// # Errors
///
/// Returns `SimError::Io` on write failure.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &Trajectory) -> SimResult<()> {
    for point in trajectory.iter() {
        write_row(writer, &[point.s, point.i, point.r, point.total()])?;
    }
    Ok(())
}

/// Read a trajectory previously written by [`write_trajectory`].
///
/// # Errors
///
/// Returns `SimError::Record` for malformed rows and `SimError::Io` for
/// read failures.
pub fn read_trajectory<R: BufRead>(reader: R) -> SimResult<Trajectory> {
    let mut trajectory = Trajectory::default();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<f64> = line
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|e| SimError::record(format!("line {}: {e}", lineno + 1)))?;
        if fields.len() != 4 {
            return Err(SimError::record(format!(
                "line {}: expected 4 columns, got {}",
                lineno + 1,
                fields.len()
            )));
        }
        trajectory.push(SirPoint::new(fields[0], fields[1], fields[2]));
    }
    Ok(trajectory)
}

/// Write the ensemble variance series as `varS varI varR` rows.
///
/// # Errors
///
/// Returns `SimError::Io` on write failure.
pub fn write_variances<W: Write>(
    writer: &mut W,
    statistics: &EnsembleStatistics,
) -> SimResult<()> {
    for point in statistics.variance() {
        write_row(writer, &[point.s, point.i, point.r])?;
    }
    Ok(())
}
