//! Configuration with YAML schema and validation.
//!
//! Mistakes are caught in two layers: serde rejects unknown fields and
//! wrong types at parse time, and `validate_semantic` enforces the
//! cross-field constraints the schema cannot express.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{SimError, SimResult};

/// Top-level simulation configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Simulation metadata.
    #[serde(default)]
    pub simulation: SimulationMeta,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Deterministic integrator settings.
    #[validate(nested)]
    #[serde(default)]
    pub rk4: Rk4Config,

    /// Stochastic sampler settings.
    #[validate(nested)]
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,

    /// Output file settings.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SimConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, YAML parsing fails,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Validate semantic constraints beyond the schema.
    fn validate_semantic(&self) -> SimResult<()> {
        if self.monte_carlo.samples < 2 {
            return Err(SimError::config(format!(
                "Monte Carlo requires at least 2 samples, got {}",
                self.monte_carlo.samples
            )));
        }

        if self.rk4.step_size >= self.rk4.days {
            return Err(SimError::config(format!(
                "RK4 step size {} must be smaller than the simulated span {}",
                self.rk4.step_size, self.rk4.days
            )));
        }

        if self.output.base_name.trim().is_empty() {
            return Err(SimError::config("output base name must not be blank"));
        }

        Ok(())
    }

    /// Number of RK4 steps implied by the span and step size, including
    /// the initial state.
    #[must_use]
    pub fn rk4_steps(&self) -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (self.rk4.days / self.rk4.step_size).round() as usize;
        steps
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            simulation: SimulationMeta::default(),
            reproducibility: ReproducibilityConfig::default(),
            rk4: Rk4Config::default(),
            monte_carlo: MonteCarloConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SimConfigBuilder {
    seed: Option<u64>,
    samples: Option<usize>,
    step_size: Option<f64>,
    base_name: Option<String>,
}

impl SimConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the Monte Carlo sample count.
    #[must_use]
    pub const fn samples(mut self, samples: usize) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the RK4 step size in days.
    #[must_use]
    pub const fn step_size(mut self, h: f64) -> Self {
        self.step_size = Some(h);
        self
    }

    /// Set the output base name.
    #[must_use]
    pub fn base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = Some(name.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SimConfig {
        let mut config = SimConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(samples) = self.samples {
            config.monte_carlo.samples = samples;
        }
        if let Some(h) = self.step_size {
            config.rk4.step_size = h;
        }
        if let Some(name) = self.base_name {
            config.output.base_name = name;
        }

        config
    }
}

/// Simulation metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMeta {
    /// Simulation name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Reproducibility settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproducibilityConfig {
    /// Master seed for all RNG streams.
    pub seed: u64,
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Deterministic integrator settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Rk4Config {
    /// Simulated span in days.
    #[validate(range(min = 0.1, max = 36_500.0))]
    #[serde(default = "default_rk4_days")]
    pub days: f64,
    /// Fixed step size in days.
    #[validate(range(min = 0.000_001, max = 1.0))]
    #[serde(default = "default_step_size")]
    pub step_size: f64,
}

const fn default_rk4_days() -> f64 {
    365.0
}

const fn default_step_size() -> f64 {
    0.1
}

impl Default for Rk4Config {
    fn default() -> Self {
        Self {
            days: default_rk4_days(),
            step_size: default_step_size(),
        }
    }
}

/// Stochastic sampler settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonteCarloConfig {
    /// Number of independent sample paths.
    #[validate(range(min = 2))]
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Simulated span in days.
    #[validate(range(min = 0.1, max = 36_500.0))]
    #[serde(default = "default_mc_days")]
    pub days: f64,
}

const fn default_samples() -> usize {
    100
}

const fn default_mc_days() -> f64 {
    15.0
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            days: default_mc_days(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutputConfig {
    /// Directory the `.dat` files are written into.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Prefix shared by all output files.
    #[validate(length(min = 1))]
    #[serde(default = "default_base_name")]
    pub base_name: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_base_name() -> String {
    "sir".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            base_name: default_base_name(),
        }
    }
}
