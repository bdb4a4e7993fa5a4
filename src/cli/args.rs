//! CLI argument parsing.
//!
//! Hand-rolled parser kept separate from `main` so the parsing logic is
//! testable against arbitrary argument vectors, not just
//! `std::env::args()`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the deterministic RK4 scenario battery.
    Rk4 {
        /// Optional path to a configuration YAML file.
        config_path: Option<PathBuf>,
        /// Optional seed override (recorded in config, unused by RK4).
        seed_override: Option<u64>,
    },
    /// Run the stochastic Monte Carlo scenario battery.
    MonteCarlo {
        /// Optional path to a configuration YAML file.
        config_path: Option<PathBuf>,
        /// Optional seed override.
        seed_override: Option<u64>,
        /// Optional sample count override.
        samples_override: Option<usize>,
    },
    /// Show help.
    Help,
    /// Show version.
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "rk4" => Self::parse_rk4_command(args),
            "monte-carlo" | "mc" => Self::parse_monte_carlo_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Pull an optional config path out of position 2 unless it looks
    /// like a flag.
    fn config_path(args: &[String]) -> Option<PathBuf> {
        args.get(2)
            .filter(|a| !a.starts_with('-'))
            .map(PathBuf::from)
    }

    fn flag_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
        let idx = args.iter().position(|a| a == flag)?;
        args.get(idx + 1)?.parse().ok()
    }

    fn parse_rk4_command(args: &[String]) -> Command {
        Command::Rk4 {
            config_path: Self::config_path(args),
            seed_override: Self::flag_value(args, "--seed"),
        }
    }

    fn parse_monte_carlo_command(args: &[String]) -> Command {
        Command::MonteCarlo {
            config_path: Self::config_path(args),
            seed_override: Self::flag_value(args, "--seed"),
            samples_override: Self::flag_value(args, "--samples"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_is_help() {
        let args = Args::parse_from(["episim"]);
        assert_eq!(args.command, Command::Help);
    }

    #[test]
    fn test_help_flags() {
        for flag in ["-h", "--help", "help"] {
            let args = Args::parse_from(["episim", flag]);
            assert_eq!(args.command, Command::Help);
        }
    }

    #[test]
    fn test_version_flags() {
        for flag in ["-V", "--version", "version"] {
            let args = Args::parse_from(["episim", flag]);
            assert_eq!(args.command, Command::Version);
        }
    }

    #[test]
    fn test_unknown_command_falls_back_to_help() {
        let args = Args::parse_from(["episim", "frobnicate"]);
        assert_eq!(args.command, Command::Help);
    }

    #[test]
    fn test_rk4_bare() {
        let args = Args::parse_from(["episim", "rk4"]);
        assert_eq!(
            args.command,
            Command::Rk4 {
                config_path: None,
                seed_override: None,
            }
        );
    }

    #[test]
    fn test_rk4_with_config() {
        let args = Args::parse_from(["episim", "rk4", "sim.yaml"]);
        assert_eq!(
            args.command,
            Command::Rk4 {
                config_path: Some(PathBuf::from("sim.yaml")),
                seed_override: None,
            }
        );
    }

    #[test]
    fn test_monte_carlo_with_overrides() {
        let args = Args::parse_from(["episim", "monte-carlo", "sim.yaml", "--seed", "7"]);
        assert_eq!(
            args.command,
            Command::MonteCarlo {
                config_path: Some(PathBuf::from("sim.yaml")),
                seed_override: Some(7),
                samples_override: None,
            }
        );

        let args = Args::parse_from(["episim", "mc", "--samples", "250"]);
        assert_eq!(
            args.command,
            Command::MonteCarlo {
                config_path: None,
                seed_override: None,
                samples_override: Some(250),
            }
        );
    }

    #[test]
    fn test_flag_without_value_is_ignored() {
        let args = Args::parse_from(["episim", "mc", "--seed"]);
        assert_eq!(
            args.command,
            Command::MonteCarlo {
                config_path: None,
                seed_override: None,
                samples_override: None,
            }
        );
    }

    #[test]
    fn test_flag_with_garbage_value_is_ignored() {
        let args = Args::parse_from(["episim", "mc", "--seed", "not-a-number"]);
        assert_eq!(
            args.command,
            Command::MonteCarlo {
                config_path: None,
                seed_override: None,
                samples_override: None,
            }
        );
    }
}
