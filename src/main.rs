//! episim CLI.
//!
//! Runs the S/I/R scenario batteries and writes their `.dat` files.

use std::path::PathBuf;
use std::process::ExitCode;

use episim::cli::{Args, Command};
use episim::config::SimConfig;
use episim::error::SimResult;
use episim::scenarios;

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("episim: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> SimResult<()> {
    match args.command {
        Command::Rk4 {
            config_path,
            seed_override,
        } => {
            let config = load_config(config_path, seed_override, None)?;
            let written = scenarios::run_rk4_battery(
                &config.output.directory,
                &config.output.base_name,
                config.rk4.days,
                config.rk4.step_size,
            )?;
            report(&written);
            Ok(())
        }
        Command::MonteCarlo {
            config_path,
            seed_override,
            samples_override,
        } => {
            let config = load_config(config_path, seed_override, samples_override)?;
            let written = scenarios::run_monte_carlo_battery(
                &config.output.directory,
                &config.output.base_name,
                config.monte_carlo.samples,
                config.monte_carlo.days,
                config.reproducibility.seed,
            )?;
            report(&written);
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            println!("episim v{}", env!("EPISIM_VERSION"));
            Ok(())
        }
    }
}

fn load_config(
    path: Option<PathBuf>,
    seed_override: Option<u64>,
    samples_override: Option<usize>,
) -> SimResult<SimConfig> {
    let mut config = match path {
        Some(p) => SimConfig::load(p)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = seed_override {
        config.reproducibility.seed = seed;
    }
    if let Some(samples) = samples_override {
        config.monte_carlo.samples = samples;
    }
    Ok(config)
}

fn report(written: &[PathBuf]) {
    for path in written {
        println!("wrote {}", path.display());
    }
}

fn print_help() {
    println!("episim v{}", env!("EPISIM_VERSION"));
    println!("S/I/R compartmental epidemic simulator");
    println!();
    println!("Usage: episim <command> [config.yaml] [options]");
    println!();
    println!("Commands:");
    println!("  rk4          Run the deterministic RK4 scenario battery");
    println!("  monte-carlo  Run the stochastic Monte Carlo scenario battery");
    println!("  help         Show this help");
    println!("  version      Show version");
    println!();
    println!("Options:");
    println!("  --seed <n>     Override the master seed");
    println!("  --samples <n>  Override the Monte Carlo sample count");
}
