//! Utility functions for CLI commands.

use flageolet::{Constraints, Note};
use flageolet_cli::{Config, Output, OutputFormat, load_config};

use crate::Cli;

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Outputs a result using the global format flags.
pub fn output_result<T: serde::Serialize>(cli: &Cli, result: &T) -> anyhow::Result<()> {
    Output::new(OutputFormat::from_json_flag(cli.json), cli.output.clone()).write(result)
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    flageolet_cli::print_verbose(cli.verbose, msg);
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Rejects constraints no search could satisfy.
pub fn check_constraints(c: &Constraints) -> anyhow::Result<()> {
    if !(c.reference_frequency > 0.0 && c.reference_frequency.is_finite()) {
        anyhow::bail!("reference frequency must be positive, got {}", c.reference_frequency);
    }
    if c.min_stop_distance > c.max_stop_distance {
        anyhow::bail!(
            "minimum stop distance {} exceeds maximum {}",
            c.min_stop_distance,
            c.max_stop_distance
        );
    }
    if c.tolerance < 0.0 {
        anyhow::bail!("tolerance must not be negative, got {}", c.tolerance);
    }
    Ok(())
}

/// Names the note nearest to a frequency.
pub fn note_name(frequency: f64, a4: f64) -> anyhow::Result<String> {
    Ok(Note::from_frequency(frequency, a4, &[])?.to_string())
}

/// Rounds to a fixed number of decimal places for display.
pub fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}
