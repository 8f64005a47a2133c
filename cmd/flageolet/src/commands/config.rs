//! Configuration management commands.

use clap::{Args, Subcommand};

use flageolet::{Constraints, DEFAULT_PHYSICAL_LENGTH};
use flageolet_cli::InstrumentConfig;

use super::{check_constraints, get_config, output_result, print_success, print_verbose};
use crate::Cli;

/// Manage CLI configuration.
///
/// Configuration is stored in ~/.flageolet/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// View the current configuration
    View,
    /// Change the default search constraints
    #[command(name = "set-constraints")]
    SetConstraints(ConstraintArgs),
    /// Add or replace a custom instrument
    #[command(name = "add-instrument")]
    AddInstrument {
        /// Instrument name
        name: String,
        /// Open strings, highest first, comma separated (e.g. E5,A4,D4,G3)
        #[arg(long, value_delimiter = ',', required = true)]
        strings: Vec<String>,
        /// Vibrating string length in mm
        #[arg(long, default_value_t = DEFAULT_PHYSICAL_LENGTH)]
        length: f64,
    },
    /// Delete a custom instrument
    #[command(name = "delete-instrument")]
    DeleteInstrument {
        /// Instrument name
        name: String,
    },
    /// Set the instrument used when none is given
    #[command(name = "use-instrument")]
    UseInstrument {
        /// Instrument name (preset or configured)
        name: String,
    },
}

#[derive(Args, Default)]
struct ConstraintArgs {
    /// Minimum distance between the stops of an artificial harmonic in mm
    #[arg(long)]
    min_distance: Option<f64>,
    /// Maximum distance between the stops of an artificial harmonic in mm
    #[arg(long)]
    max_distance: Option<f64>,
    /// Minimum distance between the touched node and the bridge in mm
    #[arg(long)]
    min_bowed_distance: Option<f64>,
    /// Maximum deviation for natural harmonics in cents
    #[arg(long)]
    tolerance: Option<f64>,
    /// Highest natural harmonic searched
    #[arg(long)]
    max_natural: Option<u32>,
    /// Highest artificial harmonic searched
    #[arg(long)]
    max_artificial: Option<u32>,
    /// Frequency of A4 in Hz
    #[arg(long)]
    a4: Option<f64>,
    /// Reset every constraint to its default first
    #[arg(long)]
    reset: bool,
}

impl ConstraintArgs {
    fn apply(&self, current: Constraints) -> Constraints {
        let mut c = if self.reset { Constraints::default() } else { current };
        if let Some(v) = self.min_distance {
            c.min_stop_distance = v;
        }
        if let Some(v) = self.max_distance {
            c.max_stop_distance = v;
        }
        if let Some(v) = self.min_bowed_distance {
            c.min_bowed_distance = v;
        }
        if let Some(v) = self.tolerance {
            c.tolerance = v;
        }
        if let Some(v) = self.max_natural {
            c.max_natural_number = v;
        }
        if let Some(v) = self.max_artificial {
            c.max_artificial_number = v;
        }
        if let Some(v) = self.a4 {
            c.reference_frequency = v;
        }
        c
    }
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut cfg = get_config(cli)?;

        match &self.command {
            ConfigSubcommand::View => {
                print_verbose(cli, &format!("Config file: {}", cfg.path().display()));
                output_result(cli, &cfg)
            }

            ConfigSubcommand::SetConstraints(args) => {
                let constraints = args.apply(cfg.constraints);
                check_constraints(&constraints)?;
                cfg.constraints = constraints;
                cfg.save()?;
                print_success("Constraints updated");
                Ok(())
            }

            ConfigSubcommand::AddInstrument {
                name,
                strings,
                length,
            } => {
                cfg.add_instrument(name, InstrumentConfig::new(strings.clone(), *length))?;
                print_success(&format!("Instrument \"{}\" added successfully", name));
                Ok(())
            }

            ConfigSubcommand::DeleteInstrument { name } => {
                cfg.delete_instrument(name)?;
                print_success(&format!("Instrument \"{}\" deleted", name));
                Ok(())
            }

            ConfigSubcommand::UseInstrument { name } => {
                cfg.use_instrument(name)?;
                print_success(&format!("Switched to instrument \"{}\"", name));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_unset() {
        let mut current = Constraints::default();
        current.tolerance = 12.0;

        let args = ConstraintArgs {
            max_distance: Some(95.0),
            max_natural: Some(10),
            ..Default::default()
        };
        let c = args.apply(current);
        assert_eq!(c.max_stop_distance, 95.0);
        assert_eq!(c.max_natural_number, 10);
        assert_eq!(c.tolerance, 12.0);
    }

    #[test]
    fn test_apply_reset() {
        let mut current = Constraints::default();
        current.tolerance = 12.0;

        let args = ConstraintArgs {
            a4: Some(442.0),
            reset: true,
            ..Default::default()
        };
        let c = args.apply(current);
        assert_eq!(c.tolerance, 50.0);
        assert_eq!(c.reference_frequency, 442.0);
    }
}
