//! Harmonic search command.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use flageolet::{Constraints, HarmonicCalculator, HarmonicKind, Note};

use super::{check_constraints, get_config, note_name, output_result, print_verbose, round_to};
use crate::Cli;

/// Find the harmonics that sound a note.
///
/// Natural harmonics are listed before artificial ones on each string.
/// Stops are string fractions measured from the bridge; positions are in
/// mm from the nut.
#[derive(Args)]
pub struct FindCommand {
    /// Sounding note, e.g. A5, Eb6 or "D5 -2c"
    note: String,

    /// Instrument name (preset or configured); defaults to the current one
    #[arg(short = 'i', long)]
    instrument: Option<String>,

    /// Frequency of A4 in Hz
    #[arg(long)]
    a4: Option<f64>,

    /// Maximum deviation for natural harmonics in cents
    #[arg(long)]
    tolerance: Option<f64>,

    /// Minimum distance between the stops of an artificial harmonic in mm
    #[arg(long)]
    min_distance: Option<f64>,

    /// Maximum distance between the stops of an artificial harmonic in mm
    #[arg(long)]
    max_distance: Option<f64>,

    /// Minimum distance between the touched node and the bridge in mm
    #[arg(long)]
    min_bowed_distance: Option<f64>,
}

#[derive(Debug, Serialize)]
struct FindReport {
    note: String,
    frequency: f64,
    instrument: String,
    harmonics: Vec<HarmonicReport>,
}

#[derive(Debug, Serialize)]
struct HarmonicReport {
    string: usize,
    string_note: String,
    kind: HarmonicKind,
    number: u32,
    base_stop: f64,
    half_stop: f64,
    base_position: f64,
    half_position: f64,
    sounding_frequency: f64,
    sounding_note: String,
}

impl FindCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let constraints = self.constraints(cfg.constraints);
        check_constraints(&constraints)?;
        let a4 = constraints.reference_frequency;

        let note = Note::from_name(&self.note)?;
        let (name, instrument) = cfg.resolve_instrument(self.instrument.as_deref(), a4)?;
        print_verbose(cli, &format!("Instrument: {} ({} strings)", name, instrument.len()));
        print_verbose(cli, &format!("Note: {} ({:.2} Hz)", note, note.frequency(a4)));

        let calculator = HarmonicCalculator::with_constraints(constraints);
        let mut harmonics = Vec::new();
        for (number, string) in instrument.numbered_strings() {
            let string_note = note_name(string.frequency(), a4)?;
            for harmonic in calculator.find_string_harmonics(&note, string)? {
                let length = string.physical_length();
                harmonics.push(HarmonicReport {
                    string: number,
                    string_note: string_note.clone(),
                    kind: harmonic.kind(),
                    number: harmonic.number(),
                    base_stop: round_to(harmonic.base_stop().length(), 4),
                    half_stop: round_to(harmonic.half_stop().length(), 4),
                    base_position: round_to((1.0 - harmonic.base_stop().length()) * length, 1),
                    half_position: round_to((1.0 - harmonic.half_stop().length()) * length, 1),
                    sounding_frequency: round_to(harmonic.sounding_frequency(), 2),
                    sounding_note: note_name(harmonic.sounding_frequency(), a4)?,
                });
            }
        }
        debug!(found = harmonics.len(), "search finished");

        let report = FindReport {
            note: note.to_string(),
            frequency: round_to(note.frequency(a4), 2),
            instrument: name,
            harmonics,
        };
        output_result(cli, &report)
    }

    /// Applies command line overrides on top of the configured constraints.
    fn constraints(&self, mut c: Constraints) -> Constraints {
        if let Some(a4) = self.a4 {
            c.reference_frequency = a4;
        }
        if let Some(tolerance) = self.tolerance {
            c.tolerance = tolerance;
        }
        if let Some(min) = self.min_distance {
            c.min_stop_distance = min;
        }
        if let Some(max) = self.max_distance {
            c.max_stop_distance = max;
        }
        if let Some(bowed) = self.min_bowed_distance {
            c.min_bowed_distance = bowed;
        }
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> FindCommand {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            find: FindCommand,
        }

        let mut argv = vec!["find"];
        argv.extend_from_slice(args);
        Wrapper::parse_from(argv).find
    }

    #[test]
    fn test_overrides() {
        let cmd = command(&["A5", "--a4", "442", "--max-distance", "90", "--tolerance", "5"]);
        let c = cmd.constraints(Constraints::default());
        assert_eq!(c.reference_frequency, 442.0);
        assert_eq!(c.max_stop_distance, 90.0);
        assert_eq!(c.tolerance, 5.0);
        assert_eq!(c.min_stop_distance, 1.0);
        assert_eq!(c.min_bowed_distance, 20.0);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cmd = command(&["A5", "-i", "cello"]);
        let mut configured = Constraints::default();
        configured.min_bowed_distance = 35.0;
        assert_eq!(cmd.constraints(configured), configured);
        assert_eq!(cmd.instrument.as_deref(), Some("cello"));
    }
}
