//! Note conversion command.

use clap::Args;
use serde::Serialize;

use flageolet::{Accidental, Note};

use super::{get_config, output_result, round_to};
use crate::Cli;

/// Describe a note given by name, frequency or cents above C4.
#[derive(Args)]
pub struct NoteCommand {
    /// Note name, e.g. C#4, "Db- 5" or "D5 -2c"
    #[arg(required_unless_present_any = ["frequency", "cents"])]
    name: Option<String>,

    /// Frequency in Hz
    #[arg(long, conflicts_with_all = ["name", "cents"])]
    frequency: Option<f64>,

    /// Cents above C4
    #[arg(long, allow_negative_numbers = true, conflicts_with = "name")]
    cents: Option<f64>,

    /// Preferred accidentals when spelling a frequency or cents value,
    /// comma separated (e.g. "flat,quarter-flat")
    #[arg(long, value_delimiter = ',')]
    prefer: Vec<String>,

    /// Frequency of A4 in Hz
    #[arg(long)]
    a4: Option<f64>,
}

#[derive(Debug, Serialize)]
struct NoteReport {
    name: String,
    cents: f64,
    frequency: f64,
    letter: String,
    accidental: Accidental,
    octave: i32,
    difference: f64,
}

impl NoteCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let a4 = match self.a4 {
            Some(a4) => a4,
            None => get_config(cli)?.constraints.reference_frequency,
        };
        if !(a4 > 0.0 && a4.is_finite()) {
            anyhow::bail!("reference frequency must be positive, got {}", a4);
        }

        let note = self.note(a4)?;
        output_result(cli, &report(&note, a4))
    }

    fn note(&self, a4: f64) -> anyhow::Result<Note> {
        let preferred = self
            .prefer
            .iter()
            .map(|s| s.parse::<Accidental>())
            .collect::<Result<Vec<_>, _>>()?;

        let note = match (&self.name, self.frequency, self.cents) {
            (Some(name), _, _) => Note::from_name(name)?,
            (None, Some(frequency), _) => Note::from_frequency(frequency, a4, &preferred)?,
            (None, None, Some(cents)) => Note::from_cents(cents, &preferred)?,
            (None, None, None) => anyhow::bail!("a note name, --frequency or --cents is required"),
        };
        Ok(note)
    }
}

fn report(note: &Note, a4: f64) -> NoteReport {
    NoteReport {
        name: note.to_string(),
        cents: round_to(note.cents(), 2),
        frequency: round_to(note.frequency(a4), 2),
        letter: note.letter().to_string(),
        accidental: note.accidental(),
        octave: note.octave(),
        difference: round_to(note.difference(), 2),
    }
}
