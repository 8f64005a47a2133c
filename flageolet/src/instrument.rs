//! Instruments: ordered sets of strings, plus built-in presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonicsError, Result};
use crate::note::Note;
use crate::string::VibratingString;

/// A stringed instrument.
///
/// Strings are ordered from the highest pitch down; string number 1 is
/// the first entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    strings: Vec<VibratingString>,
}

impl Instrument {
    pub fn new(strings: Vec<VibratingString>) -> Self {
        Self { strings }
    }

    /// Builds an instrument from open string frequencies (Hz) sharing one
    /// physical length (mm).
    pub fn from_frequencies(frequencies: &[f64], length: f64) -> Result<Self> {
        let strings = frequencies
            .iter()
            .map(|&f| VibratingString::with_physical_length(f, length))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(strings))
    }

    /// Builds an instrument from note names, e.g. `["E5", "A4", "D4", "G3"]`.
    pub fn from_names<S: AsRef<str>>(names: &[S], length: f64, a4: f64) -> Result<Self> {
        let frequencies = names
            .iter()
            .map(|name| Note::from_name(name.as_ref()).map(|n| n.frequency(a4)))
            .collect::<Result<Vec<_>>>()?;
        Self::from_frequencies(&frequencies, length)
    }

    pub fn from_preset(preset: Preset, a4: f64) -> Result<Self> {
        Self::from_names(preset.string_names(), preset.string_length(), a4)
    }

    pub fn strings(&self) -> &[VibratingString] {
        &self.strings
    }

    /// Iterates over `(number, string)` pairs, numbering from 1.
    pub fn numbered_strings(&self) -> impl Iterator<Item = (usize, &VibratingString)> {
        self.strings.iter().enumerate().map(|(i, s)| (i + 1, s))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Built-in instrument tunings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Violin,
    Viola,
    Cello,
    Guitar,
    DoubleBass,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Violin,
        Preset::Viola,
        Preset::Cello,
        Preset::Guitar,
        Preset::DoubleBass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Violin => "violin",
            Preset::Viola => "viola",
            Preset::Cello => "cello",
            Preset::Guitar => "guitar",
            Preset::DoubleBass => "double-bass",
        }
    }

    /// Open strings, highest first.
    pub fn string_names(self) -> &'static [&'static str] {
        match self {
            Preset::Violin => &["E5", "A4", "D4", "G3"],
            Preset::Viola => &["A4", "D4", "G3", "C3"],
            Preset::Cello => &["A3", "D3", "G2", "C2"],
            Preset::Guitar => &["E4", "B3", "G3", "D3", "A2", "E2"],
            Preset::DoubleBass => &["G2", "D2", "A1", "E1"],
        }
    }

    /// Vibrating string length (mm).
    pub fn string_length(self) -> f64 {
        match self {
            Preset::Violin => 325.0,
            Preset::Viola => 410.0,
            Preset::Cello => 690.0,
            Preset::Guitar => 650.0,
            Preset::DoubleBass => 1140.0,
        }
    }
}

impl FromStr for Preset {
    type Err = HarmonicsError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match normalized.as_str() {
            "violin" => Ok(Preset::Violin),
            "viola" => Ok(Preset::Viola),
            "cello" | "violoncello" => Ok(Preset::Cello),
            "guitar" => Ok(Preset::Guitar),
            "doublebass" | "contrabass" | "bass" => Ok(Preset::DoubleBass),
            _ => Err(HarmonicsError::PresetNotFound(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
