//! Note names and their position in cents above C4.
//!
//! A [`Note`] is a letter, an [`Accidental`], an octave in scientific pitch
//! notation, and a fine difference in cents from its quarter-tone grid
//! position:
//!
//! ```text
//! cents = letter + accidental + (octave - 4) * 1200 + difference
//! ```
//!
//! Names follow the grammar `letter [accidental] [octave] [" " ±N "c"]`,
//! e.g. `C#4`, `Eb5`, `G+3`, `Bb-2`, `A4 +25c`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cents::{self, A4_CENTS, CENTS_PER_OCTAVE};
use crate::error::{HarmonicsError, Result};
use crate::math::approx_eq;

/// Size of the grid that [`Note::from_cents`] rounds to (a quarter-tone).
pub const GRID_CENTS: f64 = 50.0;

/// A natural note letter (pitch class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Cents above C in the same octave.
    pub fn cents(self) -> f64 {
        match self {
            Letter::C => 0.0,
            Letter::D => 200.0,
            Letter::E => 400.0,
            Letter::F => 500.0,
            Letter::G => 700.0,
            Letter::A => 900.0,
            Letter::B => 1100.0,
        }
    }

    /// Parses a letter, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An accidental, down to quarter-tone resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
    QuarterSharp,
    QuarterFlat,
    DoubleSharp,
    DoubleFlat,
    ThreeQuarterSharp,
    ThreeQuarterFlat,
}

/// Synonym patterns, tried in order against a trimmed token.
static ACCIDENTAL_PATTERNS: Lazy<Vec<(Regex, Accidental)>> = Lazy::new(|| {
    [
        (r"", Accidental::Natural),
        (r"natural|\x{266E}", Accidental::Natural),
        (r"[fb]|\x{266D}|flat", Accidental::Flat),
        (r"[s#]|\x{266F}|sharp", Accidental::Sharp),
        (r"-|quarter[ -]flat", Accidental::QuarterFlat),
        (r"\+|quarter[ -]sharp", Accidental::QuarterSharp),
        (r"bb|\x{266D}\x{266D}|\x{1D12B}|double[ -]flat", Accidental::DoubleFlat),
        (r"##|x|\x{1D12A}|double[ -]sharp", Accidental::DoubleSharp),
        (r"b-|(three|3)[ -]quarter[ -]flat", Accidental::ThreeQuarterFlat),
        (r"#\+|(three|3)[ -]quarter[ -]sharp", Accidental::ThreeQuarterSharp),
    ]
    .into_iter()
    .map(|(pattern, accidental)| {
        let re = Regex::new(&format!("(?i)^(?:{pattern})$")).expect("accidental pattern");
        (re, accidental)
    })
    .collect()
});

impl Accidental {
    /// Default order tried by [`Note::from_cents`].
    pub const DEFAULT_PREFERENCE: [Accidental; 9] = [
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::Flat,
        Accidental::QuarterSharp,
        Accidental::QuarterFlat,
        Accidental::DoubleSharp,
        Accidental::DoubleFlat,
        Accidental::ThreeQuarterFlat,
        Accidental::ThreeQuarterSharp,
    ];

    /// Cents added to the letter.
    pub fn cents(self) -> f64 {
        match self {
            Accidental::Natural => 0.0,
            Accidental::Sharp => 100.0,
            Accidental::Flat => -100.0,
            Accidental::QuarterSharp => 50.0,
            Accidental::QuarterFlat => -50.0,
            Accidental::DoubleSharp => 200.0,
            Accidental::DoubleFlat => -200.0,
            Accidental::ThreeQuarterSharp => 150.0,
            Accidental::ThreeQuarterFlat => -150.0,
        }
    }

    /// ASCII symbol used when printing note names.
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::QuarterSharp => "+",
            Accidental::QuarterFlat => "-",
            Accidental::DoubleSharp => "x",
            Accidental::DoubleFlat => "bb",
            Accidental::ThreeQuarterSharp => "#+",
            Accidental::ThreeQuarterFlat => "b-",
        }
    }

    /// Matches a token against the accidental synonyms, case-insensitively.
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        ACCIDENTAL_PATTERNS
            .iter()
            .find(|(re, _)| re.is_match(token))
            .map(|(_, accidental)| *accidental)
            .ok_or_else(|| HarmonicsError::InvalidAccidental(token.to_string()))
    }
}

impl FromStr for Accidental {
    type Err = HarmonicsError;

    fn from_str(s: &str) -> Result<Self> {
        Accidental::parse(s)
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A remainder made only of a minus sign and digits.
static AMBIGUOUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-[0-9]+$").expect("ambiguous pattern"));

/// Trailing octave and fine-difference annotation.
static SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/?(-?[0-9]+)?( ([+-][0-9]+)c)?$").expect("suffix pattern")
});

/// A musical note with an optional deviation from its quarter-tone grid
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    letter: Letter,
    accidental: Accidental,
    octave: i32,
    difference: f64,
}

impl Note {
    pub fn new(letter: Letter, accidental: Accidental, octave: i32, difference: f64) -> Self {
        Self {
            letter,
            accidental,
            octave,
            difference,
        }
    }

    /// Parses a note name such as `C#4`, `Eb5`, `D5 -2c` or `Db- 5`.
    ///
    /// The octave defaults to 4 and the difference to 0.
    ///
    /// # Errors
    /// - `InvalidName` if the name does not start with a letter A-G.
    /// - `AmbiguousName` for names like `C-11`, where `-` could be a
    ///   quarter-flat or the sign of the octave.
    /// - `InvalidAccidental` if the accidental is not recognized.
    pub fn from_name(name: &str) -> Result<Self> {
        let input = name;
        let name = name.trim();
        let mut chars = name.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| HarmonicsError::InvalidName(input.to_string()))?;
        let rest = chars.as_str();

        if AMBIGUOUS.is_match(rest) {
            return Err(HarmonicsError::AmbiguousName(input.to_string()));
        }

        let mut octave = 4;
        let mut difference = 0.0;
        let mut accidental = rest;
        if let Some(caps) = SUFFIX.captures(rest) {
            if let Some(m) = caps.get(1) {
                octave = m
                    .as_str()
                    .parse()
                    .map_err(|_| HarmonicsError::InvalidName(input.to_string()))?;
            }
            if let Some(m) = caps.get(3) {
                difference = m
                    .as_str()
                    .parse::<i32>()
                    .map_err(|_| HarmonicsError::InvalidName(input.to_string()))?
                    as f64;
            }
            if let Some(m) = caps.get(0) {
                accidental = &rest[..m.start()];
            }
        }

        let accidental = Accidental::parse(accidental)?;
        Ok(Self::new(letter, accidental, octave, difference))
    }

    /// Builds the note nearest to `cents` above C4.
    ///
    /// `cents` is rounded to the nearest quarter-tone; the residual is kept
    /// as the note's difference. Spellings are tried in the order given by
    /// `preferred`, then [`Accidental::DEFAULT_PREFERENCE`].
    pub fn from_cents(cents: f64, preferred: &[Accidental]) -> Result<Self> {
        let rounded = (cents / GRID_CENTS).round() * GRID_CENTS;
        let difference = cents - rounded;
        let octave = (rounded / CENTS_PER_OCTAVE).floor() + 4.0;
        if !octave.is_finite() || octave < i32::MIN as f64 || octave > i32::MAX as f64 {
            return Err(HarmonicsError::NoteNameNotFound(cents));
        }
        let within_octave = rounded - (octave - 4.0) * CENTS_PER_OCTAVE;
        let octave = octave as i32;

        let mut order: Vec<Accidental> = Vec::with_capacity(preferred.len() + 9);
        for accidental in preferred.iter().chain(Accidental::DEFAULT_PREFERENCE.iter()) {
            if !order.contains(accidental) {
                order.push(*accidental);
            }
        }

        for accidental in order {
            let target = within_octave - accidental.cents();
            if let Some(letter) = Letter::ALL.iter().find(|l| approx_eq(l.cents(), target)) {
                return Ok(Self::new(*letter, accidental, octave, difference));
            }
        }

        Err(HarmonicsError::NoteNameNotFound(cents))
    }

    /// Builds the note nearest to `frequency` (Hz), given the frequency of A4.
    pub fn from_frequency(frequency: f64, a4: f64, preferred: &[Accidental]) -> Result<Self> {
        if frequency <= 0.0 || !frequency.is_finite() {
            return Err(HarmonicsError::InvalidFrequency(frequency));
        }
        if a4 <= 0.0 || !a4.is_finite() {
            return Err(HarmonicsError::InvalidFrequency(a4));
        }
        Self::from_cents(cents::above_c4(frequency, a4), preferred)
    }

    /// Returns the note as cents above C4.
    pub fn cents(&self) -> f64 {
        self.letter.cents()
            + self.accidental.cents()
            + (self.octave as f64 - 4.0) * CENTS_PER_OCTAVE
            + self.difference
    }

    /// Returns the note's frequency (Hz), given the frequency of A4.
    pub fn frequency(&self, a4: f64) -> f64 {
        cents::to_frequency(self.cents() - A4_CENTS, a4)
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Octave in scientific pitch notation.
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Deviation in cents from the quarter-tone grid.
    pub fn difference(&self) -> f64 {
        self.difference
    }
}

impl FromStr for Note {
    type Err = HarmonicsError;

    fn from_str(s: &str) -> Result<Self> {
        Note::from_name(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.letter, self.accidental, self.octave)?;
        let difference = self.difference.round();
        if difference != 0.0 {
            write!(f, " {:+}c", difference as i64)?;
        }
        Ok(())
    }
}
