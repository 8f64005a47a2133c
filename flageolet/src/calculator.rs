//! Search for the harmonics that sound a given note on an instrument.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cents::{self, DEFAULT_A4};
use crate::error::Result;
use crate::harmonic::{Harmonic, string_lengths_for_number};
use crate::instrument::Instrument;
use crate::math::is_greater_than;
use crate::note::Note;
use crate::stop::Stop;
use crate::string::{MAX_HARMONIC_NUMBER, VibratingString};

/// Highest natural harmonic searched by default.
pub const DEFAULT_MAX_NATURAL_NUMBER: u32 = 8;

/// Highest artificial harmonic searched by default (a minor third between
/// the stops).
pub const DEFAULT_MAX_ARTIFICIAL_NUMBER: u32 = 6;

/// Playability constraints for a harmonic search.
///
/// Distances are in mm, the tolerance in cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Minimum distance between the two stops of an artificial harmonic.
    pub min_stop_distance: f64,

    /// Maximum distance between the two stops of an artificial harmonic
    /// (the hand's stretch).
    pub max_stop_distance: f64,

    /// Minimum distance between the half-stop and the bridge, leaving room
    /// to bow or pluck.
    pub min_bowed_distance: f64,

    /// Maximum deviation between a natural harmonic and the requested note.
    pub tolerance: f64,

    /// Highest natural harmonic number searched, capped at
    /// [`MAX_HARMONIC_NUMBER`].
    pub max_natural_number: u32,

    /// Highest artificial harmonic number searched (from 2), capped at
    /// [`MAX_HARMONIC_NUMBER`].
    pub max_artificial_number: u32,

    /// Frequency of A4 (Hz).
    pub reference_frequency: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_stop_distance: 1.0,
            max_stop_distance: 120.0,
            min_bowed_distance: 20.0,
            tolerance: 50.0,
            max_natural_number: DEFAULT_MAX_NATURAL_NUMBER,
            max_artificial_number: DEFAULT_MAX_ARTIFICIAL_NUMBER,
            reference_frequency: DEFAULT_A4,
        }
    }
}

/// Finds natural and artificial harmonics for a sounding note.
///
/// Searching takes `&self`; constraints can only change through `&mut
/// self`, so a calculator can be shared between threads once configured.
#[derive(Debug, Clone, Default)]
pub struct HarmonicCalculator {
    constraints: Constraints,
}

impl HarmonicCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraints(constraints: Constraints) -> Self {
        Self { constraints }
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Sets the minimum and maximum distance (mm) between harmonic stops.
    pub fn set_distance_constraints(&mut self, min: f64, max: f64) {
        self.constraints.min_stop_distance = min;
        self.constraints.max_stop_distance = max;
    }

    /// Sets the minimum distance (mm) between the half-stop and the bridge.
    pub fn set_min_bowed_distance(&mut self, distance: f64) {
        self.constraints.min_bowed_distance = distance;
    }

    /// Sets the maximum deviation (cents) for natural harmonics.
    pub fn set_tolerance(&mut self, cents: f64) {
        self.constraints.tolerance = cents;
    }

    pub fn set_max_natural_number(&mut self, number: u32) {
        self.constraints.max_natural_number = number;
    }

    pub fn set_max_artificial_number(&mut self, number: u32) {
        self.constraints.max_artificial_number = number;
    }

    /// Sets the frequency of A4 (Hz) used to tune the sounding note.
    pub fn set_reference_frequency(&mut self, a4: f64) {
        self.constraints.reference_frequency = a4;
    }

    /// Returns every playable harmonic that sounds `note` on `instrument`.
    ///
    /// Harmonics are grouped by string in instrument order. Within a string,
    /// natural harmonics come before artificial ones, each in ascending
    /// harmonic number. An empty result is not an error.
    pub fn find_harmonics<'a>(&self, note: &Note, instrument: &'a Instrument) -> Result<Vec<Harmonic<'a>>> {
        let mut harmonics = Vec::new();
        for string in instrument.strings() {
            harmonics.extend(self.find_string_harmonics(note, string)?);
        }
        Ok(harmonics)
    }

    /// Returns the playable harmonics that sound `note` on one string.
    pub fn find_string_harmonics<'a>(
        &self,
        note: &Note,
        string: &'a VibratingString,
    ) -> Result<Vec<Harmonic<'a>>> {
        let natural = self.natural_harmonics(note, string)?;
        let artificial = self.artificial_harmonics(note, string)?;
        let candidates = natural.len() + artificial.len();

        let harmonics: Vec<Harmonic<'a>> = natural
            .into_iter()
            .chain(artificial)
            .filter(|h| self.is_playable(h))
            .collect();

        debug!(
            string = string.frequency(),
            candidates,
            playable = harmonics.len(),
            "searched string for {}",
            note
        );
        Ok(harmonics)
    }

    fn natural_harmonics<'a>(&self, note: &Note, string: &'a VibratingString) -> Result<Vec<Harmonic<'a>>> {
        let a4 = self.constraints.reference_frequency;
        let sounding_cents = note.cents();
        let mut harmonics = Vec::new();

        for number in 1..=self.constraints.max_natural_number.min(MAX_HARMONIC_NUMBER) {
            let candidate = Stop::new(1.0 / number as f64)?.frequency(string);
            let difference = (cents::above_c4(candidate, a4) - sounding_cents).abs();
            if difference > self.constraints.tolerance {
                continue;
            }
            for length in string_lengths_for_number(number, true) {
                harmonics.push(Harmonic::natural(Stop::new(length)?, string)?);
            }
        }

        Ok(harmonics)
    }

    fn artificial_harmonics<'a>(&self, note: &Note, string: &'a VibratingString) -> Result<Vec<Harmonic<'a>>> {
        let sounding = note.frequency(self.constraints.reference_frequency);
        let mut harmonics = Vec::new();

        for number in 2..=self.constraints.max_artificial_number.min(MAX_HARMONIC_NUMBER) {
            let fundamental = sounding / number as f64;
            // The fundamental must be fingered, i.e. above the open string.
            if !is_greater_than(fundamental, string.frequency()) {
                continue;
            }
            let base_stop = Stop::from_frequency(fundamental, string)?;
            let ratio = (number - 1) as f64 / number as f64;
            let half_stop = Stop::new(ratio * base_stop.length())?;
            harmonics.push(Harmonic::new(half_stop, base_stop, string)?);
        }

        Ok(harmonics)
    }

    fn is_playable(&self, harmonic: &Harmonic<'_>) -> bool {
        let c = &self.constraints;

        let bowed = harmonic.bowed_distance();
        if bowed < c.min_bowed_distance {
            trace!(bowed, "half-stop too close to the bridge");
            return false;
        }

        if harmonic.is_natural() {
            return true;
        }

        let distance = harmonic.stop_distance();
        if distance < c.min_stop_distance || distance > c.max_stop_distance {
            trace!(distance, "stops too close or too far apart");
            return false;
        }

        true
    }
}
