//! The acoustic model of a single open string.

use serde::{Deserialize, Serialize};

use crate::cents;
use crate::error::{HarmonicsError, Result};
use crate::math::{gcd, is_zero};

/// Physical length (mm) assumed for a string when none is given.
pub const DEFAULT_PHYSICAL_LENGTH: f64 = 500.0;

/// Largest harmonic number accepted as a playable node.
pub const MAX_HARMONIC_NUMBER: u32 = 100;

/// One string, tuned to an open frequency.
///
/// String lengths passed to the methods below are fractions of the
/// vibrating length, measured from the bridge: 1.0 is the open string,
/// 0.5 the octave stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VibratingString {
    frequency: f64,
    physical_length: f64,
}

impl VibratingString {
    /// Creates a string with the [`DEFAULT_PHYSICAL_LENGTH`].
    pub fn new(frequency: f64) -> Result<Self> {
        Self::with_physical_length(frequency, DEFAULT_PHYSICAL_LENGTH)
    }

    /// Creates a string with an explicit physical length (mm).
    pub fn with_physical_length(frequency: f64, physical_length: f64) -> Result<Self> {
        if !frequency.is_finite() || frequency <= 0.0 || is_zero(frequency) {
            return Err(HarmonicsError::InvalidFrequency(frequency));
        }
        if !physical_length.is_finite() || physical_length <= 0.0 {
            return Err(HarmonicsError::InvalidPhysicalLength(physical_length));
        }
        Ok(Self {
            frequency,
            physical_length,
        })
    }

    /// Open string frequency (Hz).
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Physical vibrating length (mm).
    pub fn physical_length(&self) -> f64 {
        self.physical_length
    }

    /// Frequency of the string stopped (fully pressed) at `length`.
    ///
    /// Returns 0 for a zero length.
    pub fn stopped_frequency(&self, length: f64) -> f64 {
        if is_zero(length) {
            return 0.0;
        }
        self.frequency / length
    }

    /// Sounding frequency of a harmonic-pressure (flageolet) touch at
    /// `length`. Either side of a node gives the same result: 0.2 and 0.8
    /// both sound the 5th harmonic.
    ///
    /// Returns 0 for a zero length.
    pub fn harmonic_sounding_frequency(&self, length: f64) -> Result<f64> {
        if is_zero(length) {
            return Ok(0.0);
        }
        Ok(self.frequency * harmonic_number(length)? as f64)
    }

    /// String length needed to sound `frequency` (Hz) when stopped.
    ///
    /// Returns 0 for a zero frequency.
    pub fn string_length(&self, frequency: f64) -> f64 {
        if is_zero(frequency) {
            return 0.0;
        }
        cents::to_string_length(cents::between(self.frequency, frequency))
    }
}

/// Converts a string length into the number of the harmonic sounded by a
/// flageolet touch there.
///
/// # Errors
/// - `InvalidStringLength` if `length` is outside `(0, 1]`.
/// - `NotAHarmonicNode` if the reduced harmonic number exceeds
///   [`MAX_HARMONIC_NUMBER`].
pub fn harmonic_number(length: f64) -> Result<u32> {
    if !length.is_finite() || length <= 0.0 || is_zero(length) || length > 1.0 + crate::math::EPSILON {
        return Err(HarmonicsError::InvalidStringLength(length));
    }
    let number = (1.0 / gcd(1.0, length)).round();
    if number > MAX_HARMONIC_NUMBER as f64 {
        return Err(HarmonicsError::NotAHarmonicNode(length));
    }
    Ok(number as u32)
}

/// Returns the first `limit` partial sums of the harmonic series,
/// `1, 1 + 1/2, 1 + 1/2 + 1/3, ...`.
pub fn harmonic_series(limit: u32) -> Vec<f64> {
    (1..=limit)
        .scan(0.0, |sum, n| {
            *sum += 1.0 / n as f64;
            Some(*sum)
        })
        .collect()
}
