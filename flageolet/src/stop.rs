//! Stops: points on a string where it is pressed or touched.

use serde::{Deserialize, Serialize};

use crate::error::{HarmonicsError, Result};
use crate::math::{approx_eq, is_zero};
use crate::string::VibratingString;

/// A point on a string, as the fraction of the string between the stop and
/// the bridge. `1.0` is the open string.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Stop {
    length: f64,
}

impl Stop {
    /// The open string.
    pub const OPEN: Stop = Stop { length: 1.0 };

    /// Creates a stop; `length` must lie in `(0, 1]`.
    pub fn new(length: f64) -> Result<Self> {
        if !length.is_finite() || length <= 0.0 || length > 1.0 {
            return Err(HarmonicsError::InvalidStringLength(length));
        }
        Ok(Self { length })
    }

    /// Creates the stop that sounds `frequency` (Hz) on `string`.
    pub fn from_frequency(frequency: f64, string: &VibratingString) -> Result<Self> {
        if is_zero(frequency) || frequency < 0.0 {
            return Err(HarmonicsError::InvalidFrequency(frequency));
        }
        Self::new(string.string_length(frequency))
    }

    /// The stopped frequency (normal pressure) of this stop on `string`.
    pub fn frequency(&self, string: &VibratingString) -> f64 {
        string.stopped_frequency(self.length)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_open(&self) -> bool {
        approx_eq(self.length, 1.0)
    }
}

impl TryFrom<f64> for Stop {
    type Error = HarmonicsError;

    fn try_from(length: f64) -> Result<Self> {
        Stop::new(length)
    }
}

impl From<Stop> for f64 {
    fn from(stop: Stop) -> f64 {
        stop.length
    }
}
