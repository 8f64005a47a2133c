//! Conversions between frequencies, string lengths and cents.
//!
//! A cent is 1/1200 of an octave. All conversions are plain `f64`
//! arithmetic; degenerate inputs collapse to 0 instead of producing NaN.

use crate::math::is_zero;

/// Cents in one octave.
pub const CENTS_PER_OCTAVE: f64 = 1200.0;

/// Standard concert pitch for A4 (Hz).
pub const DEFAULT_A4: f64 = 440.0;

/// Cents from C4 up to A4.
pub const A4_CENTS: f64 = 900.0;

/// Returns the number of cents from `lower` up to `upper` (both in Hz).
///
/// Returns 0 when `lower` is zero or negative, and also when `upper` is
/// zero or negative. Otherwise swapping the arguments negates the result.
pub fn between(lower: f64, upper: f64) -> f64 {
    if lower <= 0.0 || is_zero(lower) || upper <= 0.0 {
        return 0.0;
    }
    CENTS_PER_OCTAVE * (upper / lower).log2()
}

/// Returns the frequency `cents` above `base`.
pub fn to_frequency(cents: f64, base: f64) -> f64 {
    base * 2f64.powf(cents / CENTS_PER_OCTAVE)
}

/// Returns the string length (fraction of the open string) that sounds
/// `cents` above the open string.
pub fn to_string_length(cents: f64) -> f64 {
    1.0 / 2f64.powf(cents / CENTS_PER_OCTAVE)
}

/// Returns the interval in cents between the open string and a stop at
/// `length`.
pub fn from_string_length(length: f64) -> f64 {
    between(length, 1.0)
}

/// Returns `frequency` as cents above C4, given the frequency of A4.
pub fn above_c4(frequency: f64, a4: f64) -> f64 {
    between(a4, frequency) + A4_CENTS
}
