//! Harmonic fingerings for stringed instruments.
//!
//! This crate models pitch on a vibrating string and searches for the
//! natural and artificial harmonics (flageolets) that sound a requested
//! note:
//!
//! - [`cents`]: frequency ratios in cents
//! - [`Note`]: note names, cents above C4, frequencies
//! - [`VibratingString`] and [`Stop`]: string lengths and stopped pitches
//! - [`Harmonic`]: a base stop plus a lightly touched half-stop
//! - [`HarmonicCalculator`]: the search, with playability [`Constraints`]
//! - [`Instrument`]: strings to search, with built-in [`Preset`]s
//!
//! # Example
//!
//! ```rust
//! use flageolet::{HarmonicCalculator, Instrument, Note, Preset, DEFAULT_A4};
//!
//! let violin = Instrument::from_preset(Preset::Violin, DEFAULT_A4).unwrap();
//! let note = Note::from_name("A5").unwrap();
//!
//! let calculator = HarmonicCalculator::new();
//! for harmonic in calculator.find_harmonics(&note, &violin).unwrap() {
//!     println!(
//!         "{:?}: base {:.2}, half {:.2}, {:.1} Hz",
//!         harmonic.kind(),
//!         harmonic.base_stop().length(),
//!         harmonic.half_stop().length(),
//!         harmonic.sounding_frequency(),
//!     );
//! }
//! ```

pub mod cents;
pub mod math;

mod calculator;
mod error;
mod harmonic;
mod instrument;
mod note;
mod stop;
mod string;

pub use calculator::{
    Constraints, DEFAULT_MAX_ARTIFICIAL_NUMBER, DEFAULT_MAX_NATURAL_NUMBER, HarmonicCalculator,
};
pub use cents::DEFAULT_A4;
pub use error::{HarmonicsError, Result};
pub use harmonic::{Harmonic, HarmonicKind, string_lengths_for_number};
pub use instrument::{Instrument, Preset};
pub use note::{Accidental, GRID_CENTS, Letter, Note};
pub use stop::Stop;
pub use string::{
    DEFAULT_PHYSICAL_LENGTH, MAX_HARMONIC_NUMBER, VibratingString, harmonic_number,
    harmonic_series,
};

#[cfg(test)]
mod tests;
