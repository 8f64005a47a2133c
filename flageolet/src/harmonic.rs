//! Harmonic fingerings: a base stop, a lightly touched half-stop, and the
//! string they are played on.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{HarmonicsError, Result};
use crate::math::{gcd_u32, is_greater_than};
use crate::stop::Stop;
use crate::string::{VibratingString, harmonic_number};

/// How a harmonic is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicKind {
    /// The open string itself (both stops at 1.0).
    Open,
    /// A node touched on the open string.
    Natural,
    /// A node touched above a fingered stop.
    Artificial,
}

/// A harmonic on a string.
///
/// The half-stop is where the string is touched lightly; the base stop is
/// where it is pressed (1.0 for natural harmonics). Both are measured from
/// the bridge, so the half-stop can never be the longer of the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic<'a> {
    half_stop: Stop,
    base_stop: Stop,
    string: &'a VibratingString,
    number: u32,
}

impl<'a> Harmonic<'a> {
    /// Creates a harmonic.
    ///
    /// # Errors
    /// - `InvalidHarmonic` if the half-stop is longer than the base stop.
    /// - `NotAHarmonicNode` if the half-stop does not fall on a node of the
    ///   stopped string.
    pub fn new(half_stop: Stop, base_stop: Stop, string: &'a VibratingString) -> Result<Self> {
        if is_greater_than(half_stop.length(), base_stop.length()) {
            return Err(HarmonicsError::InvalidHarmonic {
                half: half_stop.length(),
                base: base_stop.length(),
            });
        }
        let relative = (half_stop.length() / base_stop.length()).min(1.0);
        let number = harmonic_number(relative)?;
        Ok(Self {
            half_stop,
            base_stop,
            string,
            number,
        })
    }

    /// Creates a natural harmonic, touched at `half_stop` on the open string.
    pub fn natural(half_stop: Stop, string: &'a VibratingString) -> Result<Self> {
        Self::new(half_stop, Stop::OPEN, string)
    }

    pub fn half_stop(&self) -> Stop {
        self.half_stop
    }

    pub fn base_stop(&self) -> Stop {
        self.base_stop
    }

    pub fn string(&self) -> &'a VibratingString {
        self.string
    }

    /// Harmonic number, relative to the stopped string.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Sounding frequency (Hz).
    ///
    /// The base stop forms a shorter pseudo-string; the half-stop is
    /// transposed onto it and sounds the matching overtone of the stopped
    /// pitch.
    pub fn sounding_frequency(&self) -> f64 {
        self.string.stopped_frequency(self.base_stop.length()) * self.number as f64
    }

    pub fn is_natural(&self) -> bool {
        self.base_stop.is_open()
    }

    pub fn is_open_string(&self) -> bool {
        self.base_stop.is_open() && self.half_stop.is_open()
    }

    pub fn kind(&self) -> HarmonicKind {
        if self.is_open_string() {
            HarmonicKind::Open
        } else if self.is_natural() {
            HarmonicKind::Natural
        } else {
            HarmonicKind::Artificial
        }
    }

    /// Physical distance (mm) between the base stop and the half-stop.
    pub fn stop_distance(&self) -> f64 {
        (self.base_stop.length() - self.half_stop.length()) * self.string.physical_length()
    }

    /// Physical distance (mm) between the half-stop and the bridge.
    pub fn bowed_distance(&self) -> f64 {
        self.half_stop.length() * self.string.physical_length()
    }
}

impl Serialize for Harmonic<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Harmonic", 6)?;
        s.serialize_field("kind", &self.kind())?;
        s.serialize_field("number", &self.number)?;
        s.serialize_field("base_stop", &self.base_stop)?;
        s.serialize_field("half_stop", &self.half_stop)?;
        s.serialize_field("string_frequency", &self.string.frequency())?;
        s.serialize_field("sounding_frequency", &self.sounding_frequency())?;
        s.end()
    }
}

/// Returns the string lengths at which harmonic `number` can be touched,
/// in ascending order.
///
/// With `exclusive`, lengths shared with a lower harmonic are left out:
/// 0.5 belongs to harmonic 2 only, not to 4, 6, 8, ...
pub fn string_lengths_for_number(number: u32, exclusive: bool) -> Vec<f64> {
    (1..=number)
        .filter(|&k| !exclusive || k == 1 || gcd_u32(k, number) == 1)
        .map(|k| k as f64 / number as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounding_frequency_natural() {
        let string = VibratingString::new(440.0).unwrap();
        let cases = [
            (1.0, 440.0),
            (1.0 / 2.0, 880.0),
            (1.0 / 3.0, 1320.0),
            (2.0 / 3.0, 1320.0),
            (1.0 / 4.0, 1760.0),
            (1.0 / 5.0, 2200.0),
            (1.0 / 6.0, 2640.0),
            (1.0 / 7.0, 3080.0),
            (1.0 / 8.0, 3520.0),
            (1.0 / 9.0, 3960.0),
            (1.0 / 10.0, 4400.0),
            (1.0 / 12.0, 5280.0),
            (1.0 / 16.0, 7040.0),
            (5.0 / 16.0, 7040.0),
        ];
        for (half, want) in cases {
            let harmonic = Harmonic::natural(Stop::new(half).unwrap(), &string).unwrap();
            let got = harmonic.sounding_frequency();
            assert!((got - want).abs() < 1e-9, "half {half}: got {got}, want {want}");
        }
    }

    #[test]
    fn test_sounding_frequency_artificial() {
        let string = VibratingString::new(440.0).unwrap();
        for i in 1..=5 {
            let frequency = 440.0 * i as f64 * 9.0 / 8.0;
            let base = Stop::from_frequency(frequency, &string).unwrap();

            // A fourth apart: two octaves above the stopped note.
            let half = Stop::from_frequency(frequency * 4.0 / 3.0, &string).unwrap();
            let h = Harmonic::new(half, base, &string).unwrap();
            assert!((h.sounding_frequency() - frequency * 4.0).abs() < 1e-6);
            assert_eq!(h.number(), 4);

            // A fifth apart: an octave above the upper note.
            let half = Stop::from_frequency(frequency * 3.0 / 2.0, &string).unwrap();
            let h = Harmonic::new(half, base, &string).unwrap();
            assert!((h.sounding_frequency() - frequency * 3.0).abs() < 1e-6);
            assert_eq!(h.number(), 3);

            // An octave apart: the upper note.
            let half = Stop::from_frequency(frequency * 2.0, &string).unwrap();
            let h = Harmonic::new(half, base, &string).unwrap();
            assert!((h.sounding_frequency() - frequency * 2.0).abs() < 1e-6);
            assert_eq!(h.number(), 2);
        }
    }

    #[test]
    fn test_number() {
        let string = VibratingString::new(100.0).unwrap();
        let cases = [
            (1, 2, 2),
            (2, 3, 3),
            (3, 3, 1),
            (2, 4, 2),
            (3, 4, 4),
            (3, 5, 5),
            (3, 6, 2),
            (4, 6, 3),
            (5, 6, 6),
            (99, 100, 100),
        ];
        for (n, d, want) in cases {
            let half = Stop::new(n as f64 / d as f64).unwrap();
            let harmonic = Harmonic::natural(half, &string).unwrap();
            assert_eq!(harmonic.number(), want, "{n}/{d}");
        }
    }

    #[test]
    fn test_invalid_harmonic() {
        let string = VibratingString::new(440.0).unwrap();
        let result = Harmonic::new(Stop::new(0.2).unwrap(), Stop::new(0.1).unwrap(), &string);
        assert_eq!(
            result.unwrap_err(),
            HarmonicsError::InvalidHarmonic { half: 0.2, base: 0.1 }
        );
    }

    #[test]
    fn test_not_a_node() {
        let string = VibratingString::new(440.0).unwrap();
        let result = Harmonic::natural(Stop::new(199.0 / 200.0).unwrap(), &string);
        assert!(matches!(result, Err(HarmonicsError::NotAHarmonicNode(_))));
    }

    #[test]
    fn test_kind() {
        let string = VibratingString::with_physical_length(196.0, 325.0).unwrap();

        let open = Harmonic::natural(Stop::OPEN, &string).unwrap();
        assert_eq!(open.kind(), HarmonicKind::Open);
        assert!(open.is_open_string());
        assert!(open.is_natural());

        let natural = Harmonic::natural(Stop::new(0.5).unwrap(), &string).unwrap();
        assert_eq!(natural.kind(), HarmonicKind::Natural);
        assert!(!natural.is_open_string());

        let artificial =
            Harmonic::new(Stop::new(0.375).unwrap(), Stop::new(0.75).unwrap(), &string).unwrap();
        assert_eq!(artificial.kind(), HarmonicKind::Artificial);
        assert!(!artificial.is_natural());
        assert!((artificial.stop_distance() - 0.375 * 325.0).abs() < 1e-9);
        assert!((artificial.bowed_distance() - 0.375 * 325.0).abs() < 1e-9);
    }

    #[test]
    fn test_string_lengths_for_number() {
        let cases: &[(u32, &[(u32, u32)])] = &[
            (1, &[(1, 1)]),
            (2, &[(1, 2)]),
            (3, &[(1, 3), (2, 3)]),
            (4, &[(1, 4), (3, 4)]),
            (5, &[(1, 5), (2, 5), (3, 5), (4, 5)]),
            (6, &[(1, 6), (5, 6)]),
            (7, &[(1, 7), (2, 7), (3, 7), (4, 7), (5, 7), (6, 7)]),
            (8, &[(1, 8), (3, 8), (5, 8), (7, 8)]),
            (9, &[(1, 9), (2, 9), (4, 9), (5, 9), (7, 9), (8, 9)]),
            (10, &[(1, 10), (3, 10), (7, 10), (9, 10)]),
        ];
        for (number, fractions) in cases {
            let want: Vec<f64> = fractions.iter().map(|&(n, d)| n as f64 / d as f64).collect();
            assert_eq!(string_lengths_for_number(*number, true), want, "harmonic {number}");
        }
    }

    #[test]
    fn test_string_lengths_for_number_inclusive() {
        assert_eq!(string_lengths_for_number(4, false), vec![0.25, 0.5, 0.75, 1.0]);
        assert!(string_lengths_for_number(0, false).is_empty());
    }

    #[test]
    fn test_serialize() {
        let string = VibratingString::new(440.0).unwrap();
        let harmonic = Harmonic::natural(Stop::new(0.5).unwrap(), &string).unwrap();
        let value = serde_json::to_value(harmonic).unwrap();
        assert_eq!(value["kind"], "natural");
        assert_eq!(value["number"], 2);
        assert_eq!(value["base_stop"], 1.0);
        assert_eq!(value["half_stop"], 0.5);
        assert_eq!(value["sounding_frequency"], 880.0);
    }
}
