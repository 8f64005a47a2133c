use thiserror::Error;

/// Errors returned by pitch, string and harmonic operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarmonicsError {
    #[error("invalid note name: {0}")]
    InvalidName(String),

    #[error("ambiguous note: {0} (does \"-\" mean a quarter-flat or a negative octave?)")]
    AmbiguousName(String),

    #[error("invalid accidental: {0}")]
    InvalidAccidental(String),

    #[error("failed to find note name for cents: {0}")]
    NoteNameNotFound(f64),

    #[error("invalid frequency: {0}")]
    InvalidFrequency(f64),

    #[error("invalid string length: {0}")]
    InvalidStringLength(f64),

    #[error("invalid physical string length: {0}")]
    InvalidPhysicalLength(f64),

    #[error("the half-stop's string length ({half}) cannot be longer than the base stop's ({base})")]
    InvalidHarmonic { half: f64, base: f64 },

    #[error("invalid string length for a harmonic: {0}")]
    NotAHarmonicNode(f64),

    #[error("preset not found: {0}")]
    PresetNotFound(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HarmonicsError>;
