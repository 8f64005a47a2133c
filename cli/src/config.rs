//! Configuration management for the flageolet CLI.
//!
//! Configuration is stored in ~/.flageolet/config.yaml and holds the search
//! constraints plus any custom instruments.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use flageolet::{Constraints, DEFAULT_PHYSICAL_LENGTH, Instrument, Preset};

/// Default configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".flageolet";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Instrument used when neither a name nor a current instrument is set.
pub const DEFAULT_INSTRUMENT: Preset = Preset::Violin;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Constraints applied to every search.
    #[serde(default)]
    pub constraints: Constraints,

    /// Name of the instrument used when none is given.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_instrument: String,

    /// Custom instruments by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub instruments: BTreeMap<String, InstrumentConfig>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

/// A custom instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Open strings as note names, highest first.
    pub strings: Vec<String>,

    /// Vibrating string length (mm).
    #[serde(default = "default_length")]
    pub length: f64,
}

fn default_length() -> f64 {
    DEFAULT_PHYSICAL_LENGTH
}

impl InstrumentConfig {
    pub fn new(strings: Vec<String>, length: f64) -> Self {
        Self { strings, length }
    }

    /// Tunes the strings against the given A4 (Hz).
    pub fn build(&self, a4: f64) -> flageolet::Result<Instrument> {
        Instrument::from_names(&self.strings, self.length, a4)
    }
}

impl Config {
    /// Gets the default config directory.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
    }

    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the configuration to disk, creating the directory if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)
            .with_context(|| format!("writing {}", self.config_path.display()))?;
        Ok(())
    }

    /// Adds or replaces a custom instrument.
    ///
    /// The string names are checked before anything is written.
    pub fn add_instrument(&mut self, name: &str, instrument: InstrumentConfig) -> anyhow::Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("instrument name must not be empty");
        }
        if instrument.strings.is_empty() {
            anyhow::bail!("instrument '{}' has no strings", name);
        }
        instrument
            .build(self.constraints.reference_frequency)
            .with_context(|| format!("invalid instrument '{}'", name))?;
        self.instruments.insert(name.to_string(), instrument);
        self.save()
    }

    /// Deletes a custom instrument.
    pub fn delete_instrument(&mut self, name: &str) -> anyhow::Result<()> {
        if self.instruments.remove(name).is_none() {
            anyhow::bail!("instrument '{}' not found", name);
        }
        if self.current_instrument == name {
            self.current_instrument.clear();
        }
        self.save()
    }

    /// Sets the current instrument. Both custom instruments and presets are
    /// accepted.
    pub fn use_instrument(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.instruments.contains_key(name) && name.parse::<Preset>().is_err() {
            anyhow::bail!("instrument '{}' not found", name);
        }
        self.current_instrument = name.to_string();
        self.save()
    }

    /// Resolves an instrument by name, or the current instrument if no
    /// name is given.
    ///
    /// Custom instruments shadow presets of the same name. Returns the
    /// resolved name along with the tuned instrument.
    pub fn resolve_instrument(&self, name: Option<&str>, a4: f64) -> anyhow::Result<(String, Instrument)> {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ if !self.current_instrument.is_empty() => self.current_instrument.as_str(),
            _ => DEFAULT_INSTRUMENT.name(),
        };

        if let Some(custom) = self.instruments.get(name) {
            let instrument = custom
                .build(a4)
                .with_context(|| format!("invalid instrument '{}'", name))?;
            return Ok((name.to_string(), instrument));
        }

        let preset: Preset = name
            .parse()
            .map_err(|_| anyhow::anyhow!("instrument '{}' not found", name))?;
        Ok((preset.name().to_string(), Instrument::from_preset(preset, a4)?))
    }

    /// Lists custom instrument names in order.
    pub fn list_instruments(&self) -> Vec<&str> {
        self.instruments.keys().map(|s| s.as_str()).collect()
    }
}

/// Loads the configuration, or defaults when the file does not exist yet.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?
        }
    } else {
        Config::default()
    };

    cfg.config_path = config_path;
    Ok(cfg)
}
