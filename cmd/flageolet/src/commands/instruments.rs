//! Instrument listing command.

use clap::Args;
use serde::Serialize;

use flageolet::Preset;
use flageolet_cli::Config;

use super::{get_config, output_result};
use crate::Cli;

/// List built-in presets and configured instruments.
///
/// Configured instruments shadow presets with the same name.
#[derive(Args)]
pub struct InstrumentsCommand {}

#[derive(Debug, Serialize)]
struct InstrumentEntry {
    name: String,
    source: &'static str,
    current: bool,
    strings: Vec<String>,
    length: f64,
}

impl InstrumentsCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        output_result(cli, &list(&cfg))
    }
}

fn list(cfg: &Config) -> Vec<InstrumentEntry> {
    let current = |name: &str| cfg.current_instrument == name;

    let mut entries: Vec<InstrumentEntry> = cfg
        .instruments
        .iter()
        .map(|(name, instrument)| InstrumentEntry {
            name: name.clone(),
            source: "config",
            current: current(name),
            strings: instrument.strings.clone(),
            length: instrument.length,
        })
        .collect();

    for preset in Preset::ALL {
        if cfg.instruments.contains_key(preset.name()) {
            continue;
        }
        entries.push(InstrumentEntry {
            name: preset.name().to_string(),
            source: "preset",
            current: current(preset.name()),
            strings: preset.string_names().iter().map(|s| s.to_string()).collect(),
            length: preset.string_length(),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use flageolet_cli::{InstrumentConfig, load_config};

    #[test]
    fn test_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut cfg = load_config(path.to_str()).unwrap();
        cfg.add_instrument("violin", InstrumentConfig::new(vec!["E5".into(), "A4".into()], 330.0))
            .unwrap();
        cfg.use_instrument("cello").unwrap();

        let entries = list(&cfg);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["violin", "viola", "cello", "guitar", "double-bass"]);
        assert_eq!(entries[0].source, "config");
        assert_eq!(entries[0].length, 330.0);
        assert!(entries[2].current);
        assert!(!entries[0].current);
    }
}
