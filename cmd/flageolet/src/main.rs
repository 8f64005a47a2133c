//! Flageolet CLI - find natural and artificial harmonics on stringed
//! instruments.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigCommand, FindCommand, InstrumentsCommand, NoteCommand};

/// Flageolet CLI - find natural and artificial harmonics.
///
/// Given a sounding note, lists every playable way to produce it as a
/// harmonic on the strings of an instrument, either built in (violin,
/// viola, cello, guitar, double-bass) or configured.
///
/// Configuration is stored in ~/.flageolet/config.yaml.
#[derive(Parser)]
#[command(name = "flageolet")]
#[command(about = "Harmonic fingering calculator")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.flageolet/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the harmonics that sound a note
    Find(FindCommand),
    /// Describe a note, frequency or cents value
    Note(NoteCommand),
    /// List available instruments
    Instruments(InstrumentsCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over -v.
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Find(cmd) => cmd.run(&cli),
        Commands::Note(cmd) => cmd.run(&cli),
        Commands::Instruments(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
