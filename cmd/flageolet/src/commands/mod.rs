//! CLI commands module.

mod config;
mod find;
mod instruments;
mod note;
mod util;

pub use config::ConfigCommand;
pub use find::FindCommand;
pub use instruments::InstrumentsCommand;
pub use note::NoteCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
