//! CLI utilities for flageolet.
//!
//! This crate provides the configuration file and output helpers shared by
//! the `flageolet` command.

pub mod config;
pub mod output;

pub use config::{Config, InstrumentConfig, load_config};
pub use output::{Output, OutputFormat, print_verbose};
