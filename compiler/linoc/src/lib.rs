//! Lino CLI library: command handlers and run configuration for the
//! `lino` binary.

pub mod commands;
pub mod config;
pub mod tracing_setup;

pub use config::{parse_run_args, RunConfig};
