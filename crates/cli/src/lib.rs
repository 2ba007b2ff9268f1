//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Routing keys to hosts
//! - Inspecting ring state and ownership
//! - Measuring key movement when a host leaves

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
