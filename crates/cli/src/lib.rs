//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Locating the owner of keys
//! - Reporting ring ownership and sampled key distribution
//! - Measuring how many keys move when a member leaves

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
