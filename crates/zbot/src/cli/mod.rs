//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the zbot binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands, MetadataCommands, StoreArg};
pub use handlers::{handle_command, parse_metadata_value};
