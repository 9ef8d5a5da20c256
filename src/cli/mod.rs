//! Command-line interface.
//!
//! The `settings` and `themes` subcommands are dispatched through a
//! [`CommandRegistry`] organised by category; `run` starts a desklet.

mod args;
mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use args::{Cli, Commands};
pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};
