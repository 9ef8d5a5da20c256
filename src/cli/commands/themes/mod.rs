//! Theme discovery commands.
mod list;

pub use list::ListCommand;

use crate::{cli::CommandRegistry, paths::DeskletPaths};

/// Registers all theme commands with the command registry.
pub fn register_commands(registry: &mut CommandRegistry, paths: &DeskletPaths) {
    const CATEGORY_NAME: &str = "themes";

    registry.register_command(CATEGORY_NAME, Box::new(ListCommand::new(paths.clone())));
}
