use crate::paths::DeskletPaths;

use super::{CliError, CommandRegistry, types::CommandMetadata};

/// High-level service for managing and executing CLI commands.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// # Arguments
    /// * `paths` - Locations of instance settings, the template and themes
    pub fn new(paths: DeskletPaths) -> Self {
        let mut registry = CommandRegistry::new(paths);
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist in the category.
    /// Other errors are returned by the command itself.
    pub fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(category, command_name, args)
    }

    /// Lists all available commands organized by category.
    ///
    /// # Returns
    /// Vector of (category_name, command_names) tuples
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Metadata of one command, for help output.
    pub fn describe(&self, category: &str, command_name: &str) -> Option<CommandMetadata> {
        self.registry.metadata(category, command_name)
    }
}
