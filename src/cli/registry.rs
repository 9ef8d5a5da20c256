use std::collections::HashMap;

use crate::paths::DeskletPaths;

use super::{
    CliError, Command,
    commands::{settings, themes},
    types::CommandMetadata,
};

/// Registry for CLI commands organized by category.
///
/// ```text
/// registry
/// ├── settings
/// │   ├── edit
/// │   ├── get
/// │   ├── list
/// │   ├── schema
/// │   └── set
/// └── themes
///     └── list
/// ```
pub struct CommandRegistry {
    /// Nested HashMap structure: category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
    paths: DeskletPaths,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    ///
    /// Commands are added with [`register_command`](Self::register_command)
    /// or all at once with [`register_all_commands`](Self::register_all_commands).
    pub fn new(paths: DeskletPaths) -> Self {
        Self {
            categories: HashMap::new(),
            paths,
        }
    }

    /// Registers a command in the specified category.
    ///
    /// The command's metadata name is its key within the category; a command
    /// with the same name replaces the earlier one.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or command does
    /// not exist and `CliError::InvalidArguments` if the argument count does
    /// not fit the command. Other errors come from the command itself.
    pub fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find command '{command_name}'"))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args)
    }

    /// Lists all registered commands organized by category, sorted.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        let mut categories: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut command_list: Vec<String> = commands.keys().cloned().collect();
                command_list.sort();

                (category.clone(), command_list)
            })
            .collect();

        categories.sort();

        categories
    }

    /// Metadata of one registered command.
    pub fn metadata(&self, category: &str, command_name: &str) -> Option<CommandMetadata> {
        self.categories
            .get(category)?
            .get(command_name)
            .map(|command| command.metadata())
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers all available CLI commands in their respective categories.
    pub fn register_all_commands(&mut self) {
        let paths = self.paths.clone();
        settings::register_commands(self, &paths);
        themes::register_commands(self, &paths);
    }
}
