use schemars::schema_for;

use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    settings::ClockSettings,
};

/// Prints the JSON schema of the settings file.
pub struct SchemaCommand;

impl SchemaCommand {
    /// Creates a new SchemaCommand.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchemaCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for SchemaCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let schema = schema_for!(ClockSettings);

        serde_json::to_string_pretty(&schema)
            .map_err(|e| CliError::SettingsError(format!("Failed to serialize schema: {e}")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "schema".to_string(),
            description: "Print the JSON schema of the settings file".to_string(),
            category: "settings".to_string(),
            args: Vec::new(),
            examples: vec!["analog-clock settings schema".to_string()],
        }
    }
}
