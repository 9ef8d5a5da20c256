use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_json_value,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    paths::DeskletPaths,
};

use super::{ensure_known_key, peek_store};

/// Command for reading a single setting of an instance.
///
/// # Example Usage
///
/// ```bash
/// analog-clock settings get desklet-0 size
/// analog-clock settings get desklet-0 timezone
/// ```
pub struct GetCommand {
    paths: DeskletPaths,
}

impl GetCommand {
    /// Creates a new GetCommand resolving files below `paths`.
    pub fn new(paths: DeskletPaths) -> Self {
        Self { paths }
    }
}

impl Command for GetCommand {
    /// Prints `key: value` for the requested key.
    ///
    /// # Errors
    ///
    /// * `CliError::InvalidArguments` - If the key is not part of the schema
    /// * `CliError::SettingsError` - If the settings cannot be read
    fn execute(&self, args: &[String]) -> CommandResult {
        let (Some(instance), Some(key)) = (args.first(), args.get(1)) else {
            return Err(CliError::InvalidArguments(
                "Expected <instance> <key> arguments for 'get' command".to_string(),
            ));
        };

        ensure_known_key(&self.paths, key)?;
        let values = peek_store(&self.paths, instance)?;

        let value = values
            .get(key)
            .ok_or_else(|| CliError::SettingsError(format!("'{key}' has no value")))?;

        Ok(format!("{key}: {}", format_json_value(value)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Get a setting of a desklet instance".to_string(),
            category: "settings".to_string(),
            args: vec![
                CommandArg {
                    name: "instance".to_string(),
                    description: "Desklet instance id".to_string(),
                    required: true,
                    value_type: ArgType::Instance,
                },
                CommandArg {
                    name: "key".to_string(),
                    description: "Settings key (e.g., size, show-seconds)".to_string(),
                    required: true,
                    value_type: ArgType::Key,
                },
            ],
            examples: vec![
                "analog-clock settings get desklet-0 size".to_string(),
                "analog-clock settings get desklet-0 timezone".to_string(),
            ],
        }
    }
}
