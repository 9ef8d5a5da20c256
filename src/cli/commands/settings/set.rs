use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::{format_json_value, parse_json_value},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    paths::DeskletPaths,
};

use super::{ensure_known_key, open_store};

/// Writes one setting straight into the instance file.
///
/// A running desklet picks the change up through its file watch.
pub struct SetCommand {
    paths: DeskletPaths,
}

impl SetCommand {
    /// Creates a new SetCommand resolving files below `paths`.
    pub fn new(paths: DeskletPaths) -> Self {
        Self { paths }
    }
}

impl Command for SetCommand {
    fn execute(&self, args: &[String]) -> CommandResult {
        let (Some(instance), Some(key), Some(raw)) = (args.first(), args.get(1), args.get(2))
        else {
            return Err(CliError::InvalidArguments(
                "Expected <instance> <key> <value> arguments for 'set' command".to_string(),
            ));
        };

        ensure_known_key(&self.paths, key)?;
        let store = open_store(&self.paths, instance)?;

        let value = parse_json_value(raw);
        let formatted = format_json_value(&value);
        let changed = store
            .set_value(key, value)
            .map_err(|e| CliError::SettingsError(e.to_string()))?;

        if changed {
            Ok(format!("Set '{key}' to {formatted}"))
        } else {
            Ok(format!("'{key}' is already {formatted}"))
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "set".to_string(),
            description: "Set a setting of a desklet instance".to_string(),
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
                    description: "Settings key".to_string(),
                    required: true,
                    value_type: ArgType::Key,
                },
                CommandArg {
                    name: "value".to_string(),
                    description: "New value as JSON; bare words are strings".to_string(),
                    required: true,
                    value_type: ArgType::Json,
                },
            ],
            examples: vec![
                "analog-clock settings set desklet-0 size 200".to_string(),
                "analog-clock settings set desklet-0 theme station".to_string(),
                r#"analog-clock settings set desklet-0 timezone '{"region":"Asia","city":"Tokyo"}'"#
                    .to_string(),
            ],
        }
    }
}
