use crate::{
    cli::{
        Command, CommandResult,
        formatting::format_json_value,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    paths::DeskletPaths,
};

use super::peek_store;

/// Prints every setting of an instance, one `key: value` per line.
///
/// Read-only: an instance without a settings file lists the defaults.
pub struct ListCommand {
    paths: DeskletPaths,
}

impl ListCommand {
    /// Creates a new ListCommand resolving files below `paths`.
    pub fn new(paths: DeskletPaths) -> Self {
        Self { paths }
    }
}

impl Command for ListCommand {
    fn execute(&self, args: &[String]) -> CommandResult {
        let instance = args.first().map(String::as_str).unwrap_or_default();
        let values = peek_store(&self.paths, instance)?;

        let lines: Vec<String> = values
            .iter()
            .map(|(key, value)| format!("{key}: {}", format_json_value(value)))
            .collect();

        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List all settings of a desklet instance".to_string(),
            category: "settings".to_string(),
            args: vec![CommandArg {
                name: "instance".to_string(),
                description: "Desklet instance id".to_string(),
                required: true,
                value_type: ArgType::Instance,
            }],
            examples: vec!["analog-clock settings list desklet-0".to_string()],
        }
    }
}
