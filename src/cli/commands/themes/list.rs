use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    paths::DeskletPaths,
    theme::ThemeLoader,
};

/// Lists the installed themes by name.
pub struct ListCommand {
    loader: ThemeLoader,
}

impl ListCommand {
    /// Creates a new ListCommand for the themes below `paths`.
    pub fn new(paths: DeskletPaths) -> Self {
        Self {
            loader: ThemeLoader::new(paths.themes_dir()),
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, _args: &[String]) -> CommandResult {
        let names = self
            .loader
            .available_themes()
            .map_err(|e| CliError::ThemeError(e.to_string()))?;

        Ok(names.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List installed themes".to_string(),
            category: "themes".to_string(),
            args: Vec::new(),
            examples: vec!["analog-clock themes list".to_string()],
        }
    }
}
