//! Commands reading and writing one desklet instance's settings.
mod edit;
mod get;
mod list;
mod schema;
mod set;

use std::sync::Arc;

pub use edit::EditCommand;
pub use get::GetCommand;
pub use list::ListCommand;
pub use schema::SchemaCommand;
pub use set::SetCommand;

use crate::{
    cli::{CliError, CommandRegistry},
    paths::DeskletPaths,
    settings::{Settings, SettingsError, SettingsStore, peek_settings, read_document},
};

const CATEGORY_NAME: &str = "settings";

/// Registers all settings commands with the command registry.
pub fn register_commands(registry: &mut CommandRegistry, paths: &DeskletPaths) {
    registry.register_command(CATEGORY_NAME, Box::new(ListCommand::new(paths.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(GetCommand::new(paths.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(SetCommand::new(paths.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(SchemaCommand::new()));
    registry.register_command(CATEGORY_NAME, Box::new(EditCommand::new(paths.clone())));
}

/// Opens the settings of `instance`, seeding its file on first use.
fn open_store(paths: &DeskletPaths, instance: &str) -> Result<Arc<SettingsStore>, CliError> {
    SettingsStore::open(paths, instance).map_err(cli_error)
}

/// Reads the settings of `instance` without creating or rewriting its file.
fn peek_store(paths: &DeskletPaths, instance: &str) -> Result<Settings, CliError> {
    peek_settings(paths, instance).map_err(cli_error)
}

fn cli_error(error: SettingsError) -> CliError {
    match error {
        SettingsError::InvalidInstanceId { .. } => CliError::InvalidArguments(error.to_string()),
        other => CliError::SettingsError(other.to_string()),
    }
}

/// Fails unless `key` is part of the default schema.
fn ensure_known_key(paths: &DeskletPaths, key: &str) -> Result<(), CliError> {
    let defaults = read_document(&paths.default_settings())
        .map_err(|e| CliError::SettingsError(e.to_string()))?;

    if defaults.contains_key(key) {
        Ok(())
    } else {
        let keys: Vec<&str> = defaults.keys().map(String::as_str).collect();
        Err(CliError::InvalidArguments(format!(
            "unknown key '{key}', expected one of: {}",
            keys.join(", ")
        )))
    }
}
