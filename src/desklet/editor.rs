use std::{env, process::Stdio};

use tokio::process::Command;
use tracing::{info, instrument};

use crate::core::{DeskletError, Result};

const EDITOR_ENV: &str = "ANALOG_CLOCK_EDITOR";

/// Launches the external settings editor for an instance.
///
/// The editor runs detached; it talks back only by rewriting the instance's
/// settings file, which the store's file watch picks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEditor {
    program: String,
    args: Vec<String>,
}

impl SettingsEditor {
    /// An editor command; the instance id is appended after `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Reads the editor command line from `ANALOG_CLOCK_EDITOR`.
    ///
    /// Defaults to this executable's own `settings edit` command, which opens
    /// the file with `xdg-open` since the spawned editor has no terminal.
    pub fn from_env() -> Self {
        if let Ok(command) = env::var(EDITOR_ENV) {
            let mut words = command.split_whitespace().map(str::to_string);
            if let Some(program) = words.next() {
                return Self::new(program, words.collect());
            }
        }

        let program = env::current_exe()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "analog-clock".to_string());

        Self::new(program, vec!["settings".to_string(), "edit".to_string()])
    }

    /// Program that is spawned.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for `instance_id`.
    pub fn args_for(&self, instance_id: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(instance_id.to_string());
        args
    }

    /// Spawns the editor without waiting for it.
    ///
    /// # Errors
    /// Returns `DeskletError::EditorLaunch` if the process cannot be started.
    #[instrument(skip(self), fields(program = %self.program))]
    pub fn launch(&self, instance_id: &str) -> Result<()> {
        let child = Command::new(&self.program)
            .args(self.args_for(instance_id))
            .stdin(Stdio::null())
            .kill_on_drop(false)
            .spawn()
            .map_err(|e| DeskletError::EditorLaunch {
                program: self.program.clone(),
                details: e.to_string(),
            })?;

        info!(pid = ?child.id(), "settings editor started");
        Ok(())
    }
}
