use std::{
    env,
    io::{self, IsTerminal},
    process,
};

use tracing::info;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    paths::DeskletPaths,
};

use super::open_store;

const FALLBACK_EDITOR: &str = "xdg-open";

/// Opens an instance's settings file in the user's editor and waits for it.
///
/// This is what the desklet's "Settings" menu entry runs by default. Spawned
/// from the widget there is no terminal, so `$VISUAL`/`$EDITOR` are only
/// honoured when stdin is a terminal; otherwise the file goes to `xdg-open`.
pub struct EditCommand {
    paths: DeskletPaths,
}

impl EditCommand {
    /// Creates a new EditCommand resolving files below `paths`.
    pub fn new(paths: DeskletPaths) -> Self {
        Self { paths }
    }

    fn editor() -> String {
        choose_editor(
            io::stdin().is_terminal(),
            env::var("VISUAL").ok(),
            env::var("EDITOR").ok(),
        )
    }
}

fn choose_editor(interactive: bool, visual: Option<String>, editor: Option<String>) -> String {
    if !interactive {
        return FALLBACK_EDITOR.to_string();
    }

    visual
        .into_iter()
        .chain(editor)
        .find(|program| !program.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

impl Command for EditCommand {
    fn execute(&self, args: &[String]) -> CommandResult {
        let instance = args.first().map(String::as_str).unwrap_or_default();
        let store = open_store(&self.paths, instance)?;
        let file = store.file().to_path_buf();

        // The desklet owns the file watch; this process only edits.
        drop(store);

        let editor = Self::editor();
        info!(editor, path = %file.display(), "opening settings");

        let status = process::Command::new(&editor)
            .arg(&file)
            .status()
            .map_err(|e| CliError::ServiceError(format!("Failed to run '{editor}': {e}")))?;

        if status.success() {
            Ok(String::new())
        } else {
            Err(CliError::ServiceError(format!("'{editor}' exited with {status}")))
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "edit".to_string(),
            description: "Open the settings file of a desklet instance in an editor".to_string(),
            category: "settings".to_string(),
            args: vec![CommandArg {
                name: "instance".to_string(),
                description: "Desklet instance id".to_string(),
                required: true,
                value_type: ArgType::Instance,
            }],
            examples: vec!["analog-clock settings edit desklet-0".to_string()],
        }
    }
}
