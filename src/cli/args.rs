use clap::{Parser, Subcommand};

/// Top-level command line of the `analog-clock` binary.
#[derive(Debug, Parser)]
#[command(name = "analog-clock", version)]
#[command(about = "Themeable analog clock desklet")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands of `analog-clock`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one desklet instance against the headless host
    Run {
        /// Desklet instance id
        #[arg(short, long, default_value = "desklet-0")]
        instance: String,

        /// Also log to a daily rotated file
        #[arg(long)]
        log_file: bool,
    },

    /// Read and write per-instance settings
    Settings {
        /// list, get, set, schema or edit
        command: Option<String>,

        /// Arguments of the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Inspect installed themes
    Themes {
        /// list
        command: Option<String>,

        /// Arguments of the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Commands {
    /// Registry category, command name and arguments for commands that go
    /// through the command registry.
    pub fn registry_call(&self) -> Option<(&'static str, Option<&str>, &[String])> {
        match self {
            Self::Run { .. } => None,
            Self::Settings { command, args } => Some(("settings", command.as_deref(), args)),
            Self::Themes { command, args } => Some(("themes", command.as_deref(), args)),
        }
    }
}
