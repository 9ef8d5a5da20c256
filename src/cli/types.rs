use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid arguments were provided to a command.
    ///
    /// Returned for missing or surplus arguments and for keys outside the
    /// settings schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading or writing an instance's settings failed.
    #[error("Settings error: {0}")]
    SettingsError(String),

    /// Themes could not be listed or loaded.
    #[error("Theme error: {0}")]
    ThemeError(String),

    /// A general service error, such as an editor that failed to run.
    #[error("Service error: {0}")]
    ServiceError(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for command execution results.
///
/// Commands return their printable output on success.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "instance", "key", "value").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument for help display.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A desklet instance identifier.
    Instance,

    /// A settings key from the default schema.
    Key,

    /// A JSON value; bare words are taken as strings.
    Json,
}

/// Complete metadata for a CLI command.
///
/// Used for argument count validation and help output.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "get", "set", "list").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "settings", "themes").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against
    /// [`metadata`](Self::metadata).
    ///
    /// # Errors
    ///
    /// Returns `CliError` for any execution failure.
    fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
