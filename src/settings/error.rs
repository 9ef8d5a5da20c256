use std::path::PathBuf;

/// Errors that can occur while loading, persisting or watching settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Error occurred during file I/O operations
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// A settings document was not valid JSON or not a JSON object
    #[error("failed to parse settings from '{path}': {details}")]
    ParseError {
        /// File that failed to parse
        path: PathBuf,
        /// Parse error details
        details: String,
    },

    /// Error occurred while persisting settings to disk
    #[error("failed to persist settings to '{path}': {details}")]
    PersistenceError {
        /// Path where persistence failed
        path: PathBuf,
        /// Error details from the persistence operation
        details: String,
    },

    /// Error occurred while serializing settings
    #[error("failed to serialize settings: {details}")]
    SerializationError {
        /// Serialization error details
        details: String,
    },

    /// Failed to initialize file watcher
    #[error("failed to initialize file watcher: {details}")]
    FileWatcherInitError {
        /// File watcher initialization error details
        details: String,
    },

    /// Error occurred while watching a specific file
    #[error("file watcher error for '{path}': {details}")]
    FileWatchError {
        /// Path being watched when error occurred
        path: PathBuf,
        /// File watcher error details
        details: String,
    },

    /// The key is not part of the default schema
    #[error("unknown settings key '{0}'")]
    UnknownKey(String),

    /// The instance id would place the settings file outside the config directory
    #[error("invalid instance id '{instance_id}'")]
    InvalidInstanceId {
        /// Rejected instance id
        instance_id: String,
    },

    /// The store was disposed and no longer accepts writes
    #[error("settings for instance '{instance_id}' are disposed")]
    Disposed {
        /// Instance whose store was disposed
        instance_id: String,
    },
}
