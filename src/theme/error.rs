use std::path::PathBuf;

/// Errors raised while resolving or loading a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme name could escape the themes root or is empty
    #[error("invalid theme name '{0}'")]
    InvalidName(String),

    /// No directory with that name exists under the themes root
    #[error("theme '{name}' not found in '{root}'")]
    NotFound {
        /// Requested theme name
        name: String,
        /// Themes root that was searched
        root: PathBuf,
    },

    /// The metadata descriptor could not be read
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// The metadata descriptor is malformed or inconsistent
    #[error("invalid theme metadata in '{path}': {details}")]
    InvalidMetadata {
        /// Metadata file
        path: PathBuf,
        /// What is wrong with it
        details: String,
    },

    /// A referenced artwork file could not be loaded
    #[error("failed to load artwork '{path}': {details}")]
    ArtworkLoad {
        /// Artwork file
        path: PathBuf,
        /// Load error details
        details: String,
    },
}
