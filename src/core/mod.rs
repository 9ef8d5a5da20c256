use thiserror::Error;

use crate::{settings::SettingsError, signals::SignalError, theme::ThemeError};

/// Errors surfaced by the desklet and its command-line front end.
///
/// Event handlers inside a running widget log these and keep going; they
/// only propagate out of setup and one-shot commands.
#[derive(Error, Debug)]
pub enum DeskletError {
    /// Settings could not be loaded, written or watched
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A theme could not be loaded
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// A subscription was attempted after teardown
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// The settings editor process could not be started
    #[error("failed to launch settings editor '{program}': {details}")]
    EditorLaunch {
        /// Program that was spawned
        program: String,
        /// Spawn error details
        details: String,
    },

    /// The host refused an operation
    #[error("host error: {details}")]
    Host {
        /// Host error details
        details: String,
    },
}

/// A specialized `Result` type for desklet operations.
pub type Result<T> = std::result::Result<T, DeskletError>;
