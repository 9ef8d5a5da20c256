use std::{
    env,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

/// Directory name used below the XDG config home and for the data directory.
pub const APP_DIR_NAME: &str = "analog-clock";

/// File name of the bundled settings template inside the data directory.
pub const DEFAULT_SETTINGS_FILE: &str = "default_settings.json";

const DATA_DIR_ENV: &str = "ANALOG_CLOCK_DATA_DIR";
const SYSTEM_DATA_DIR: &str = "/usr/share/analog-clock";

/// Whether `instance_id` names a file directly inside the config directory.
///
/// Ids must be non-empty, must not be `.` or `..` and must not contain path
/// separators.
pub fn is_valid_instance_id(instance_id: &str) -> bool {
    !instance_id.is_empty()
        && instance_id != "."
        && instance_id != ".."
        && !instance_id.contains(['/', '\\'])
}

/// Locations of every file the desklet reads or writes.
///
/// Resolved once at startup and handed to each component that needs a path,
/// so tests and embedding hosts can point the widget at temporary directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskletPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl DeskletPaths {
    /// Creates paths from explicit directories.
    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Resolves paths from the environment.
    ///
    /// Follows the XDG Base Directory specification for settings:
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "analog-clock" to the base config directory
    ///
    /// The data directory comes from `ANALOG_CLOCK_DATA_DIR` and defaults to
    /// the system-wide install location.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn from_env() -> Result<Self, Error> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_CONFIG_HOME nor HOME environment variable found",
                )
            })?;

        let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| SYSTEM_DATA_DIR.to_string());

        Ok(Self::new(
            PathBuf::from(config_home).join(APP_DIR_NAME),
            data_dir,
        ))
    }

    /// Directory holding one settings file per desklet instance.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Directory holding the bundled template and themes.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Settings file for a single desklet instance.
    pub fn instance_settings(&self, instance_id: &str) -> PathBuf {
        self.config_dir.join(format!("{instance_id}.json"))
    }

    /// The bundled default-settings document.
    pub fn default_settings(&self) -> PathBuf {
        self.data_dir.join(DEFAULT_SETTINGS_FILE)
    }

    /// Root directory containing one subdirectory per theme.
    pub fn themes_dir(&self) -> PathBuf {
        self.data_dir.join("themes")
    }

    /// Get the application log directory
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if HOME is unset or the directory cannot be created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let home = env::var("HOME")
            .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not found"))?;

        let log_dir = PathBuf::from(home).join(".analog-clock").join("logs");

        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir)?;
        }

        Ok(log_dir)
    }
}
