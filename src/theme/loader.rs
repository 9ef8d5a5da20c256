use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::render::Point;

use super::{
    Artwork, ThemeError,
    metadata::{HandMetadata, METADATA_FILE, ThemeMetadata},
};

static THEME_NAME: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn theme_name_pattern() -> &'static Regex {
    THEME_NAME
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("theme name pattern must compile"))
}

/// A single path component without separators, `.` or `..`.
fn is_plain_name(name: &str) -> bool {
    name != "." && name != ".." && theme_name_pattern().is_match(name)
}

/// A clock hand: its artwork and the point it rotates about.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    /// Hand artwork.
    pub artwork: Artwork,
    /// Rotation pivot in the theme's native coordinates.
    pub pivot: Point,
}

/// A fully loaded theme. Never modified after loading; a theme change
/// replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    size: f64,
    body: Artwork,
    clockface: Artwork,
    frame: Artwork,
    hour: Hand,
    minute: Hand,
    second: Hand,
    label_style: Option<String>,
}

impl Theme {
    /// Theme directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native pixel size of the artwork.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Body artwork.
    pub fn body(&self) -> &Artwork {
        &self.body
    }

    /// Clock face artwork.
    pub fn clockface(&self) -> &Artwork {
        &self.clockface
    }

    /// Frame artwork.
    pub fn frame(&self) -> &Artwork {
        &self.frame
    }

    /// Hour hand.
    pub fn hour(&self) -> &Hand {
        &self.hour
    }

    /// Minute hand.
    pub fn minute(&self) -> &Hand {
        &self.minute
    }

    /// Second hand.
    pub fn second(&self) -> &Hand {
        &self.second
    }

    /// Style string for the timezone label, if the theme sets one.
    pub fn label_style(&self) -> Option<&str> {
        self.label_style.as_deref()
    }
}

/// Resolves theme names to directories under a themes root and loads them.
#[derive(Debug, Clone)]
pub struct ThemeLoader {
    root: PathBuf,
}

impl ThemeLoader {
    /// Creates a loader for themes below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory containing one subdirectory per theme.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the descriptor and all six pieces of artwork of `name`.
    ///
    /// Either the whole theme loads or an error is returned; there is no
    /// partially loaded result.
    ///
    /// # Errors
    /// * `ThemeError::InvalidName` - If the name is empty or contains path syntax
    /// * `ThemeError::NotFound` - If no such theme directory exists
    /// * `ThemeError::IoError` / `ThemeError::InvalidMetadata` - If `metadata.json` is missing,
    ///   malformed or names artwork outside the theme directory
    /// * `ThemeError::ArtworkLoad` - If a referenced artwork file cannot be loaded
    #[instrument(skip(self))]
    pub fn load_theme(&self, name: &str) -> Result<Theme, ThemeError> {
        let dir = self.theme_dir(name)?;
        let metadata_file = dir.join(METADATA_FILE);
        let metadata = ThemeMetadata::read(&metadata_file)?;

        let load = |file: &str| {
            if !is_plain_name(file) {
                return Err(ThemeError::InvalidMetadata {
                    path: metadata_file.clone(),
                    details: format!("artwork '{file}' is not a file name in the theme directory"),
                });
            }
            Artwork::load(&dir.join(file))
        };
        let load_hand = |hand: &HandMetadata| -> Result<Hand, ThemeError> {
            Ok(Hand {
                artwork: load(&hand.file_name)?,
                pivot: Point::new(hand.pivot_x, hand.pivot_y),
            })
        };

        let theme = Theme {
            name: name.to_string(),
            size: metadata.size,
            body: load(&metadata.body)?,
            clockface: load(&metadata.clockface)?,
            frame: load(&metadata.frame)?,
            hour: load_hand(&metadata.hour)?,
            minute: load_hand(&metadata.minute)?,
            second: load_hand(&metadata.second)?,
            label_style: metadata.tz_label,
        };

        info!(theme = name, size = theme.size, "theme loaded");
        Ok(theme)
    }

    /// Names of all themes under the root, sorted.
    ///
    /// A directory counts as a theme when it contains `metadata.json`.
    ///
    /// # Errors
    /// Returns `ThemeError::IoError` if the themes root cannot be listed.
    pub fn available_themes(&self) -> Result<Vec<String>, ThemeError> {
        let entries = fs::read_dir(&self.root).map_err(|e| ThemeError::IoError {
            path: self.root.clone(),
            details: e.to_string(),
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable themes entry");
                    None
                }
            })
            .filter(|path| path.join(METADATA_FILE).is_file())
            .filter_map(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
            })
            .collect();

        names.sort();
        debug!(count = names.len(), "discovered themes");
        Ok(names)
    }

    fn theme_dir(&self, name: &str) -> Result<PathBuf, ThemeError> {
        if !is_plain_name(name) {
            return Err(ThemeError::InvalidName(name.to_string()));
        }

        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Err(ThemeError::NotFound {
                name: name.to_string(),
                root: self.root.clone(),
            });
        }

        Ok(dir)
    }
}
