use std::{fs, path::Path};

use serde::Deserialize;

use super::ThemeError;

/// File name of the descriptor inside every theme directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Per-hand entry of the descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HandMetadata {
    /// Artwork file relative to the theme directory.
    #[serde(rename = "fileName")]
    pub file_name: String,

    /// Pivot x in the theme's native coordinates.
    #[serde(rename = "pivot-x")]
    pub pivot_x: f64,

    /// Pivot y in the theme's native coordinates.
    #[serde(rename = "pivot-y")]
    pub pivot_y: f64,
}

/// Contents of a theme's `metadata.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeMetadata {
    /// Native pixel size the artwork was drawn for.
    pub size: f64,
    /// Body artwork file.
    pub body: String,
    /// Clock face artwork file.
    pub clockface: String,
    /// Frame artwork file, drawn above the hands.
    pub frame: String,
    /// Optional style for the timezone label.
    #[serde(rename = "tz-label", default)]
    pub tz_label: Option<String>,
    /// Hour hand.
    pub hour: HandMetadata,
    /// Minute hand.
    pub minute: HandMetadata,
    /// Second hand.
    pub second: HandMetadata,
}

impl ThemeMetadata {
    /// Reads and validates a descriptor.
    ///
    /// # Errors
    /// * `ThemeError::IoError` - If the file cannot be read
    /// * `ThemeError::InvalidMetadata` - If it does not parse or the size is not positive
    pub fn read(path: &Path) -> Result<Self, ThemeError> {
        let content = fs::read_to_string(path).map_err(|e| ThemeError::IoError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let metadata: Self =
            serde_json::from_str(&content).map_err(|e| ThemeError::InvalidMetadata {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        if !(metadata.size.is_finite() && metadata.size > 0.0) {
            return Err(ThemeError::InvalidMetadata {
                path: path.to_path_buf(),
                details: format!("size must be a positive number, got {}", metadata.size),
            });
        }

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tempfile::TempDir;

    use super::*;

    const METADATA: &str = r#"{
      "size": 300,
      "body": "body.svg",
      "clockface": "face.svg",
      "frame": "frame.svg",
      "tz-label": "font-size: 9pt;",
      "hour": {"fileName": "hour.svg", "pivot-x": 6, "pivot-y": 80},
      "minute": {"fileName": "minute.svg", "pivot-x": 4, "pivot-y": 120},
      "second": {"fileName": "second.svg", "pivot-x": 2.5, "pivot-y": 130}
    }"#;

    #[test]
    fn parses_hand_pivots_and_label_style() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(METADATA_FILE);
        fs::write(&path, METADATA).unwrap();

        let metadata = ThemeMetadata::read(&path).unwrap();

        assert_eq!(metadata.size, 300.0);
        assert_eq!(metadata.second.pivot_x, 2.5);
        assert_eq!(metadata.minute.file_name, "minute.svg");
        assert_eq!(metadata.tz_label.as_deref(), Some("font-size: 9pt;"));
    }

    #[test]
    fn rejects_non_positive_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(METADATA_FILE);
        fs::write(&path, METADATA.replace("\"size\": 300", "\"size\": 0")).unwrap();

        assert!(matches!(
            ThemeMetadata::read(&path),
            Err(ThemeError::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn rejects_missing_hand() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(METADATA_FILE);
        fs::write(&path, r#"{"size": 100, "body": "b.svg", "clockface": "c.svg", "frame": "f.svg"}"#)
            .unwrap();

        assert!(matches!(
            ThemeMetadata::read(&path),
            Err(ThemeError::InvalidMetadata { .. })
        ));
    }
}
