use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::values::Settings;

/// Clock diameter in pixels.
pub const SIZE: &str = "size";
/// Name of the theme directory.
pub const THEME: &str = "theme";
/// Whether the second hand is drawn.
pub const SHOW_SECONDS: &str = "show-seconds";
/// Whether host decorations are hidden.
pub const HIDE_DECORATIONS: &str = "hide-decorations";
/// Whether the clock follows the `timezone` setting instead of local time.
pub const TIMEZONE_USE: &str = "timezone-use";
/// Selected region and city.
pub const TIMEZONE: &str = "timezone";
/// Whether the timezone label is shown.
pub const TIMEZONE_DISPLAY: &str = "timezone-display";

/// Name of the notification emitted when `key` changes.
pub fn changed_signal(key: &str) -> String {
    format!("{key}-changed")
}

/// A timezone selection as stored in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimezoneSetting {
    /// Region part of the identifier, e.g. "Europe".
    #[serde(default)]
    pub region: String,

    /// City part of the identifier, e.g. "Berlin". May be empty.
    #[serde(default)]
    pub city: String,
}

impl TimezoneSetting {
    /// IANA identifier such as `Europe/Berlin` or `America/New_York`.
    ///
    /// Returns `None` when no region is selected.
    pub fn identifier(&self) -> Option<String> {
        let region = self.region.trim();
        let city = self.city.trim();

        match (region.is_empty(), city.is_empty()) {
            (true, _) => None,
            (false, true) => Some(region.to_string()),
            (false, false) => Some(format!("{region}/{}", city.replace(' ', "_"))),
        }
    }
}

impl Default for TimezoneSetting {
    fn default() -> Self {
        Self {
            region: "Europe".to_string(),
            city: "Berlin".to_string(),
        }
    }
}

/// Typed view of one instance's settings.
///
/// Values that are missing, have the wrong type or are out of range fall
/// back individually, so one bad entry never hides the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct ClockSettings {
    /// Clock diameter in pixels.
    pub size: f64,

    /// Theme directory name under the themes root.
    pub theme: String,

    /// Draw the second hand and tick every second.
    pub show_seconds: bool,

    /// Hide the host's desklet decorations.
    pub hide_decorations: bool,

    /// Show the time of `timezone` instead of local time.
    pub timezone_use: bool,

    /// The timezone to display when `timezone-use` is on.
    pub timezone: TimezoneSetting,

    /// Show the timezone label on the clock face.
    pub timezone_display: bool,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            size: 150.0,
            theme: "default".to_string(),
            show_seconds: true,
            hide_decorations: true,
            timezone_use: false,
            timezone: TimezoneSetting::default(),
            timezone_display: true,
        }
    }
}

fn field<T: DeserializeOwned>(values: &Settings, key: &str, fallback: T) -> T {
    values
        .get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or(fallback)
}

/// Whether `size` can be drawn: finite and positive.
pub fn is_valid_size(size: f64) -> bool {
    size.is_finite() && size > 0.0
}

impl ClockSettings {
    /// Reads a typed snapshot from raw settings values, falling back to the
    /// defaults.
    pub fn from_values(values: &Settings) -> Self {
        Self::from_values_over(values, &Self::default())
    }

    /// Reads a typed snapshot from raw settings values, keeping the matching
    /// field of `previous` for every unusable value.
    pub fn from_values_over(values: &Settings, previous: &Self) -> Self {
        let size = field(values, SIZE, previous.size);

        Self {
            size: if is_valid_size(size) { size } else { previous.size },
            theme: field(values, THEME, previous.theme.clone()),
            show_seconds: field(values, SHOW_SECONDS, previous.show_seconds),
            hide_decorations: field(values, HIDE_DECORATIONS, previous.hide_decorations),
            timezone_use: field(values, TIMEZONE_USE, previous.timezone_use),
            timezone: field(values, TIMEZONE, previous.timezone.clone()),
            timezone_display: field(values, TIMEZONE_DISPLAY, previous.timezone_display),
        }
    }

    /// Timezone identifier to render in, if the timezone is enabled.
    pub fn active_timezone(&self) -> Option<String> {
        if self.timezone_use {
            self.timezone.identifier()
        } else {
            None
        }
    }
}
