use super::MARGIN;
use crate::settings::{ClockSettings, TimezoneSetting};

/// Text shown when no timezone name is available.
pub const FALLBACK_LABEL: &str = "Local";

/// How much window chrome the host draws around desklets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum DecorationLevel {
    /// No decorations at all.
    None,
    /// A border without a header.
    BorderOnly,
    /// Border and header.
    #[default]
    Full,
}

/// A label ready to be shown, in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Text to display.
    pub text: String,
    /// Theme-supplied style string, passed to the host verbatim.
    pub style: Option<String>,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
}

/// City name, else region name, else [`FALLBACK_LABEL`].
pub fn label_text(timezone: &TimezoneSetting) -> String {
    let city = timezone.city.trim();
    let region = timezone.region.trim();

    if !city.is_empty() {
        city.to_string()
    } else if !region.is_empty() {
        region.to_string()
    } else {
        FALLBACK_LABEL.to_string()
    }
}

/// Whether the timezone label should be shown.
///
/// The host header already names the clock unless decorations are hidden or
/// reduced to a bare border.
pub fn label_visible(settings: &ClockSettings, level: DecorationLevel) -> bool {
    let undecorated = settings.hide_decorations || level <= DecorationLevel::BorderOnly;
    undecorated && settings.timezone_use && settings.timezone_display
}

/// Centers a label of `width`×`height` horizontally and puts its vertical
/// center at two thirds of the clock height.
pub fn place_label(
    text: String,
    style: Option<String>,
    clock_size: f64,
    (width, height): (f64, f64),
) -> LabelPlacement {
    LabelPlacement {
        text,
        style,
        x: MARGIN + (clock_size - width) / 2.0,
        y: MARGIN + clock_size * 2.0 / 3.0 - height / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(region: &str, city: &str) -> TimezoneSetting {
        TimezoneSetting {
            region: region.to_string(),
            city: city.to_string(),
        }
    }

    fn labelled() -> ClockSettings {
        ClockSettings {
            timezone_use: true,
            ..ClockSettings::default()
        }
    }

    #[test]
    fn text_prefers_city_then_region() {
        assert_eq!(label_text(&zone("America", "New York")), "New York");
        assert_eq!(label_text(&zone("UTC", "")), "UTC");
        assert_eq!(label_text(&zone("", "")), FALLBACK_LABEL);
    }

    #[test]
    fn visible_only_when_undecorated_and_enabled() {
        let settings = labelled();
        assert!(label_visible(&settings, DecorationLevel::Full));

        let decorated = ClockSettings {
            hide_decorations: false,
            ..labelled()
        };
        assert!(!label_visible(&decorated, DecorationLevel::Full));
        assert!(label_visible(&decorated, DecorationLevel::BorderOnly));
        assert!(label_visible(&decorated, DecorationLevel::None));
    }

    #[test]
    fn hidden_without_timezone_or_display() {
        let unused = ClockSettings::default();
        let undisplayed = ClockSettings {
            timezone_display: false,
            ..labelled()
        };

        assert!(!label_visible(&unused, DecorationLevel::None));
        assert!(!label_visible(&undisplayed, DecorationLevel::None));
    }

    #[test]
    fn placed_centered_at_two_thirds() {
        let placement = place_label("Berlin".to_string(), None, 150.0, (40.0, 10.0));

        assert_eq!(placement.x, MARGIN + 55.0);
        assert_eq!(placement.y, MARGIN + 95.0);
    }
}
