use serde_json::Value;

use crate::render::Layer;

/// Everything that can wake the desklet's event loop besides a clock tick.
///
/// Signal handlers never act on the widget directly; they forward one of
/// these into the loop so all state changes happen in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum DeskletEvent {
    /// A settings key changed, locally or through an external edit.
    SettingChanged {
        /// The key that changed
        key: String,
        /// Its new value
        value: Value,
    },
    /// The host wants a layer painted.
    Repaint(Layer),
    /// The system woke up from suspend.
    Resumed,
    /// The "Settings" menu entry was activated.
    OpenSettings,
    /// The desklet is being removed from the desktop.
    Remove,
}
