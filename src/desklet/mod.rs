//! The clock widget and everything it needs from its surroundings.
//!
//! The host shell is reached only through [`DeskletHost`] and
//! [`DrawingSurface`]. [`AnalogClock`] wires the settings store, theme,
//! scheduler and compositor together and is driven by [`run`].

mod clock;
mod editor;
mod event;
mod headless;
mod host;
mod resume;
mod runtime;

pub use clock::{AnalogClock, HEADER, SETTINGS_ACTION};
pub use editor::SettingsEditor;
pub use event::DeskletEvent;
pub use headless::{HeadlessHost, HeadlessSurface};
pub use host::{DeskletHost, DrawingSurface, REPAINT_SIGNAL};
pub use resume::{LoginManagerProxy, ResumeMonitor};
pub use runtime::{event_channel, run};
