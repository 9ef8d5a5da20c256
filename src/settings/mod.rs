//! Per-instance persisted settings with live file synchronization.
//!
//! Each desklet instance owns one JSON document under the config directory.
//! The [`SettingsStore`] keeps it in memory, writes local changes through to
//! disk, picks up edits made by the external settings editor via a file
//! watch, and reconciles old documents against the bundled default schema.

mod error;
mod file_watcher;
pub mod keys;
mod merge;
mod store;
mod values;
mod watching;

#[cfg(test)]
mod tests;

pub use error::SettingsError;
pub use file_watcher::{FileEvent, FileEventKind, FileWatcher};
pub use keys::{ClockSettings, TimezoneSetting, changed_signal};
pub use merge::{ChangedValue, UpgradeReport, merge, reconcile};
pub use store::{SettingsStore, peek_settings, read_document};
pub use values::{Settings, differs, values_equal};
