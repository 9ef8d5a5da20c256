use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicBool, Ordering},
    },
};

use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::{
    paths::{DeskletPaths, is_valid_instance_id},
    signals::{Emitter, Handler, HandlerId, SignalSource},
};

use super::{
    SettingsError,
    keys::{ClockSettings, changed_signal},
    merge::{self, UpgradeReport},
    values::{Settings, differs},
    watching::SettingsWatch,
};

/// Persisted settings of one desklet instance.
///
/// Values live in memory and are written through to a pretty-printed JSON
/// file on every change. Local writes via [`set_value`](Self::set_value) and
/// edits picked up from disk both emit `<key>-changed` with the new value, so
/// consumers handle a single notification path.
pub struct SettingsStore {
    instance_id: String,
    file: PathBuf,
    defaults_file: PathBuf,
    values: RwLock<Settings>,
    signals: Emitter<Value>,
    pub(super) watch: Mutex<Option<SettingsWatch>>,
    disposed: AtomicBool,
}

impl SettingsStore {
    /// Opens the settings of `instance_id`.
    ///
    /// Creates the config directory and seeds the instance file from the
    /// bundled template when it does not exist yet, reads it, and reconciles
    /// it against the default schema. A malformed instance file is logged and
    /// leaves the store empty until the schema pass fills in defaults.
    ///
    /// # Errors
    /// * `SettingsError::InvalidInstanceId` - If the id is empty or contains path syntax
    /// * `SettingsError::IoError` - If the instance file is missing and cannot
    ///   be created from the template
    #[instrument(skip(paths))]
    pub fn open(paths: &DeskletPaths, instance_id: &str) -> Result<Arc<Self>, SettingsError> {
        ensure_valid_instance_id(instance_id)?;

        let file = paths.instance_settings(instance_id);
        let defaults_file = paths.default_settings();

        seed_settings_file(&file, &defaults_file)?;

        let store = Arc::new(Self {
            instance_id: instance_id.to_string(),
            file,
            defaults_file,
            values: RwLock::new(Settings::new()),
            signals: Emitter::new(),
            watch: Mutex::new(None),
            disposed: AtomicBool::new(false),
        });

        store.reload();

        if let Err(e) = store.upgrade() {
            error!(error = %e, "could not reconcile settings with default schema");
        }

        info!(path = %store.file.display(), "settings loaded");
        Ok(store)
    }

    /// Instance this store belongs to.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Path of the instance settings file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Current value of `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read_values().get(key).cloned()
    }

    /// Clone of all current values.
    pub fn values(&self) -> Settings {
        self.read_values().clone()
    }

    /// Typed snapshot of the current values.
    pub fn snapshot(&self) -> ClockSettings {
        ClockSettings::from_values(&self.read_values())
    }

    /// Typed snapshot of the current values, keeping `previous` wherever the
    /// stored value is unusable.
    pub fn snapshot_over(&self, previous: &ClockSettings) -> ClockSettings {
        ClockSettings::from_values_over(&self.read_values(), previous)
    }

    /// Sets `key` to `value`, notifies subscribers and writes the file.
    ///
    /// Returns `Ok(false)` without notifying when the value is structurally
    /// equal to the current one.
    ///
    /// # Errors
    /// * `SettingsError::Disposed` - If the store was disposed
    /// * `SettingsError::SerializationError` - If the values cannot be serialized
    /// * `SettingsError::PersistenceError` - If the file cannot be written
    #[instrument(skip(self, value), fields(instance = %self.instance_id))]
    pub fn set_value(&self, key: &str, value: Value) -> Result<bool, SettingsError> {
        if self.is_disposed() {
            return Err(SettingsError::Disposed {
                instance_id: self.instance_id.clone(),
            });
        }

        {
            let mut values = self.write_values();
            if !differs(values.get(key), &value) {
                debug!("value unchanged");
                return Ok(false);
            }
            values.insert(key.to_string(), value.clone());
        }

        self.notify(key, &value);
        self.persist()?;

        Ok(true)
    }

    /// Re-reads the instance file and applies every changed key.
    ///
    /// Keys absent from the file keep their in-memory values. A file that
    /// cannot be read or parsed is logged and changes nothing. Returns the
    /// keys that changed.
    pub fn reload(&self) -> Vec<String> {
        if self.is_disposed() {
            return Vec::new();
        }

        match self.try_reload() {
            Ok(changed) => changed,
            Err(e) => {
                error!(error = %e, "could not read settings, keeping previous values");
                Vec::new()
            }
        }
    }

    fn try_reload(&self) -> Result<Vec<String>, SettingsError> {
        let incoming = read_document(&self.file)?;

        let changes = {
            let mut values = self.write_values();
            let (merged, changes) = merge::merge(&values, &incoming);
            *values = merged;
            changes
        };

        for change in &changes {
            debug!(key = %change.key, "settings value changed on disk");
            self.notify(&change.key, &change.value);
        }

        Ok(changes.into_iter().map(|change| change.key).collect())
    }

    /// Reconciles the current values with the bundled default schema.
    ///
    /// Missing keys are filled in, unknown keys are dropped and the result is
    /// written back to disk.
    ///
    /// # Errors
    /// * `SettingsError::IoError` / `SettingsError::ParseError` - If the template cannot be read
    /// * `SettingsError::PersistenceError` - If the upgraded file cannot be written
    #[instrument(skip(self), fields(instance = %self.instance_id))]
    pub fn upgrade(&self) -> Result<UpgradeReport, SettingsError> {
        let defaults = read_document(&self.defaults_file)?;

        let report = {
            let mut values = self.write_values();
            let (upgraded, report) = merge::reconcile(&values, &defaults);
            *values = upgraded;
            report
        };

        if !report.is_empty() {
            info!(added = ?report.added, removed = ?report.removed, "settings upgraded");
        }

        self.persist()?;
        Ok(report)
    }

    /// Writes all values to the instance file as pretty-printed JSON.
    ///
    /// # Errors
    /// * `SettingsError::SerializationError` - If the values cannot be serialized
    /// * `SettingsError::PersistenceError` - If the file cannot be written
    pub fn persist(&self) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(&*self.read_values()).map_err(|e| {
            SettingsError::SerializationError {
                details: e.to_string(),
            }
        })?;

        write_atomically(&self.file, &json)
    }

    /// Stops the file watch, drops every subscriber and clears the values.
    ///
    /// Calling this more than once has no further effect.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.stop_watching();
        self.signals.disconnect_all();
        self.write_values().clear();
        debug!(instance = %self.instance_id, "settings disposed");
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn notify(&self, key: &str, value: &Value) {
        self.signals.emit(&changed_signal(key), value);
    }

    fn read_values(&self) -> RwLockReadGuard<'_, Settings> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_values(&self) -> RwLockWriteGuard<'_, Settings> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SignalSource<Value> for SettingsStore {
    fn connect(&self, signal: &str, handler: Handler<Value>) -> HandlerId {
        self.signals.connect(signal, handler)
    }

    fn disconnect(&self, id: HandlerId) -> bool {
        self.signals.disconnect(id)
    }
}

fn ensure_valid_instance_id(instance_id: &str) -> Result<(), SettingsError> {
    if is_valid_instance_id(instance_id) {
        Ok(())
    } else {
        Err(SettingsError::InvalidInstanceId {
            instance_id: instance_id.to_string(),
        })
    }
}

/// Reads the settings of `instance_id` without touching the filesystem.
///
/// The instance file is reconciled against the default schema in memory; a
/// missing file yields the defaults. Nothing is seeded, upgraded or written.
///
/// # Errors
/// * `SettingsError::InvalidInstanceId` - If the id is empty or contains path syntax
/// * `SettingsError::IoError` - If a file exists but cannot be read
/// * `SettingsError::ParseError` - If a file is not a JSON object
pub fn peek_settings(paths: &DeskletPaths, instance_id: &str) -> Result<Settings, SettingsError> {
    ensure_valid_instance_id(instance_id)?;

    let defaults = read_document(&paths.default_settings())?;
    let file = paths.instance_settings(instance_id);
    if !file.exists() {
        return Ok(defaults);
    }

    let (values, report) = merge::reconcile(&read_document(&file)?, &defaults);
    if !report.is_empty() {
        debug!(path = %file.display(), "settings differ from schema; not rewritten");
    }
    Ok(values)
}

/// Reads a JSON document that must be an object at the top level.
///
/// # Errors
/// * `SettingsError::IoError` - If the file cannot be read
/// * `SettingsError::ParseError` - If it is not a JSON object
pub fn read_document(path: &Path) -> Result<Settings, SettingsError> {
    let content = fs::read_to_string(path).map_err(|e| SettingsError::IoError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let parse_error = |details: String| SettingsError::ParseError {
        path: path.to_path_buf(),
        details,
    };

    match serde_json::from_str::<Value>(&content).map_err(|e| parse_error(e.to_string()))? {
        Value::Object(map) => Ok(map),
        _ => Err(parse_error("expected a JSON object".to_string())),
    }
}

fn seed_settings_file(file: &Path, template: &Path) -> Result<(), SettingsError> {
    if file.exists() {
        return Ok(());
    }

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(|e| SettingsError::IoError {
            path: parent.to_path_buf(),
            details: e.to_string(),
        })?;
    }

    fs::copy(template, file).map_err(|e| SettingsError::IoError {
        path: template.to_path_buf(),
        details: format!("could not copy default settings: {e}"),
    })?;

    info!(path = %file.display(), "created settings file from template");
    Ok(())
}

fn write_atomically(path: &Path, contents: &str) -> Result<(), SettingsError> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, contents).map_err(|e| SettingsError::PersistenceError {
        path: temp_path.clone(),
        details: e.to_string(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| SettingsError::PersistenceError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}
