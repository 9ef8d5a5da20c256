//! Unit tests for the settings store.
//! Filesystem access is confined to temporary directories; no file watching.

#![allow(clippy::unwrap_used)]

use std::{
    fs,
    sync::{Arc, Mutex},
};

use serde_json::{Value, json};
use tempfile::TempDir;

use crate::{
    paths::DeskletPaths,
    settings::{SettingsError, SettingsStore, keys, peek_settings},
    signals::{Handler, SignalSource},
};

const DEFAULTS: &str = r#"{
  "size": 150,
  "theme": "default",
  "show-seconds": true,
  "hide-decorations": true,
  "timezone-use": false,
  "timezone": {"region": "Europe", "city": "Berlin"},
  "timezone-display": true
}"#;

struct Fixture {
    _dir: TempDir,
    paths: DeskletPaths,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();
        fs::write(data_dir.join("default_settings.json"), DEFAULTS).unwrap();

        let paths = DeskletPaths::new(dir.path().join("config"), data_dir);
        Self { _dir: dir, paths }
    }

    fn write_instance(&self, id: &str, content: &str) {
        fs::create_dir_all(self.paths.config_dir()).unwrap();
        fs::write(self.paths.instance_settings(id), content).unwrap();
    }

    fn read_instance(&self, id: &str) -> String {
        fs::read_to_string(self.paths.instance_settings(id)).unwrap()
    }
}

fn record(store: &Arc<SettingsStore>, key: &str) -> Arc<Mutex<Vec<Value>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.connect(
        &keys::changed_signal(key),
        Handler::new(move |value: &Value| sink.lock().unwrap().push(value.clone())),
    );
    seen
}

fn sorted_keys(values: &crate::settings::Settings) -> Vec<String> {
    let mut keys: Vec<String> = values.keys().cloned().collect();
    keys.sort();
    keys
}

#[test]
fn open_seeds_missing_file_from_template() {
    let fixture = Fixture::new();

    let store = SettingsStore::open(&fixture.paths, "7").unwrap();

    assert!(fixture.paths.instance_settings("7").exists());
    assert_eq!(store.get(keys::SIZE), Some(json!(150)));
    assert_eq!(store.snapshot().theme, "default");
}

#[test]
fn upgrade_makes_key_set_equal_to_schema() {
    let fixture = Fixture::new();
    fixture.write_instance("3", r#"{"size": 220, "obsolete": "yes"}"#);

    let store = SettingsStore::open(&fixture.paths, "3").unwrap();
    let defaults = crate::settings::read_document(&fixture.paths.default_settings()).unwrap();

    assert_eq!(sorted_keys(&store.values()), sorted_keys(&defaults));
    assert_eq!(store.get(keys::SIZE), Some(json!(220)));
    assert_eq!(store.get("obsolete"), None);

    let on_disk: Value = serde_json::from_str(&fixture.read_instance("3")).unwrap();
    assert!(on_disk.get("obsolete").is_none());
    assert_eq!(on_disk.get(keys::SHOW_SECONDS), Some(&json!(true)));
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let fixture = Fixture::new();
    fixture.write_instance("9", "{ not json");

    let store = SettingsStore::open(&fixture.paths, "9").unwrap();

    assert_eq!(store.get(keys::THEME), Some(json!("default")));
}

#[test]
fn set_value_notifies_once_and_persists() {
    let fixture = Fixture::new();
    let store = SettingsStore::open(&fixture.paths, "1").unwrap();
    let seen = record(&store, keys::SIZE);

    assert!(store.set_value(keys::SIZE, json!(300)).unwrap());
    assert!(!store.set_value(keys::SIZE, json!(300)).unwrap());

    assert_eq!(store.get(keys::SIZE), Some(json!(300)));
    assert_eq!(*seen.lock().unwrap(), vec![json!(300)]);

    let written = fixture.read_instance("1");
    assert!(written.contains("\n  \"size\": 300"));
}

#[test]
fn structurally_equal_object_does_not_renotify() {
    let fixture = Fixture::new();
    let store = SettingsStore::open(&fixture.paths, "1").unwrap();
    let seen = record(&store, keys::TIMEZONE);

    let paris = json!({"region": "Europe", "city": "Paris"});
    store.set_value(keys::TIMEZONE, paris.clone()).unwrap();
    store
        .set_value(keys::TIMEZONE, json!({"city": "Paris", "region": "Europe"}))
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![paris]);
}

#[test]
fn reload_uses_same_notification_channel() {
    let fixture = Fixture::new();
    let store = SettingsStore::open(&fixture.paths, "2").unwrap();
    let seen = record(&store, keys::THEME);

    fixture.write_instance("2", r#"{"theme": "station", "size": 150}"#);
    let changed = store.reload();

    assert_eq!(changed, vec![keys::THEME.to_string()]);
    assert_eq!(*seen.lock().unwrap(), vec![json!("station")]);
}

#[test]
fn reload_keeps_keys_missing_from_file() {
    let fixture = Fixture::new();
    let store = SettingsStore::open(&fixture.paths, "2").unwrap();

    fixture.write_instance("2", r#"{"size": 180}"#);
    store.reload();

    assert_eq!(store.get(keys::SIZE), Some(json!(180)));
    assert_eq!(store.get(keys::SHOW_SECONDS), Some(json!(true)));
}

#[test]
fn reload_of_malformed_file_keeps_previous_values() {
    let fixture = Fixture::new();
    let store = SettingsStore::open(&fixture.paths, "4").unwrap();
    let before = store.values();

    fixture.write_instance("4", "[1, 2, 3]");
    assert!(store.reload().is_empty());

    fixture.write_instance("4", "{\"size\":");
    assert!(store.reload().is_empty());

    assert_eq!(store.values(), before);
}

#[test]
fn dispose_is_idempotent_and_blocks_writes() {
    let fixture = Fixture::new();
    let store = SettingsStore::open(&fixture.paths, "5").unwrap();
    let seen = record(&store, keys::SIZE);

    store.dispose();
    store.dispose();

    assert!(store.is_disposed());
    assert!(store.values().is_empty());
    assert!(matches!(
        store.set_value(keys::SIZE, json!(10)),
        Err(SettingsError::Disposed { .. })
    ));

    fixture.write_instance("5", r#"{"size": 99}"#);
    assert!(store.reload().is_empty());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn missing_template_is_an_error() {
    let dir = TempDir::new().unwrap();
    let paths = DeskletPaths::new(dir.path().join("config"), dir.path().join("nowhere"));

    assert!(matches!(
        SettingsStore::open(&paths, "1"),
        Err(SettingsError::IoError { .. })
    ));
}

#[test]
fn open_refuses_ids_outside_config_dir() {
    let fixture = Fixture::new();

    for id in ["../escape", "..", "", "nested/id"] {
        assert!(matches!(
            SettingsStore::open(&fixture.paths, id),
            Err(SettingsError::InvalidInstanceId { .. })
        ));
    }

    assert!(!fixture._dir.path().join("escape.json").exists());
    assert!(!fixture.paths.config_dir().exists());
}

#[test]
fn peek_reads_without_writing() {
    let fixture = Fixture::new();
    let original = r#"{"size": 220, "obsolete": "yes"}"#;
    fixture.write_instance("4", original);

    let values = peek_settings(&fixture.paths, "4").unwrap();

    assert_eq!(values.get(keys::SIZE), Some(&json!(220)));
    assert_eq!(values.get(keys::THEME), Some(&json!("default")));
    assert!(values.get("obsolete").is_none());
    assert_eq!(fixture.read_instance("4"), original);
}

#[test]
fn peek_of_unknown_instance_yields_defaults_and_creates_nothing() {
    let fixture = Fixture::new();

    let values = peek_settings(&fixture.paths, "8").unwrap();

    assert_eq!(values.get(keys::SIZE), Some(&json!(150)));
    assert!(!fixture.paths.instance_settings("8").exists());
}

#[test]
fn peek_reports_malformed_file() {
    let fixture = Fixture::new();
    fixture.write_instance("6", "{ not json");

    assert!(matches!(
        peek_settings(&fixture.paths, "6"),
        Err(SettingsError::ParseError { .. })
    ));
    assert_eq!(fixture.read_instance("6"), "{ not json");
}
