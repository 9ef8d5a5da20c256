//! Unit tests for CLI module
//!
//! Tests command registry dispatch, argument validation and value formatting
//! against temporary config directories.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use crate::{
    cli::{
        CliError, CliService, CommandRegistry,
        formatting::{format_json_value, parse_json_value},
    },
    paths::DeskletPaths,
};

fn service() -> (TempDir, CliService) {
    let config = TempDir::new().unwrap();
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let service = CliService::new(DeskletPaths::new(config.path(), data));
    (config, service)
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn format_json_value_scalars() {
    assert_eq!(format_json_value(&json!("station")), "\"station\"");
    assert_eq!(format_json_value(&json!(150)), "150");
    assert_eq!(format_json_value(&json!(-2.5)), "-2.5");
    assert_eq!(format_json_value(&json!(false)), "false");
    assert_eq!(format_json_value(&json!(null)), "null");
}

#[test]
fn format_json_value_object_is_inline_json() {
    let value = json!({"region": "Europe", "city": "Berlin"});

    assert_eq!(
        format_json_value(&value),
        r#"{"city":"Berlin","region":"Europe"}"#
    );
}

#[test]
fn parse_json_value_falls_back_to_string() {
    assert_eq!(parse_json_value("200"), json!(200));
    assert_eq!(parse_json_value("false"), json!(false));
    assert_eq!(parse_json_value(r#"{"region":"UTC"}"#), json!({"region": "UTC"}));
    assert_eq!(parse_json_value("station"), json!("station"));
}

#[test]
fn command_registry_starts_empty() {
    let registry = CommandRegistry::new(DeskletPaths::new("/tmp/cfg", "/tmp/data"));

    assert!(registry.list_commands().is_empty());
}

#[test]
fn all_commands_are_registered() {
    let (_config, service) = service();

    assert_eq!(
        service.list_all(),
        vec![
            (
                "settings".to_string(),
                args(&["edit", "get", "list", "schema", "set"])
            ),
            ("themes".to_string(), args(&["list"])),
        ]
    );
}

#[test]
fn unknown_command_is_reported() {
    let (_config, service) = service();

    assert!(matches!(
        service.execute_command("panel", "list", &[]),
        Err(CliError::CommandNotFound(_))
    ));
    assert!(matches!(
        service.execute_command("settings", "delete", &[]),
        Err(CliError::CommandNotFound(_))
    ));
}

#[test]
fn argument_count_is_validated() {
    let (_config, service) = service();

    assert!(matches!(
        service.execute_command("settings", "get", &args(&["desklet-0"])),
        Err(CliError::InvalidArguments(_))
    ));
    assert!(matches!(
        service.execute_command("settings", "list", &args(&["a", "b"])),
        Err(CliError::InvalidArguments(_))
    ));
}

#[test]
fn set_then_get_round_trips_through_the_file() {
    let (config, service) = service();

    let output = service
        .execute_command("settings", "set", &args(&["desklet-0", "size", "200"]))
        .unwrap();
    assert_eq!(output, "Set 'size' to 200");

    let output = service
        .execute_command("settings", "get", &args(&["desklet-0", "size"]))
        .unwrap();
    assert_eq!(output, "size: 200");

    let written = std::fs::read_to_string(config.path().join("desklet-0.json")).unwrap();
    assert!(written.contains("\"size\": 200"));
}

#[test]
fn setting_the_same_value_reports_no_change() {
    let (_config, service) = service();

    let output = service
        .execute_command("settings", "set", &args(&["desklet-0", "theme", "default"]))
        .unwrap();

    assert_eq!(output, "'theme' is already \"default\"");
}

#[test]
fn keys_outside_the_schema_are_refused() {
    let (_config, service) = service();

    let result = service.execute_command("settings", "set", &args(&["desklet-0", "colour", "red"]));

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[test]
fn instance_ids_cannot_name_other_paths() {
    let (_config, service) = service();

    for instance in ["..", "../escape", ""] {
        assert!(matches!(
            service.execute_command("settings", "list", &args(&[instance])),
            Err(CliError::InvalidArguments(_))
        ));
    }
}

#[test]
fn reading_commands_leave_the_file_alone() {
    let (config, service) = service();
    let file = config.path().join("desklet-2.json");

    service
        .execute_command("settings", "get", &args(&["desklet-2", "size"]))
        .unwrap();
    service
        .execute_command("settings", "list", &args(&["desklet-2"]))
        .unwrap();
    assert!(!file.exists());

    let original = r#"{"size": 180, "obsolete": true}"#;
    std::fs::write(&file, original).unwrap();

    let output = service
        .execute_command("settings", "get", &args(&["desklet-2", "size"]))
        .unwrap();

    assert_eq!(output, "size: 180");
    assert_eq!(std::fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn reading_a_malformed_file_is_an_error() {
    let (config, service) = service();
    let file = config.path().join("desklet-3.json");
    std::fs::write(&file, "{ not json").unwrap();

    let result = service.execute_command("settings", "get", &args(&["desklet-3", "size"]));

    assert!(matches!(result, Err(CliError::SettingsError(_))));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "{ not json");
}

#[test]
fn list_shows_every_schema_key() {
    let (_config, service) = service();

    let output = service
        .execute_command("settings", "list", &args(&["desklet-1"]))
        .unwrap();

    for key in [
        "size",
        "theme",
        "show-seconds",
        "hide-decorations",
        "timezone-use",
        "timezone",
        "timezone-display",
    ] {
        assert!(output.contains(&format!("{key}: ")), "{key} missing");
    }
}

#[test]
fn schema_describes_settings_file() {
    let (_config, service) = service();

    let output = service.execute_command("settings", "schema", &[]).unwrap();
    let schema: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert!(schema["properties"]["show-seconds"].is_object());
}

#[test]
fn themes_list_names_bundled_themes() {
    let (_config, service) = service();

    let output = service.execute_command("themes", "list", &[]).unwrap();

    assert_eq!(output, "default\nstation");
}
