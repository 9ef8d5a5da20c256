//! Formatting utilities for CLI output.
//!
//! Provides consistent formatting for settings values and styled help text.

use serde_json::Value;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats category names with styling
pub fn format_category(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::BLUE, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a settings value for one-line CLI output.
///
/// Scalars print as JSON literals; objects and arrays print as compact
/// JSON so a timezone shows as `{"city":"Berlin","region":"Europe"}`.
///
/// # Examples
///
/// ```
/// use analog_clock::cli::formatting::format_json_value;
/// use serde_json::json;
///
/// assert_eq!(format_json_value(&json!("default")), "\"default\"");
/// assert_eq!(format_json_value(&json!(150)), "150");
/// ```
pub fn format_json_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Parses a value typed on the command line.
///
/// Anything that is valid JSON is taken as JSON, everything else as a
/// plain string, so `set theme station` needs no quoting.
pub fn parse_json_value(input: &str) -> Value {
    serde_json::from_str(input).unwrap_or_else(|_| Value::String(input.to_string()))
}
