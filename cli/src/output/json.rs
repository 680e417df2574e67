//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the pretty printer used by `JsonRenderer`.

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}

/// Machine-readable renderer for `--json`. Every method prints one JSON
/// document on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Serialize a record list or other plain payload.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        print(value)
    }

    /// Notices go to stderr so stdout stays one document.
    pub fn render_notice(&self, message: &str) {
        eprintln!("{message}");
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_done(&self, message: &str, details: serde_json::Value) -> Result<()> {
        let mut obj = serde_json::json!({ "ok": true, "message": message });
        if let (Some(map), serde_json::Value::Object(extra)) = (obj.as_object_mut(), details) {
            map.extend(extra);
        }
        print(&obj)
    }
}
