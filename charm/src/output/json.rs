//! JSON output helpers for `--json` code paths.

use anyhow::{Context, Result};
use flannel_common::{Flag, FlagSet};
use serde::Serialize;

/// Format a JSON error object.
///
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

#[derive(Serialize)]
struct FlagsDoc<'a> {
    path: &'a str,
    flags: Vec<Flag>,
}

/// Format the persisted flag listing.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_flags(path: &str, flags: &FlagSet) -> Result<String> {
    let doc = FlagsDoc {
        path,
        flags: flags.iter().collect(),
    };
    serde_json::to_string_pretty(&doc).context("JSON serialization failed")
}
