//! Execution response handling.
//!
//! Pure functions only: no I/O or async.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Output recorded when the backend answered without any usable text.
pub const NO_RESPONSE: &str = "No response received";

/// The body shapes the execute endpoint is known to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteResponse {
    /// `{"response": "..."}`
    Response(String),
    /// `{"output": "..."}`
    Output(String),
    /// Anything else, including empty strings in both fields.
    Empty,
}

impl ExecuteResponse {
    /// Classify a response body. `response` wins over `output`; empty
    /// strings count as absent.
    #[must_use]
    pub fn classify(body: &Value) -> Self {
        let text = |field: &str| {
            body.get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        if let Some(response) = text("response") {
            ExecuteResponse::Response(response)
        } else if let Some(output) = text("output") {
            ExecuteResponse::Output(output)
        } else {
            ExecuteResponse::Empty
        }
    }

    /// The text to store as the record's output.
    #[must_use]
    pub fn into_output(self) -> String {
        match self {
            ExecuteResponse::Response(text) | ExecuteResponse::Output(text) => text,
            ExecuteResponse::Empty => NO_RESPONSE.to_string(),
        }
    }
}

/// Human-readable output for a failed execution.
#[must_use]
pub fn failure_output(cause: &impl std::fmt::Display) -> String {
    format!("Execution failed: {cause}")
}

/// Timestamp-based record id. `seq` disambiguates records created within
/// the same millisecond.
#[must_use]
pub fn record_id(created_at: DateTime<Utc>, seq: u64) -> String {
    format!("exec-{}-{seq}", created_at.timestamp_millis())
}

/// Elapsed wall-clock time in whole milliseconds, saturating.
#[must_use]
pub fn elapsed_ms(elapsed: std::time::Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
