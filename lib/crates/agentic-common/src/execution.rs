use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::agent::{Agent, AgentId, string_or_number};

/// Lifecycle status of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Pending,
    Success,
    Error,
}

impl ExecutionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, ExecutionStatus::Pending)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Success => "success",
            ExecutionStatus::Error => "error",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ExecutionStatus::Pending),
            "success" => Ok(ExecutionStatus::Success),
            "error" => Ok(ExecutionStatus::Error),
            other => Err(format!("unknown execution status '{other}'")),
        }
    }
}

/// A terminal record cannot change status again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("execution {id} is already {status}")]
    AlreadyTerminal { id: String, status: ExecutionStatus },
}

/// One invocation of an agent.
///
/// The agent name and icon are a snapshot taken when the record was created;
/// they may drift from the catalog afterwards. Backend rows carry neither,
/// so both are blank until filled from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRecord")]
pub struct ExecutionRecord {
    pub id: String,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub agent_icon: String,
    pub input: String,
    pub output: String,
    pub status: ExecutionStatus,
    pub execution_time_ms: u64,
    pub created_at: DateTime<Utc>,
}

/// Decoding shape shared by backend rows and records this client wrote.
///
/// The backend reports `execution_time` in (fractional) seconds and may
/// leave `input`, `output` and the duration null while pending.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    agent_id: AgentId,
    #[serde(default)]
    agent_name: Option<String>,
    #[serde(default)]
    agent_icon: Option<String>,
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    output: Option<String>,
    status: ExecutionStatus,
    #[serde(default)]
    execution_time_ms: Option<u64>,
    #[serde(default)]
    execution_time: Option<f64>,
    #[serde(deserialize_with = "lenient_timestamp")]
    created_at: DateTime<Utc>,
}

impl From<WireRecord> for ExecutionRecord {
    fn from(wire: WireRecord) -> Self {
        let execution_time_ms = wire
            .execution_time_ms
            .or_else(|| wire.execution_time.map(seconds_to_ms))
            .unwrap_or_default();
        Self {
            id: wire.id,
            agent_id: wire.agent_id,
            agent_name: wire.agent_name.unwrap_or_default(),
            agent_icon: wire.agent_icon.unwrap_or_default(),
            input: wire.input.unwrap_or_default(),
            output: wire.output.unwrap_or_default(),
            status: wire.status,
            execution_time_ms,
            created_at: wire.created_at,
        }
    }
}

/// Negative or non-finite durations count as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_to_ms(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0).round() as u64
    } else {
        0
    }
}

impl ExecutionRecord {
    /// Start a new record in `pending`.
    #[must_use]
    pub fn pending(id: String, agent: &Agent, input: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            agent_icon: agent.icon.clone(),
            input: input.to_string(),
            output: String::new(),
            status: ExecutionStatus::Pending,
            execution_time_ms: 0,
            created_at,
        }
    }

    /// `pending → success`.
    pub fn succeed(&mut self, output: String, elapsed_ms: u64) -> Result<(), TransitionError> {
        self.finish(ExecutionStatus::Success, output, elapsed_ms)
    }

    /// `pending → error`.
    pub fn fail(&mut self, message: String, elapsed_ms: u64) -> Result<(), TransitionError> {
        self.finish(ExecutionStatus::Error, message, elapsed_ms)
    }

    fn finish(
        &mut self,
        status: ExecutionStatus,
        output: String,
        elapsed_ms: u64,
    ) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            return Err(TransitionError::AlreadyTerminal {
                id: self.id.clone(),
                status: self.status,
            });
        }
        self.status = status;
        self.output = output;
        self.execution_time_ms = elapsed_ms;
        Ok(())
    }
}

/// RFC 3339, or a naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` taken as UTC.
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// Parse the timestamp formats the backend has been seen to emit.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
