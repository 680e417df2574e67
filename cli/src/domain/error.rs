//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `reqwest`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use agentic_common::{AgentId, TransitionError};
use thiserror::Error;

// ── Catalog errors ────────────────────────────────────────────────────────────

/// Errors raised by the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Non-fatal: the caller shows a notice and keeps rendering.
    #[error("Could not load agents: {0}")]
    LoadFailed(String),

    #[error("Agent '{0}' not found.")]
    NotFound(AgentId),
}

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors that stop an execution before any record is created.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please enter input for the agent.")]
    EmptyInput,

    #[error("Not logged in. Run: agentic login")]
    NotAuthenticated,

    #[error("Agent '{0}' not found in the catalog.")]
    AgentNotFound(AgentId),

    #[error("Agent '{0}' is already executing. Wait for it to finish.")]
    ExecutionInFlight(AgentId),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

// ── Remote API errors ─────────────────────────────────────────────────────────

/// Failures talking to the platform backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("{}", status_message(.status, .body))]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn status_message(status: &u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed (HTTP {status})")
    } else {
        format!("{body} (HTTP {status})")
    }
}

// ── Filter errors ─────────────────────────────────────────────────────────────

/// Unknown selector values for the search filters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown category: {value}\n\nValid categories: {valid}")]
    UnknownCategory { value: String, valid: String },

    #[error("Unknown price filter: {0}\n\nValid values: All, Free, Paid")]
    UnknownPrice(String),

    #[error("Unknown status filter: {0}\n\nValid values: all, pending, success, error")]
    UnknownStatus(String),

    #[error("Unknown timeframe: {0}\n\nValid values: 7d, 30d, 90d")]
    UnknownTimeframe(String),

    #[error("Unknown export format: {0}\n\nValid values: json, csv")]
    UnknownExportFormat(String),
}

// ── Builder errors ────────────────────────────────────────────────────────────

/// Agent builder form validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Agent {0} is required.")]
    MissingField(&'static str),

    #[error("Unknown template '{name}'. Available: {available}")]
    UnknownTemplate { name: String, available: String },
}

// ── Account errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("No profile stored. Run: agentic login")]
    NoProfile,

    #[error("Stored profile has no user id; cannot tell owned teams from joined ones.")]
    MissingUserId,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
