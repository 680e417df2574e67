//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `agentic_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use agentic_common::{
    Agent, AgentDraft, AgentId, DashboardAnalytics, ExecutionRecord, LoginResponse, Team,
    UsageAnalytics,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::analytics::{ExportFormat, Timeframe};
use crate::domain::config::AgenticConfig;
use crate::domain::error::ApiError;

// ── Platform API Port Traits ──────────────────────────────────────────────────

/// Agent catalog endpoints.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// `GET /api/v1/agents`
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError>;
    /// `GET /api/v1/agents/{id}`; a missing agent is a 404 status error.
    async fn get_agent(&self, id: &AgentId) -> Result<Agent, ApiError>;
    /// `POST /api/v1/agents`
    async fn create_agent(&self, draft: &AgentDraft, token: &str) -> Result<Agent, ApiError>;
}

/// Agent execution and history endpoints.
#[allow(async_fn_in_trait)]
pub trait ExecutionApi {
    /// `POST /api/v1/agents/{id}/execute`. The body is returned undecoded so
    /// the caller can classify its shape.
    async fn execute_agent(&self, id: &AgentId, input: &str, token: &str)
    -> Result<Value, ApiError>;
    /// `GET /api/v1/history`, optionally narrowed to one agent.
    async fn list_history(
        &self,
        token: &str,
        agent_id: Option<&AgentId>,
    ) -> Result<Vec<ExecutionRecord>, ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /api/v1/auth/login`
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
}

/// Read-only analytics endpoints.
#[allow(async_fn_in_trait)]
pub trait AnalyticsApi {
    async fn dashboard(&self, token: &str) -> Result<DashboardAnalytics, ApiError>;
    async fn usage(&self, token: &str, timeframe: Timeframe) -> Result<UsageAnalytics, ApiError>;
    async fn export(&self, token: &str, format: ExportFormat) -> Result<Value, ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait TeamsApi {
    async fn list_teams(&self, token: &str) -> Result<Vec<Team>, ApiError>;
    async fn create_team(&self, token: &str, name: &str, description: &str)
    -> Result<Team, ApiError>;
    async fn delete_team(&self, token: &str, team_id: i64) -> Result<(), ApiError>;
    async fn invite_member(&self, token: &str, team_id: i64, email: &str)
    -> Result<(), ApiError>;
}

/// Composite trait: any type implementing all five sub-traits is an `AgentApi`.
pub trait AgentApi: CatalogApi + ExecutionApi + AuthApi + AnalyticsApi + TeamsApi {}

/// Blanket implementation: any type implementing all five sub-traits is an `AgentApi`.
impl<T> AgentApi for T where T: CatalogApi + ExecutionApi + AuthApi + AnalyticsApi + TeamsApi {}

// ── Local State Port ──────────────────────────────────────────────────────────

/// Durable key-value storage that survives between invocations.
///
/// Values are JSON. Writes are last-writer-wins.
pub trait LocalStore {
    /// Raw value stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<Value>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: Value) -> Result<()>;
    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Typed read.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored value does
    /// not have the expected shape.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        self.get_raw(key)?
            .map(|value| {
                serde_json::from_value(value)
                    .with_context(|| format!("stored value for '{key}' has an unexpected shape"))
            })
            .transpose()
    }

    /// Typed write.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or stored.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)
            .with_context(|| format!("cannot serialize value for '{key}'"))?;
        self.set_raw(key, value)
    }
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, returning defaults when no file exists.
    fn load(&self) -> Result<AgenticConfig>;
    /// Persist configuration.
    fn save(&self, config: &AgenticConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
