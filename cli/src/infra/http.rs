//! Infrastructure implementation of the platform API ports over HTTP.

use std::time::Duration;

use agentic_common::{
    Agent, AgentDraft, AgentId, DashboardAnalytics, ExecutionRecord, LoginResponse, Team,
    UsageAnalytics,
};
use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::application::ports::{AnalyticsApi, AuthApi, CatalogApi, ExecutionApi, TeamsApi};
use crate::domain::analytics::{ExportFormat, Timeframe};
use crate::domain::error::ApiError;

/// `reqwest` client bound to one backend base URL.
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    /// Build a client whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("agentic/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body: error_detail(&body),
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Error bodies are usually `{"detail": "..."}`; fall back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

impl CatalogApi for HttpApi {
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError> {
        self.send_json(self.client.get(self.url("/api/v1/agents")))
            .await
    }

    async fn get_agent(&self, id: &AgentId) -> Result<Agent, ApiError> {
        self.send_json(self.client.get(self.url(&format!("/api/v1/agents/{id}"))))
            .await
    }

    async fn create_agent(&self, draft: &AgentDraft, token: &str) -> Result<Agent, ApiError> {
        self.send_json(
            self.client
                .post(self.url("/api/v1/agents"))
                .bearer_auth(token)
                .json(draft),
        )
        .await
    }
}

impl ExecutionApi for HttpApi {
    async fn execute_agent(
        &self,
        id: &AgentId,
        input: &str,
        token: &str,
    ) -> Result<Value, ApiError> {
        self.send_json(
            self.client
                .post(self.url(&format!("/api/v1/agents/{id}/execute")))
                .bearer_auth(token)
                .json(&json!({ "input": input })),
        )
        .await
    }

    async fn list_history(
        &self,
        token: &str,
        agent_id: Option<&AgentId>,
    ) -> Result<Vec<ExecutionRecord>, ApiError> {
        let mut request = self
            .client
            .get(self.url("/api/v1/history"))
            .bearer_auth(token);
        if let Some(id) = agent_id {
            request = request.query(&[("agent_id", id.as_str())]);
        }
        self.send_json(request).await
    }
}

impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.send_json(
            self.client
                .post(self.url("/api/v1/auth/login"))
                .json(&json!({ "email": email, "password": password })),
        )
        .await
    }
}

impl AnalyticsApi for HttpApi {
    async fn dashboard(&self, token: &str) -> Result<DashboardAnalytics, ApiError> {
        self.send_json(
            self.client
                .get(self.url("/api/v1/analytics/dashboard"))
                .bearer_auth(token),
        )
        .await
    }

    async fn usage(&self, token: &str, timeframe: Timeframe) -> Result<UsageAnalytics, ApiError> {
        self.send_json(
            self.client
                .get(self.url("/api/v1/analytics/usage"))
                .bearer_auth(token)
                .query(&[("timeframe", timeframe.as_str())]),
        )
        .await
    }

    async fn export(&self, token: &str, format: ExportFormat) -> Result<Value, ApiError> {
        self.send_json(
            self.client
                .get(self.url("/api/v1/analytics/export"))
                .bearer_auth(token)
                .query(&[("format", format.as_str())]),
        )
        .await
    }
}

impl TeamsApi for HttpApi {
    async fn list_teams(&self, token: &str) -> Result<Vec<Team>, ApiError> {
        self.send_json(self.client.get(self.url("/api/v1/teams")).bearer_auth(token))
            .await
    }

    async fn create_team(
        &self,
        token: &str,
        name: &str,
        description: &str,
    ) -> Result<Team, ApiError> {
        self.send_json(
            self.client
                .post(self.url("/api/v1/teams"))
                .bearer_auth(token)
                .json(&json!({ "name": name, "description": description })),
        )
        .await
    }

    async fn delete_team(&self, token: &str, team_id: i64) -> Result<(), ApiError> {
        Self::send(
            self.client
                .delete(self.url(&format!("/api/v1/teams/{team_id}")))
                .bearer_auth(token),
        )
        .await
        .map(drop)
    }

    async fn invite_member(&self, token: &str, team_id: i64, email: &str) -> Result<(), ApiError> {
        Self::send(
            self.client
                .post(self.url(&format!("/api/v1/teams/{team_id}/invite")))
                .bearer_auth(token)
                .json(&json!({ "email": email })),
        )
        .await
        .map(drop)
    }
}
