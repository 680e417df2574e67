//! Application service: analytics reports.
//!
//! Local reports aggregate execution records with the pure functions in
//! `crate::domain::analytics`; the dashboard, usage and export reports are
//! read from the backend as is.

use agentic_common::{
    Agent, AnalyticsSummary, CategoryShare, DailyCount, DashboardAnalytics, ExecutionRecord,
    TopAgent, UsageAnalytics,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{AnalyticsApi, ExecutionApi};
use crate::domain::analytics::{self, ExportFormat, Timeframe};
use crate::domain::error::ApiError;
use crate::domain::session::SessionContext;

/// Aggregates over one list of records.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub summary: AnalyticsSummary,
    pub top_agents: Vec<TopAgent>,
    pub categories: Vec<CategoryShare>,
    pub weekly: Vec<DailyCount>,
}

/// Build every local aggregate at once.
#[must_use]
pub fn build_report(
    agents: &[Agent],
    records: &[ExecutionRecord],
    now: DateTime<Utc>,
    top_n: usize,
) -> AnalyticsReport {
    let mut summary = analytics::summarize(records, now);
    summary.total_agents = Some(agents.len());
    AnalyticsReport {
        summary,
        top_agents: analytics::top_agents(records, top_n),
        categories: analytics::category_breakdown(agents, records),
        weekly: analytics::weekly_trend(records, now),
    }
}

/// Every execution record of the signed-in user.
///
/// # Errors
///
/// Returns an error if the session has no token or the request fails.
pub async fn fetch_records(
    api: &impl ExecutionApi,
    session: &SessionContext,
) -> Result<Vec<ExecutionRecord>> {
    let token = session.require_token()?;
    api.list_history(token, None)
        .await
        .context("cannot load execution history")
}

/// # Errors
///
/// Returns an error if the session has no token or the request fails.
pub async fn dashboard(
    api: &impl AnalyticsApi,
    session: &SessionContext,
) -> Result<DashboardAnalytics> {
    let token = session.require_token()?;
    api.dashboard(token)
        .await
        .context("cannot load dashboard analytics")
}

/// # Errors
///
/// Returns an error if the session has no token or the request fails.
pub async fn usage(
    api: &impl AnalyticsApi,
    session: &SessionContext,
    timeframe: Timeframe,
) -> Result<UsageAnalytics> {
    let token = session.require_token()?;
    api.usage(token, timeframe)
        .await
        .with_context(|| format!("cannot load usage analytics for {}", timeframe.as_str()))
}

/// An export ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// Download an export.
///
/// # Errors
///
/// Returns an error if the session has no token, the request fails, or the
/// body lacks a `data` field of the expected type.
pub async fn export(
    api: &impl AnalyticsApi,
    session: &SessionContext,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<ExportFile> {
    let token = session.require_token()?;
    let body = api
        .export(token, format)
        .await
        .context("cannot export analytics")?;
    export_file(&body, format, now).map_err(Into::into)
}

/// Turn an export response body into a file.
///
/// CSV bodies carry the file text in `data` and may name the file; JSON
/// bodies carry the records in `data`, which are pretty-printed.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if `data` is missing or has the wrong type.
pub fn export_file(
    body: &Value,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<ExportFile, ApiError> {
    let data = body
        .get("data")
        .ok_or_else(|| ApiError::Decode("export response has no 'data' field".into()))?;
    match format {
        ExportFormat::Csv => {
            let contents = data
                .as_str()
                .ok_or_else(|| ApiError::Decode("csv export 'data' is not text".into()))?
                .to_string();
            let filename = body
                .get("filename")
                .and_then(Value::as_str)
                .and_then(|name| std::path::Path::new(name).file_name())
                .and_then(|name| name.to_str())
                .map_or_else(
                    || format!("agentic_analytics_{}.csv", now.format("%Y%m%d_%H%M%S")),
                    str::to_string,
                );
            Ok(ExportFile { filename, contents })
        }
        ExportFormat::Json => {
            let contents = serde_json::to_string_pretty(data)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(ExportFile {
                filename: format!("agentic_analytics_{}.json", now.format("%Y-%m-%d")),
                contents,
            })
        }
    }
}
