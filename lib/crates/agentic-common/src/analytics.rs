//! Analytics shapes shared by the local aggregator and the
//! `/api/v1/analytics/*` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::agent::{AgentId, string_or_number};

/// Headline counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_agents: Option<usize>,
    pub total_executions: usize,
    #[serde(default)]
    pub today_executions: usize,
    #[serde(default)]
    pub weekly_executions: usize,
    #[serde(default)]
    pub time_saved_minutes: u64,
    #[serde(default)]
    pub time_saved_hours: f64,
    /// Successful executions as a percentage of all executions.
    #[serde(default)]
    pub automation_rate: f64,
    #[serde(default)]
    pub avg_execution_time_ms: f64,
}

/// One entry of the "top agents" ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopAgent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub count: usize,
    pub percentage: f64,
}

/// Per-category share of agents and executions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub agent_count: usize,
    pub execution_count: usize,
    pub percentage: f64,
}

/// One day of the weekly trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub day: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    #[serde(default)]
    pub weekly: Vec<DailyCount>,
    #[serde(default)]
    pub top_agents: Vec<TopAgent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    #[serde(default)]
    pub categories: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub agent_name: String,
    #[serde(default)]
    pub agent_icon: String,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub execution_time_ms: u64,
    pub created_at: String,
}

/// `GET /api/v1/analytics/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    pub summary: AnalyticsSummary,
    #[serde(default)]
    pub trends: Trends,
    #[serde(default)]
    pub breakdown: Breakdown,
    #[serde(default)]
    pub recent_activity: Vec<RecentActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeframe {
    pub start_date: String,
    pub end_date: String,
    pub days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total_executions: usize,
    #[serde(default)]
    pub executions_per_day: f64,
    #[serde(default)]
    pub avg_execution_time_ms: f64,
    #[serde(default)]
    pub total_time_saved_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub date: String,
    pub execution_count: usize,
    #[serde(default)]
    pub avg_execution_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentUsage {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub execution_count: usize,
    #[serde(default)]
    pub avg_execution_time_ms: f64,
    pub percentage: f64,
}

/// `GET /api/v1/analytics/usage?timeframe=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageAnalytics {
    pub timeframe: Timeframe,
    pub summary: UsageSummary,
    #[serde(default)]
    pub daily_data: Vec<DailyUsage>,
    #[serde(default)]
    pub agent_usage: Vec<AgentUsage>,
}
