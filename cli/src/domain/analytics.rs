//! Analytics aggregation over execution records.
//!
//! Pure functions only: no I/O or async. Every percentage is computed
//! against the total at call time and is `0.0` when the total is zero.

use std::collections::HashMap;
use std::str::FromStr;

use agentic_common::{
    Agent, AgentId, AnalyticsSummary, CategoryShare, DailyCount, ExecutionRecord,
    ExecutionStatus, TopAgent,
};
use chrono::{DateTime, Duration, Utc};

use crate::domain::error::FilterError;

/// Estimated manual work replaced by one execution.
pub const MINUTES_SAVED_PER_EXECUTION: u64 = 15;

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / total * 100`, rounded to one decimal; `0.0` when `total == 0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

/// Headline counters for a list of records.
///
/// `today_executions` compares calendar dates in UTC; `weekly_executions`
/// counts records created in `[now - 7 days, now]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(records: &[ExecutionRecord], now: DateTime<Utc>) -> AnalyticsSummary {
    let total = records.len();
    let today = now.date_naive();
    let week_ago = now - Duration::days(7);

    let today_executions = records
        .iter()
        .filter(|r| r.created_at.date_naive() == today)
        .count();
    let weekly_executions = records
        .iter()
        .filter(|r| r.created_at >= week_ago && r.created_at <= now)
        .count();
    let successful = records
        .iter()
        .filter(|r| r.status == ExecutionStatus::Success)
        .count();

    let finished: Vec<u64> = records
        .iter()
        .filter(|r| r.status.is_terminal())
        .map(|r| r.execution_time_ms)
        .collect();
    let avg_execution_time_ms = if finished.is_empty() {
        0.0
    } else {
        (finished.iter().sum::<u64>() as f64 / finished.len() as f64).round()
    };

    let time_saved_minutes = total as u64 * MINUTES_SAVED_PER_EXECUTION;

    AnalyticsSummary {
        total_agents: None,
        total_executions: total,
        today_executions,
        weekly_executions,
        time_saved_minutes,
        time_saved_hours: round1(time_saved_minutes as f64 / 60.0),
        automation_rate: percentage(successful, total),
        avg_execution_time_ms,
    }
}

/// The `n` most executed agents.
///
/// Ties keep the order in which agents first appear in `records`.
#[must_use]
pub fn top_agents(records: &[ExecutionRecord], n: usize) -> Vec<TopAgent> {
    let mut index: HashMap<&AgentId, usize> = HashMap::new();
    let mut ranked: Vec<(&ExecutionRecord, usize)> = Vec::new();

    for record in records {
        match index.get(&record.agent_id) {
            Some(&i) => ranked[i].1 += 1,
            None => {
                index.insert(&record.agent_id, ranked.len());
                ranked.push((record, 1));
            }
        }
    }

    // `sort_by` is stable, so equal counts stay in first-seen order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(n)
        .map(|(first, count)| TopAgent {
            agent_id: Some(first.agent_id.clone()),
            name: first.agent_name.clone(),
            icon: first.agent_icon.clone(),
            count,
            percentage: percentage(count, records.len()),
        })
        .collect()
}

/// Agent and execution counts per category present in `agents`.
///
/// Categories appear in first-seen order; categories with no agents are
/// omitted. Records whose agent is not in `agents` still count toward the
/// total.
#[must_use]
pub fn category_breakdown(agents: &[Agent], records: &[ExecutionRecord]) -> Vec<CategoryShare> {
    let category_of: HashMap<&AgentId, _> = agents.iter().map(|a| (&a.id, a.category)).collect();

    let mut shares: Vec<CategoryShare> = Vec::new();
    for agent in agents {
        let name = agent.category.as_str();
        match shares.iter_mut().find(|s| s.name == name) {
            Some(share) => share.agent_count += 1,
            None => shares.push(CategoryShare {
                name: name.to_string(),
                agent_count: 1,
                execution_count: 0,
                percentage: 0.0,
            }),
        }
    }

    for record in records {
        let Some(category) = category_of.get(&record.agent_id) else {
            continue;
        };
        if let Some(share) = shares.iter_mut().find(|s| s.name == category.as_str()) {
            share.execution_count += 1;
        }
    }

    let total = records.len();
    for share in &mut shares {
        share.percentage = percentage(share.execution_count, total);
    }
    shares
}

/// Seven daily buckets ending on `now`'s date.
#[must_use]
pub fn weekly_trend(records: &[ExecutionRecord], now: DateTime<Utc>) -> Vec<DailyCount> {
    let today = now.date_naive();
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DailyCount {
                date,
                day: date.format("%a").to_string(),
                count: records
                    .iter()
                    .filter(|r| r.created_at.date_naive() == date)
                    .count(),
            }
        })
        .collect()
}

// ── Remote query selectors ───────────────────────────────────────────────────

/// Usage report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    Week,
    Month,
    Quarter,
}

impl Timeframe {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Week => "7d",
            Timeframe::Month => "30d",
            Timeframe::Quarter => "90d",
        }
    }
}

impl FromStr for Timeframe {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Timeframe::Week),
            "30d" => Ok(Timeframe::Month),
            "90d" => Ok(Timeframe::Quarter),
            other => Err(FilterError::UnknownTimeframe(other.to_string())),
        }
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(FilterError::UnknownExportFormat(other.to_string())),
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
