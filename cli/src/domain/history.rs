//! Execution history: the append-ordered record list and its views.

use std::str::FromStr;

use agentic_common::{Agent, AgentId, ExecutionRecord, ExecutionStatus, TransitionError};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::FilterError;

/// Append-only list of executions. Insertion order is the ground truth;
/// displays read it most-recent-first.
#[derive(Debug, Clone, Default)]
pub struct ExecutionHistory {
    records: Vec<ExecutionRecord>,
}

impl ExecutionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ExecutionRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    /// Move the record `id` out of `pending`. Returns the updated record,
    /// or `None` when no such record exists.
    pub fn complete(
        &mut self,
        id: &str,
        finish: impl FnOnce(&mut ExecutionRecord) -> Result<(), TransitionError>,
    ) -> Option<Result<ExecutionRecord, TransitionError>> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        Some(finish(&mut *record).map(|()| record.clone()))
    }

    /// Records for one agent, most recent first.
    #[must_use]
    pub fn for_agent(&self, agent_id: &AgentId) -> Vec<ExecutionRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| &r.agent_id == agent_id)
            .cloned()
            .collect()
    }
}

/// History page status tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ExecutionStatus),
}

impl FromStr for StatusFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<ExecutionStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| FilterError::UnknownStatus(s.to_string()))
    }
}

/// Apply a status tab and return the records most recent first.
///
/// Ordered by `created_at`; records with equal timestamps keep their input
/// order, so a backend list (already newest first) passes through unchanged.
#[must_use]
pub fn view(records: &[ExecutionRecord], status: StatusFilter) -> Vec<&ExecutionRecord> {
    let mut shown: Vec<&ExecutionRecord> = records
        .iter()
        .filter(|r| match status {
            StatusFilter::All => true,
            StatusFilter::Only(s) => r.status == s,
        })
        .collect();
    shown.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    shown
}

/// Fill blank agent names and icons from the catalog.
///
/// Backend rows only carry the agent id. Records of agents the catalog
/// does not know are left as they are.
pub fn fill_agent_details(records: &mut [ExecutionRecord], agents: &[Agent]) {
    for record in records {
        let Some(agent) = agents.iter().find(|a| a.id == record.agent_id) else {
            continue;
        };
        if record.agent_name.is_empty() {
            record.agent_name.clone_from(&agent.name);
        }
        if record.agent_icon.is_empty() {
            record.agent_icon.clone_from(&agent.icon);
        }
    }
}

/// Counters shown above the history list, over all records regardless of
/// the selected tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub success: usize,
    pub error: usize,
    pub pending: usize,
    /// Mean over every record; 0 when there are none.
    pub avg_execution_time_ms: u64,
}

impl HistoryStats {
    /// Count for one status tab; `All` is the total.
    #[must_use]
    pub fn count(&self, status: StatusFilter) -> usize {
        match status {
            StatusFilter::All => self.total,
            StatusFilter::Only(ExecutionStatus::Success) => self.success,
            StatusFilter::Only(ExecutionStatus::Error) => self.error,
            StatusFilter::Only(ExecutionStatus::Pending) => self.pending,
        }
    }
}

#[must_use]
pub fn stats(records: &[ExecutionRecord]) -> HistoryStats {
    let mut stats = HistoryStats {
        total: records.len(),
        ..HistoryStats::default()
    };
    let mut total_ms: u64 = 0;
    for record in records {
        match record.status {
            ExecutionStatus::Success => stats.success += 1,
            ExecutionStatus::Error => stats.error += 1,
            ExecutionStatus::Pending => stats.pending += 1,
        }
        total_ms = total_ms.saturating_add(record.execution_time_ms);
    }
    let n = u64::try_from(records.len()).unwrap_or(u64::MAX);
    if n > 0 {
        stats.avg_execution_time_ms = total_ms / n;
    }
    stats
}

/// Relative age label used in history listings.
#[must_use]
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - at).num_hours();
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else if hours < 168 {
        format!("{} days ago", hours / 24)
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}
