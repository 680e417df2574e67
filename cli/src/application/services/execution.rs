//! Application service: the execution session manager.
//!
//! One [`ExecutionSession`] owns the process-wide execution history and runs
//! "execute agent with input" cycles against it:
//!
//! ```text
//! Idle ──validate──▶ Submitting ──response──▶ Succeeded
//!                         └──────error───────▶ Failed
//! ```
//!
//! Validation failures never create a record. Once a record is created it
//! always reaches a terminal status before `execute` returns.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use agentic_common::{Agent, AgentId, ExecutionRecord};
use anyhow::Context as _;
use chrono::Utc;

use crate::application::ports::ExecutionApi;
use crate::application::services::catalog::CatalogStore;
use crate::domain::config::DEFAULT_TIMEOUT_SECS;
use crate::domain::error::{ApiError, SessionError};
use crate::domain::execution::{ExecuteResponse, elapsed_ms, failure_output, record_id};
use crate::domain::history::{ExecutionHistory, fill_agent_details};
use crate::domain::session::SessionContext;

/// History shown after an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    /// Fresh list from the backend.
    Remote(Vec<ExecutionRecord>),
    /// The refresh failed; records from this process only.
    Local(Vec<ExecutionRecord>),
}

impl HistoryView {
    #[must_use]
    pub fn records(&self) -> &[ExecutionRecord] {
        match self {
            HistoryView::Remote(records) | HistoryView::Local(records) => records,
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, HistoryView::Remote(_))
    }
}

/// Result of one execution cycle. `record` is always terminal.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub record: ExecutionRecord,
    pub history: HistoryView,
}

/// Runs executions and keeps their records.
pub struct ExecutionSession<'a, A> {
    api: &'a A,
    session: &'a SessionContext,
    timeout: Duration,
    history: Mutex<ExecutionHistory>,
    in_flight: Mutex<HashSet<AgentId>>,
    seq: AtomicU64,
}

impl<'a, A: ExecutionApi> ExecutionSession<'a, A> {
    #[must_use]
    pub fn new(api: &'a A, session: &'a SessionContext) -> Self {
        Self {
            api,
            session,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            history: Mutex::new(ExecutionHistory::new()),
            in_flight: Mutex::new(HashSet::new()),
            seq: AtomicU64::new(0),
        }
    }

    /// Bound on the remote call; exceeding it fails the execution.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Snapshot of every record created by this session, insertion order.
    #[must_use]
    pub fn records(&self) -> Vec<ExecutionRecord> {
        self.lock_history().records().to_vec()
    }

    /// Run `agent_id` with `input`.
    ///
    /// A backend failure is not an error here: it produces a record in
    /// `error` status. Errors are reserved for requests rejected before a
    /// record exists.
    ///
    /// # Errors
    ///
    /// - [`SessionError::EmptyInput`] if `input` is blank
    /// - [`SessionError::NotAuthenticated`] if the session has no token
    /// - [`SessionError::AgentNotFound`] if the catalog lacks the agent
    /// - [`SessionError::ExecutionInFlight`] if the agent is already running
    pub async fn execute(
        &self,
        catalog: &CatalogStore,
        agent_id: &AgentId,
        input: &str,
    ) -> Result<ExecutionOutcome, SessionError> {
        if input.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let token = self.session.require_token()?;
        let agent = catalog
            .get_by_id(agent_id)
            .map_err(|_| SessionError::AgentNotFound(agent_id.clone()))?;
        let guard = InFlight::acquire(&self.in_flight, agent_id)?;

        let created_at = Utc::now();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let mut record =
            ExecutionRecord::pending(record_id(created_at, seq), agent, input, created_at);
        self.lock_history().push(record.clone());
        tracing::info!(agent = %agent_id, record = %record.id, "execution submitted");

        let started = Instant::now();
        let result = match tokio::time::timeout(
            self.timeout,
            self.api.execute_agent(agent_id, input, token),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout),
        };
        let elapsed = elapsed_ms(started.elapsed());

        let finish = |r: &mut ExecutionRecord| match &result {
            Ok(body) => r.succeed(ExecuteResponse::classify(body).into_output(), elapsed),
            Err(e) => r.fail(failure_output(e), elapsed),
        };
        let finished = {
            let mut history = self.lock_history();
            if let Some(done) = history.complete(&record.id, &finish) {
                done?
            } else {
                finish(&mut record)?;
                history.push(record.clone());
                record
            }
        };
        drop(guard);

        match &result {
            Ok(_) => tracing::info!(record = %finished.id, elapsed_ms = elapsed, "execution succeeded"),
            Err(e) => tracing::warn!(record = %finished.id, error = %e, "execution failed"),
        }

        let history = self.refresh(token, agent).await;
        Ok(ExecutionOutcome {
            record: finished,
            history,
        })
    }

    async fn refresh(&self, token: &str, agent: &Agent) -> HistoryView {
        let agent_id = &agent.id;
        match self.api.list_history(token, Some(agent_id)).await {
            Ok(mut records) => {
                fill_agent_details(&mut records, std::slice::from_ref(agent));
                HistoryView::Remote(records)
            }
            Err(e) => {
                tracing::warn!(error = %e, agent = %agent_id, "history refresh failed; showing local history");
                HistoryView::Local(self.lock_history().for_agent(agent_id))
            }
        }
    }

    fn lock_history(&self) -> MutexGuard<'_, ExecutionHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Execution history for the history page, optionally for one agent.
///
/// # Errors
///
/// Returns an error if the session has no token or the request fails.
pub async fn fetch_history(
    api: &impl ExecutionApi,
    session: &SessionContext,
    agent_id: Option<&AgentId>,
) -> anyhow::Result<Vec<ExecutionRecord>> {
    let token = session.require_token()?;
    api.list_history(token, agent_id)
        .await
        .context("cannot load execution history")
}

/// Marks an agent as submitting until dropped.
struct InFlight<'s> {
    set: &'s Mutex<HashSet<AgentId>>,
    id: AgentId,
}

impl<'s> InFlight<'s> {
    fn acquire(set: &'s Mutex<HashSet<AgentId>>, id: &AgentId) -> Result<Self, SessionError> {
        let mut running = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !running.insert(id.clone()) {
            return Err(SessionError::ExecutionInFlight(id.clone()));
        }
        Ok(Self {
            set,
            id: id.clone(),
        })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
