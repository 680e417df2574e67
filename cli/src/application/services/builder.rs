//! Application service: agent creation with the demo-mode fallback.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use agentic_common::{Agent, AgentDraft, AgentId, DemoAgent, local_keys};
use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::ports::{CatalogApi, LocalStore, ProgressReporter};
use crate::domain::builder::validate_draft;
use crate::domain::error::ApiError;
use crate::domain::session::SessionContext;

/// Visible pause before a demo-mode agent is shown.
pub const DEMO_PROCESSING_DELAY: Duration = Duration::from_millis(1000);

/// Why an agent was stored locally instead of on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No token was held, so the backend was not asked.
    NotAuthenticated,
    /// The backend rejected or did not answer the create request.
    Backend(ApiError),
}

/// Outcome of `create_agent`. Both variants are successful creations.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    Remote(Agent),
    Demo {
        agent: DemoAgent,
        reason: FallbackReason,
    },
}

impl CreateOutcome {
    #[must_use]
    pub fn id(&self) -> &AgentId {
        match self {
            CreateOutcome::Remote(agent) => &agent.id,
            CreateOutcome::Demo { agent, .. } => &agent.id,
        }
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        matches!(self, CreateOutcome::Demo { .. })
    }
}

/// Create an agent from a builder draft.
///
/// When the session has no token, or the backend create call fails, the
/// draft is appended to the local `demo_agents` list and the call completes
/// after [`DEMO_PROCESSING_DELAY`].
///
/// # Errors
///
/// Returns an error if the draft is invalid or the local store cannot be
/// read or written. Backend failures are not errors.
pub async fn create_agent(
    api: &impl CatalogApi,
    store: &impl LocalStore,
    session: &SessionContext,
    draft: AgentDraft,
    reporter: &impl ProgressReporter,
) -> Result<CreateOutcome> {
    validate_draft(&draft)?;

    let reason = match session.token.as_deref() {
        Some(token) => {
            reporter.step("creating agent...");
            match api.create_agent(&draft, token).await {
                Ok(agent) => {
                    tracing::info!(agent = %agent.id, "agent created");
                    return Ok(CreateOutcome::Remote(agent));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "agent create failed; switching to demo mode");
                    FallbackReason::Backend(e)
                }
            }
        }
        None => FallbackReason::NotAuthenticated,
    };

    let agent = store_demo_agent(store, draft)?;
    reporter.step("saving agent locally (demo mode)...");
    tokio::time::sleep(DEMO_PROCESSING_DELAY).await;
    Ok(CreateOutcome::Demo { agent, reason })
}

/// Append `draft` to `demo_agents` under a fresh millisecond-timestamp id.
fn store_demo_agent(store: &impl LocalStore, draft: AgentDraft) -> Result<DemoAgent> {
    let mut demos = demo_agents(store)?;
    let created_at = Utc::now();

    let mut millis = created_at.timestamp_millis();
    while demos.iter().any(|d| d.id.as_str() == millis.to_string()) {
        millis += 1;
    }

    let agent = DemoAgent {
        id: AgentId::new(millis.to_string()),
        draft,
        created_at,
    };
    demos.push(agent.clone());
    store
        .set(local_keys::DEMO_AGENTS, &demos)
        .context("cannot save demo agent")?;
    Ok(agent)
}

/// Every locally stored agent, oldest first.
///
/// # Errors
///
/// Returns an error if the stored list cannot be read.
pub fn demo_agents(store: &impl LocalStore) -> Result<Vec<DemoAgent>> {
    Ok(store
        .get::<Vec<DemoAgent>>(local_keys::DEMO_AGENTS)?
        .unwrap_or_default())
}

/// The `n` most recently created local agents, newest first.
///
/// # Errors
///
/// Returns an error if the stored list cannot be read.
pub fn recent_demo_agents(store: &impl LocalStore, n: usize) -> Result<Vec<DemoAgent>> {
    let mut demos = demo_agents(store)?;
    demos.reverse();
    demos.truncate(n);
    Ok(demos)
}
