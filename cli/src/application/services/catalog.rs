//! Application service: the agent catalog store and the agent page loader.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use agentic_common::{Agent, AgentId, DemoAgent, ExecutionRecord};

use crate::application::ports::{CatalogApi, ExecutionApi};
use crate::domain::catalog::{self, CategoryFilter, PriceFilter};
use crate::domain::error::{ApiError, CatalogError};
use crate::domain::history::fill_agent_details;
use crate::domain::session::SessionContext;

/// The agents known to this process.
///
/// The only mutations are [`CatalogStore::load`], which replaces the
/// contents on success, and [`CatalogStore::include_demo_agents`].
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    agents: Vec<Agent>,
}

impl CatalogStore {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in marketplace catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_agents(catalog::seed_agents())
    }

    #[must_use]
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Fetch the catalog from the backend.
    ///
    /// On failure the previous contents are kept and the error is returned
    /// for the caller to show as a notice.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LoadFailed`] if the request fails.
    pub async fn load(&mut self, api: &impl CatalogApi) -> Result<usize, CatalogError> {
        match api.list_agents().await {
            Ok(agents) => {
                tracing::debug!(count = agents.len(), "catalog loaded");
                self.agents = agents;
                Ok(self.agents.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog load failed; keeping previous contents");
                Err(CatalogError::LoadFailed(e.to_string()))
            }
        }
    }

    /// Append locally created agents whose ids are not already present.
    pub fn include_demo_agents(&mut self, demos: &[DemoAgent]) {
        for demo in demos {
            if self.agents.iter().all(|a| a.id != demo.id) {
                self.agents.push(demo.to_agent());
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no agent has this id.
    pub fn get_by_id(&self, id: &AgentId) -> Result<&Agent, CatalogError> {
        self.agents
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn search(&self, query: &str, category: CategoryFilter, price: PriceFilter) -> Vec<&Agent> {
        catalog::filter(&self.agents, query, category, price)
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        catalog::category_tabs(&self.agents)
    }
}

/// Everything the agent detail page shows.
#[derive(Debug)]
pub struct AgentPage {
    pub agent: Agent,
    pub history: Vec<ExecutionRecord>,
    /// Set when the history request failed; the page still renders.
    pub history_error: Option<ApiError>,
}

/// Fetch an agent and its execution history concurrently.
///
/// Both requests complete before this returns. When the backend cannot
/// serve the agent, `fallback` (the local catalog) is consulted. History is
/// only requested when the session holds a token.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] when neither the backend nor the
/// fallback knows the agent, or [`CatalogError::LoadFailed`] when the
/// backend failed for another reason and the fallback has no match.
pub async fn load_agent_page(
    api: &(impl CatalogApi + ExecutionApi),
    session: &SessionContext,
    id: &AgentId,
    fallback: &CatalogStore,
) -> Result<AgentPage, CatalogError> {
    let history = async {
        match session.token.as_deref() {
            Some(token) => api.list_history(token, Some(id)).await,
            None => Ok(Vec::new()),
        }
    };
    let (agent, history) = tokio::join!(api.get_agent(id), history);

    let agent = match agent {
        Ok(agent) => agent,
        Err(e) => match fallback.get_by_id(id) {
            Ok(local) => {
                tracing::debug!(error = %e, agent = %id, "using local catalog entry");
                local.clone()
            }
            Err(_) if e.is_not_found() => return Err(CatalogError::NotFound(id.clone())),
            Err(_) => return Err(CatalogError::LoadFailed(e.to_string())),
        },
    };

    let (history, history_error) = match history {
        Ok(mut records) => {
            fill_agent_details(&mut records, std::slice::from_ref(&agent));
            (records, None)
        }
        Err(e) => {
            tracing::warn!(error = %e, agent = %id, "history request failed");
            (Vec::new(), Some(e))
        }
    };

    Ok(AgentPage {
        agent,
        history,
        history_error,
    })
}
