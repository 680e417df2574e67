//! `agentic history`: Past executions, most recent first.

use std::process::ExitCode;

use agentic_common::AgentId;
use anyhow::Result;
use chrono::Utc;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::catalog::CatalogStore;
use crate::application::services::execution;
use crate::domain::history::{self, StatusFilter};

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Status tab: all, pending, success or error
    #[arg(short, long, default_value = "all")]
    pub status: String,

    /// Only executions of this agent
    #[arg(short, long)]
    pub agent: Option<String>,
}

/// Run the history command.
///
/// # Errors
///
/// Returns an error for an unknown status, when not logged in, or when the
/// request fails.
pub async fn run(app: &AppContext, args: &HistoryArgs) -> Result<ExitCode> {
    let status: StatusFilter = args.status.parse()?;
    let agent = args.agent.clone().map(AgentId::new);

    let mut records = execution::fetch_history(&app.api, &app.session, agent.as_ref()).await?;
    let mut catalog = CatalogStore::new();
    match catalog.load(&app.api).await {
        Ok(_) => history::fill_agent_details(&mut records, catalog.agents()),
        Err(e) => tracing::debug!(error = %e, "history shown without agent names"),
    }

    let stats = history::stats(&records);
    let shown = history::view(&records, status);
    app.renderer()
        .render_history(&shown, &stats, status, Utc::now())?;
    Ok(ExitCode::SUCCESS)
}
