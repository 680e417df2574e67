//! `agentic agents`: Browse the marketplace, run agents, build new ones.

use std::process::ExitCode;

use agentic_common::{AgentDraft, AgentId, ExecutionStatus};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::builder;
use crate::application::services::catalog::{self, CatalogStore};
use crate::application::services::execution::ExecutionSession;
use crate::domain::builder as form;
use crate::domain::catalog::{CategoryFilter, PriceFilter};
use crate::output::progress;

/// Number of local agents shown by `agents recent` by default.
const RECENT_LIMIT: usize = 3;

/// Agents subcommands.
#[derive(Subcommand)]
pub enum AgentsCommand {
    /// List marketplace agents
    List(ListArgs),
    /// Show agent details and recent executions
    Show {
        /// Agent ID
        id: String,
        /// Use the built-in catalog when the backend is unavailable
        #[arg(long)]
        offline: bool,
    },
    /// Run an agent with the given input
    Run {
        /// Agent ID
        id: String,
        /// Input text sent to the agent
        input: String,
    },
    /// Create a new agent
    Create(CreateArgs),
    /// Show the agents you created locally
    Recent {
        /// Number of agents to show
        #[arg(long, default_value_t = RECENT_LIMIT)]
        limit: usize,
    },
    /// List categories present in the catalog
    Categories {
        /// Use the built-in catalog instead of the backend
        #[arg(long)]
        offline: bool,
    },
}

/// Arguments for `agents list`.
#[derive(Args)]
pub struct ListArgs {
    /// Match against name or description (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category name, or "All"
    #[arg(short, long, default_value = "All")]
    pub category: String,

    /// Price tier: All, Free or Paid
    #[arg(short, long, default_value = "All")]
    pub price: String,

    /// Use the built-in catalog instead of the backend
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for `agents create`.
#[derive(Args, Default)]
pub struct CreateArgs {
    /// Start from a template (Social Media Manager, Code Reviewer, Meeting Summarizer)
    #[arg(long)]
    pub template: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// One of the fixed categories, e.g. Marketing
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    /// Color class, e.g. bg-blue-500
    #[arg(long)]
    pub color: Option<String>,

    /// System instructions for the agent
    #[arg(long)]
    pub instructions: Option<String>,

    #[arg(long)]
    pub example_input: Option<String>,

    #[arg(long)]
    pub example_output: Option<String>,
}

impl CreateArgs {
    /// The template (or a blank form) with explicit flags applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown template or category.
    pub fn into_draft(self) -> Result<AgentDraft> {
        let mut draft = match self.template.as_deref() {
            Some(name) => form::template(name)?,
            None => AgentDraft::default(),
        };
        if let Some(category) = self.category {
            draft.category = match category.parse::<CategoryFilter>()? {
                CategoryFilter::Only(category) => category,
                CategoryFilter::All => anyhow::bail!("Agent category must be a single category."),
            };
        }
        let fields = [
            (&mut draft.name, self.name),
            (&mut draft.description, self.description),
            (&mut draft.icon, self.icon),
            (&mut draft.color, self.color),
            (&mut draft.instructions, self.instructions),
            (&mut draft.example_input, self.example_input),
            (&mut draft.example_output, self.example_output),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        Ok(draft)
    }
}

/// Run an agents subcommand.
///
/// # Errors
///
/// Returns an error if the subcommand fails.
pub async fn run(app: &AppContext, cmd: AgentsCommand) -> Result<ExitCode> {
    match cmd {
        AgentsCommand::List(args) => list(app, &args).await,
        AgentsCommand::Show { id, offline } => show(app, &AgentId::new(id), offline).await,
        AgentsCommand::Run { id, input } => execute(app, &AgentId::new(id), &input).await,
        AgentsCommand::Create(args) => create(app, args).await,
        AgentsCommand::Recent { limit } => recent(app, limit),
        AgentsCommand::Categories { offline } => categories(app, offline).await,
    }
}

/// Build the catalog for this invocation.
///
/// A failed load is a notice, not an error: the command continues with
/// whatever the store holds. Locally created agents are appended.
async fn load_catalog(app: &AppContext, offline: bool) -> CatalogStore {
    let mut store = if offline {
        CatalogStore::seeded()
    } else {
        let mut store = CatalogStore::new();
        let pb = progress::spinner_for(&app.output, "Loading agents...");
        let loaded = store.load(&app.api).await;
        pb.finish_and_clear();
        if let Err(e) = loaded {
            app.renderer().notice(&e.to_string());
        }
        store
    };

    match builder::demo_agents(&app.local) {
        Ok(demos) => store.include_demo_agents(&demos),
        Err(e) => tracing::warn!(error = %e, "cannot read local agents"),
    }
    store
}

async fn list(app: &AppContext, args: &ListArgs) -> Result<ExitCode> {
    let category: CategoryFilter = args.category.parse()?;
    let price: PriceFilter = args.price.parse()?;

    let store = load_catalog(app, args.offline).await;
    let hits = store.search(&args.search, category, price);
    app.renderer().render_agents(&hits, store.len())?;
    Ok(ExitCode::SUCCESS)
}

async fn show(app: &AppContext, id: &AgentId, offline: bool) -> Result<ExitCode> {
    let page = if offline {
        let store = load_catalog(app, true).await;
        catalog::AgentPage {
            agent: store.get_by_id(id)?.clone(),
            history: Vec::new(),
            history_error: None,
        }
    } else {
        let mut fallback = CatalogStore::seeded();
        if let Ok(demos) = builder::demo_agents(&app.local) {
            fallback.include_demo_agents(&demos);
        }
        catalog::load_agent_page(&app.api, &app.session, id, &fallback).await?
    };
    app.renderer().render_agent_page(&page, Utc::now())?;
    Ok(ExitCode::SUCCESS)
}

async fn execute(app: &AppContext, id: &AgentId, input: &str) -> Result<ExitCode> {
    let store = load_catalog(app, false).await;
    let session = ExecutionSession::new(&app.api, &app.session).with_timeout(app.timeout());

    let pb = progress::spinner_for(&app.output, "Executing...");
    let outcome = match session.execute(&store, id, input).await {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    match outcome.record.status {
        ExecutionStatus::Success => progress::finish_ok(&pb, "Done"),
        _ => progress::finish_error(&pb, "Execution failed"),
    }

    app.renderer().render_execution(&outcome, Utc::now())?;
    Ok(if outcome.record.status == ExecutionStatus::Success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn create(app: &AppContext, args: CreateArgs) -> Result<ExitCode> {
    let mut draft = args.into_draft()?;
    if !app.non_interactive && app.output.is_tty && !app.is_json() {
        prompt_missing(&mut draft)?;
    }

    let outcome = builder::create_agent(
        &app.api,
        &app.local,
        &app.session,
        draft,
        &app.reporter(),
    )
    .await?;
    app.renderer().render_created(&outcome)?;
    Ok(ExitCode::SUCCESS)
}

/// Ask for the two required fields when they were not given as flags.
fn prompt_missing(draft: &mut AgentDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        draft.name = dialoguer::Input::new()
            .with_prompt("Agent name")
            .interact_text()
            .context("cannot read agent name")?;
    }
    if draft.description.trim().is_empty() {
        draft.description = dialoguer::Input::new()
            .with_prompt("Description")
            .interact_text()
            .context("cannot read description")?;
    }
    Ok(())
}

fn recent(app: &AppContext, limit: usize) -> Result<ExitCode> {
    let demos = builder::recent_demo_agents(&app.local, limit)?;
    app.renderer().render_demo_agents(&demos, Utc::now())?;
    Ok(ExitCode::SUCCESS)
}

async fn categories(app: &AppContext, offline: bool) -> Result<ExitCode> {
    let store = load_catalog(app, offline).await;
    app.renderer().render_category_tabs(&store.categories())?;
    Ok(ExitCode::SUCCESS)
}
