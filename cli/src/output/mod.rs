//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use agentic_common::{
    Agent, CategoryShare, DashboardAnalytics, DemoAgent, ExecutionRecord, Team, TopAgent,
    UsageAnalytics, User,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use console::Term;
use owo_colors::OwoColorize as _;
use serde_json::json;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::analytics::AnalyticsReport;
use crate::application::services::builder::{CreateOutcome, FallbackReason};
use crate::application::services::catalog::AgentPage;
use crate::application::services::execution::ExecutionOutcome;
use crate::application::services::teams::TeamListing;
use crate::domain::config::AgenticConfig;
use crate::domain::history::{HistoryStats, StatusFilter};
use crate::domain::teams::TeamView;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Renderer selected by `--json`.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Non-fatal notice, such as a failed catalog load.
    pub fn notice(&self, message: &str) {
        match self {
            Renderer::Human(r) => r.render_notice(message),
            Renderer::Json(r) => r.render_notice(message),
        }
    }

    /// Completion of a command without other output.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn done(&self, message: &str, details: serde_json::Value) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_done(message);
                Ok(())
            }
            Renderer::Json(r) => r.render_done(message, details),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({ "version": version })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_agents(&self, agents: &[&Agent], total: usize) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_agents(agents, total);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({ "total": total, "agents": agents })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_agent_page(&self, page: &AgentPage, now: DateTime<Utc>) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_agent_page(page, now);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({
                "agent": page.agent,
                "history": page.history,
                "history_error": page.history_error.as_ref().map(ToString::to_string),
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_execution(&self, outcome: &ExecutionOutcome, now: DateTime<Utc>) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_execution(outcome, now);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({
                "record": outcome.record,
                "history_source": if outcome.history.is_remote() { "remote" } else { "local" },
                "history": outcome.history.records(),
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_history(
        &self,
        records: &[&ExecutionRecord],
        stats: &HistoryStats,
        status: StatusFilter,
        now: DateTime<Utc>,
    ) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_history(records, stats, status, now);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({
                "stats": stats,
                "executions": records,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_summary(&self, report: &AnalyticsReport) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_summary(report);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({
                "summary": report.summary,
                "weekly": report.weekly,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_top_agents(&self, top: &[TopAgent]) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_top_agents(top);
                Ok(())
            }
            Renderer::Json(r) => r.render(top),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_category_shares(&self, shares: &[CategoryShare]) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_category_shares(shares);
                Ok(())
            }
            Renderer::Json(r) => r.render(shares),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_dashboard(&self, dash: &DashboardAnalytics, now: DateTime<Utc>) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_dashboard(dash, now);
                Ok(())
            }
            Renderer::Json(r) => r.render(dash),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_usage(&self, usage: &UsageAnalytics) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_usage(usage);
                Ok(())
            }
            Renderer::Json(r) => r.render(usage),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_exported(&self, path: &Path) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_exported(path);
                Ok(())
            }
            Renderer::Json(r) => r.render_done(
                "exported",
                json!({ "path": path.display().to_string() }),
            ),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_created(&self, outcome: &CreateOutcome) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_created(outcome);
                Ok(())
            }
            Renderer::Json(r) => match outcome {
                CreateOutcome::Remote(agent) => r.render(&json!({
                    "mode": "remote",
                    "agent": agent,
                })),
                CreateOutcome::Demo { agent, reason } => r.render(&json!({
                    "mode": "demo",
                    "agent": agent,
                    "reason": match reason {
                        FallbackReason::NotAuthenticated => "not authenticated".to_string(),
                        FallbackReason::Backend(e) => e.to_string(),
                    },
                })),
            },
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_demo_agents(&self, demos: &[DemoAgent], now: DateTime<Utc>) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_demo_agents(demos, now);
                Ok(())
            }
            Renderer::Json(r) => r.render(demos),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_category_tabs(&self, tabs: &[String]) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_category_tabs(tabs);
                Ok(())
            }
            Renderer::Json(r) => r.render(tabs),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_user(&self, user: &User) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_user(user);
                Ok(())
            }
            Renderer::Json(r) => r.render(user),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_teams(&self, listing: &TeamListing) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_teams(listing);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({
                "view": match listing.view {
                    TeamView::Mine => "mine",
                    TeamView::Joined => "joined",
                    TeamView::All => "all",
                },
                "user_id": listing.user_id,
                "teams": listing.teams,
                "totals": listing.totals,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_team_created(&self, team: &Team) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_team_created(team);
                Ok(())
            }
            Renderer::Json(r) => r.render(team),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &AgenticConfig, path: &Path) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Renderer::Json(r) => r.render(&json!({
                "path": path.display().to_string(),
                "config": config,
            })),
        }
    }
}
