//! Human-readable terminal renderer.

use std::path::Path;

use agentic_common::{
    Agent, AnalyticsSummary, CategoryShare, DailyCount, DashboardAnalytics, DemoAgent,
    ExecutionRecord, ExecutionStatus, Price, Team, TopAgent, UsageAnalytics, User,
};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize as _;

use crate::application::services::analytics::AnalyticsReport;
use crate::application::services::builder::{CreateOutcome, FallbackReason};
use crate::application::services::catalog::AgentPage;
use crate::application::services::execution::ExecutionOutcome;
use crate::application::services::teams::TeamListing;
use crate::domain::config::AgenticConfig;
use crate::domain::history::{HistoryStats, StatusFilter, time_ago};
use crate::domain::teams::TeamView;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("agentic {version}");
        }
    }

    pub fn render_notice(&self, message: &str) {
        self.ctx.warn(message);
    }

    pub fn render_done(&self, message: &str) {
        self.ctx.success(message);
    }

    /// Render the marketplace grid as a table.
    pub fn render_agents(&self, agents: &[&Agent], total: usize) {
        if agents.is_empty() {
            self.ctx.info("No agents found. Try adjusting your search or filters.");
            return;
        }
        println!();
        for agent in agents {
            println!(
                "  {:<4} {} {:<24} {:<13} {:<8} {}",
                agent.id.as_str().style(self.ctx.styles.dim),
                agent.icon,
                truncate(&agent.name, 24),
                agent.category.as_str(),
                self.price(&agent.price),
                format_rating(agent.rating, agent.review_count),
            );
        }
        println!();
        self.ctx
            .kv("Showing", &format!("{} of {total} agents", agents.len()));
    }

    /// Render an agent's detail page with its recent history.
    pub fn render_agent_page(&self, page: &AgentPage, now: DateTime<Utc>) {
        let agent = &page.agent;
        println!();
        println!(
            "  {} {}",
            agent.icon,
            agent.name.style(self.ctx.styles.header)
        );
        println!("  {}", agent.description);
        println!();
        self.ctx.kv("ID:        ", agent.id.as_str());
        self.ctx.kv("Category:  ", agent.category.as_str());
        self.ctx
            .kv("Price:     ", &self.price(&agent.price).to_string());
        self.ctx.kv(
            "Rating:    ",
            &format_rating(agent.rating, agent.review_count),
        );
        if let Some(instructions) = &agent.instructions {
            println!();
            self.ctx.header("Instructions:");
            println!("  {instructions}");
        }
        if let Some(example) = &agent.example_input {
            println!();
            self.ctx.header("Example input:");
            println!("  {example}");
        }

        println!();
        self.ctx.header("Recent executions:");
        if let Some(e) = &page.history_error {
            self.ctx.warn(&format!("Could not load execution history: {e}"));
        } else if page.history.is_empty() {
            println!("  No execution history yet");
        } else {
            for record in page.history.iter().take(5) {
                self.record_line(record, now);
            }
        }
        println!();
        self.ctx
            .info(&format!("Run it: agentic agents run {} \"<input>\"", agent.id));
    }

    /// Render the output of one execution.
    pub fn render_execution(&self, outcome: &ExecutionOutcome, now: DateTime<Utc>) {
        let record = &outcome.record;
        println!();
        match record.status {
            ExecutionStatus::Success => self.ctx.success(&format!(
                "{} finished in {}",
                record.agent_name,
                format_duration_ms(record.execution_time_ms)
            )),
            _ => self.ctx.error(&format!(
                "{} failed after {}",
                record.agent_name,
                format_duration_ms(record.execution_time_ms)
            )),
        }
        println!();
        for line in record.output.lines() {
            println!("  {line}");
        }
        println!();
        let source = if outcome.history.is_remote() {
            "Recent executions:"
        } else {
            "Recent executions (this session only):"
        };
        self.ctx.header(source);
        for r in outcome.history.records().iter().take(5) {
            self.record_line(r, now);
        }
    }

    /// Render the history page: status tabs with counts, summary cards,
    /// then the records of the selected tab.
    pub fn render_history(
        &self,
        records: &[&ExecutionRecord],
        stats: &HistoryStats,
        status: StatusFilter,
        now: DateTime<Utc>,
    ) {
        if stats.total == 0 {
            self.ctx.info("No executions yet.");
            return;
        }
        println!();
        let tabs: Vec<String> = [
            StatusFilter::All,
            StatusFilter::Only(ExecutionStatus::Success),
            StatusFilter::Only(ExecutionStatus::Error),
            StatusFilter::Only(ExecutionStatus::Pending),
        ]
        .into_iter()
        .map(|tab| {
            let label = format!("{} ({})", status_label(tab), stats.count(tab));
            if tab == status {
                label.style(self.ctx.styles.header).to_string()
            } else {
                label.style(self.ctx.styles.dim).to_string()
            }
        })
        .collect();
        println!("  {}", tabs.join("   "));
        println!();
        self.ctx.kv("Successful:", &stats.success.to_string());
        self.ctx.kv("Failed:    ", &stats.error.to_string());
        self.ctx.kv(
            "Avg time:  ",
            &format_duration_ms(stats.avg_execution_time_ms),
        );

        if records.is_empty() {
            println!();
            self.ctx.info("No executions match this filter.");
            return;
        }
        println!();
        for record in records {
            self.record_line(record, now);
            println!(
                "        {} {}",
                "in: ".style(self.ctx.styles.dim),
                truncate(&record.input, 70)
            );
            if !record.output.is_empty() {
                println!(
                    "        {} {}",
                    "out:".style(self.ctx.styles.dim),
                    truncate(record.output.lines().next().unwrap_or_default(), 70)
                );
            }
        }
        println!();
    }

    fn record_line(&self, record: &ExecutionRecord, now: DateTime<Utc>) {
        let style = match record.status {
            ExecutionStatus::Success => self.ctx.styles.success,
            ExecutionStatus::Pending => self.ctx.styles.warning,
            ExecutionStatus::Error => self.ctx.styles.error,
        };
        println!(
            "  {:<8} {} {:<24} {:>8}  {}",
            record.status.as_str().style(style),
            record.agent_icon,
            truncate(&display_name(record), 24),
            format_duration_ms(record.execution_time_ms),
            time_ago(record.created_at, now).style(self.ctx.styles.dim),
        );
    }

    /// Render the headline counters and the weekly chart.
    pub fn render_summary(&self, report: &AnalyticsReport) {
        println!();
        self.ctx.header("Overview");
        self.summary_lines(&report.summary);
        println!();
        self.ctx.header("This week");
        self.weekly_chart(&report.weekly);
        println!();
    }

    fn summary_lines(&self, s: &AnalyticsSummary) {
        if let Some(total) = s.total_agents {
            self.ctx.kv("Agents:            ", &total.to_string());
        }
        self.ctx
            .kv("Total executions:  ", &s.total_executions.to_string());
        self.ctx.kv("Today:             ", &s.today_executions.to_string());
        self.ctx
            .kv("Last 7 days:       ", &s.weekly_executions.to_string());
        self.ctx
            .kv("Automation rate:   ", &format!("{:.1}%", s.automation_rate));
        self.ctx.kv(
            "Time saved:        ",
            &format!("{:.1} h ({} min)", s.time_saved_hours, s.time_saved_minutes),
        );
        self.ctx.kv(
            "Avg execution:     ",
            &format!("{:.0} ms", s.avg_execution_time_ms),
        );
    }

    fn weekly_chart(&self, days: &[DailyCount]) {
        let max = days.iter().map(|d| d.count).max().unwrap_or(0);
        for day in days {
            println!(
                "  {} {:<20} {}",
                day.day.style(self.ctx.styles.dim),
                bar(day.count, max, 20),
                day.count
            );
        }
    }

    pub fn render_top_agents(&self, top: &[TopAgent]) {
        if top.is_empty() {
            self.ctx.info("No executions yet.");
            return;
        }
        println!();
        for (rank, agent) in top.iter().enumerate() {
            println!(
                "  {:>2}. {} {:<24} {:>5}  {:>5.1}%",
                rank + 1,
                agent.icon,
                truncate(&agent.name, 24),
                agent.count,
                agent.percentage
            );
        }
        println!();
    }

    pub fn render_category_shares(&self, shares: &[CategoryShare]) {
        if shares.is_empty() {
            self.ctx.info("No agents in the catalog.");
            return;
        }
        println!();
        for share in shares {
            println!(
                "  {:<13} {:>3} agents  {:>5} runs  {:>5.1}%",
                share.name, share.agent_count, share.execution_count, share.percentage
            );
        }
        println!();
    }

    pub fn render_dashboard(&self, dash: &DashboardAnalytics, now: DateTime<Utc>) {
        println!();
        self.ctx.header("Overview");
        self.summary_lines(&dash.summary);
        if !dash.trends.weekly.is_empty() {
            println!();
            self.ctx.header("This week");
            self.weekly_chart(&dash.trends.weekly);
        }
        if !dash.trends.top_agents.is_empty() {
            println!();
            self.ctx.header("Top agents");
            self.render_top_agents(&dash.trends.top_agents);
        }
        if !dash.recent_activity.is_empty() {
            self.ctx.header("Recent activity");
            for activity in &dash.recent_activity {
                let when = agentic_common::execution::parse_timestamp(&activity.created_at)
                    .map_or_else(|| activity.created_at.clone(), |at| time_ago(at, now));
                println!(
                    "  {} {:<24} {:>8}  {}",
                    activity.agent_icon,
                    truncate(&activity.agent_name, 24),
                    format_duration_ms(activity.execution_time_ms),
                    when.style(self.ctx.styles.dim)
                );
            }
        }
        println!();
    }

    pub fn render_usage(&self, usage: &UsageAnalytics) {
        println!();
        self.ctx.header(&format!(
            "Usage {} to {} ({} days)",
            usage.timeframe.start_date, usage.timeframe.end_date, usage.timeframe.days
        ));
        self.ctx.kv(
            "Executions:     ",
            &usage.summary.total_executions.to_string(),
        );
        self.ctx.kv(
            "Per day:        ",
            &format!("{:.1}", usage.summary.executions_per_day),
        );
        self.ctx.kv(
            "Avg execution:  ",
            &format!("{:.0} ms", usage.summary.avg_execution_time_ms),
        );
        self.ctx.kv(
            "Time saved:     ",
            &format!("{} min", usage.summary.total_time_saved_minutes),
        );
        if !usage.agent_usage.is_empty() {
            println!();
            self.ctx.header("By agent");
            for agent in &usage.agent_usage {
                println!(
                    "  {:<24} {:<13} {:>5} runs  {:>5.1}%",
                    truncate(&agent.name, 24),
                    agent.category,
                    agent.execution_count,
                    agent.percentage
                );
            }
        }
        println!();
    }

    pub fn render_exported(&self, path: &Path) {
        self.ctx
            .success(&format!("Exported analytics to {}", path.display()));
    }

    /// Render the result of `agents create`.
    pub fn render_created(&self, outcome: &CreateOutcome) {
        match outcome {
            CreateOutcome::Remote(agent) => {
                self.ctx.success("Agent created successfully!");
                self.ctx.kv("ID:  ", agent.id.as_str());
            }
            CreateOutcome::Demo { agent, reason } => {
                self.ctx.success("Agent created successfully! (Demo Mode)");
                self.ctx.kv("ID:  ", agent.id.as_str());
                match reason {
                    FallbackReason::NotAuthenticated => {
                        self.ctx.info("Not logged in; the agent is stored on this machine only.");
                    }
                    FallbackReason::Backend(e) => {
                        self.ctx.warn(&format!("Backend unavailable ({e}); stored locally."));
                    }
                }
            }
        }
        self.ctx
            .info(&format!("View it: agentic agents show {}", outcome.id()));
    }

    pub fn render_demo_agents(&self, demos: &[DemoAgent], now: DateTime<Utc>) {
        if demos.is_empty() {
            self.ctx
                .info("You haven't created any agents yet. Start: agentic agents create");
            return;
        }
        println!();
        for demo in demos {
            println!(
                "  {:<14} {} {:<24} {:<13} {}",
                demo.id.as_str().style(self.ctx.styles.dim),
                demo.draft.icon,
                truncate(&demo.draft.name, 24),
                demo.draft.category.as_str(),
                time_ago(demo.created_at, now).style(self.ctx.styles.dim)
            );
        }
        println!();
    }

    pub fn render_category_tabs(&self, tabs: &[String]) {
        for tab in tabs {
            println!("  {tab}");
        }
    }

    pub fn render_user(&self, user: &User) {
        println!();
        println!("  {}", user.name.style(self.ctx.styles.header));
        self.ctx.kv("Email:   ", &user.email);
        if let Some(id) = user.id {
            self.ctx.kv("ID:      ", &id.to_string());
        }
        if let Some(company) = &user.company {
            self.ctx.kv("Company: ", company);
        }
        if let Some(role) = &user.role {
            self.ctx.kv("Role:    ", role);
        }
        if let Some(bio) = &user.bio {
            self.ctx.kv("Bio:     ", bio);
        }
        println!();
    }

    pub fn render_teams(&self, listing: &TeamListing) {
        let t = &listing.totals;
        println!();
        println!(
            "  {}  {}",
            format!("My Teams ({})", t.owned).style(if listing.view == TeamView::Mine {
                self.ctx.styles.header
            } else {
                self.ctx.styles.dim
            }),
            format!("Joined Teams ({})", t.joined).style(if listing.view == TeamView::Joined {
                self.ctx.styles.header
            } else {
                self.ctx.styles.dim
            }),
        );
        println!();
        if listing.teams.is_empty() {
            println!("  No teams yet");
        }
        for team in &listing.teams {
            self.team_line(team, listing.user_id);
        }
        println!();
        self.ctx.kv(
            "Totals:",
            &format!(
                "{} teams, {} members, {} agents",
                t.teams, t.members, t.agents
            ),
        );
    }

    fn team_line(&self, team: &Team, me: i64) {
        let owner = if team.created_by == me {
            "owner".to_string()
        } else {
            team.owner_name.clone().unwrap_or_else(|| "member".into())
        };
        println!(
            "  {:<5} {:<24} {:>3} members {:>3} agents  {}",
            team.id.to_string().style(self.ctx.styles.dim),
            truncate(&team.name, 24),
            team.member_count,
            team.agent_count,
            owner.style(self.ctx.styles.dim)
        );
        if !team.description.is_empty() {
            println!("        {}", truncate(&team.description, 70));
        }
    }

    pub fn render_team_created(&self, team: &Team) {
        self.ctx
            .success(&format!("Team '{}' created (id {})", team.name, team.id));
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &AgenticConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<20} {}", "api.url:", config.api.url);
        println!("  {:<20} {}", "api.timeout_secs:", config.api.timeout_secs);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["AGENTIC_HOME", "AGENTIC_CONFIG", "AGENTIC_API_URL", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    fn price(&self, price: &Price) -> String {
        match price {
            Price::Free => "Free".style(self.ctx.styles.success).to_string(),
            Price::Paid(tag) => tag.style(self.ctx.styles.price).to_string(),
        }
    }
}

// ── Display helpers (used by tests and output layer) ─────────────────────────

fn status_label(tab: StatusFilter) -> &'static str {
    match tab {
        StatusFilter::All => "all",
        StatusFilter::Only(status) => status.as_str(),
    }
}

/// The record's agent name, or `Agent <id>` for agents missing from the catalog.
fn display_name(record: &ExecutionRecord) -> String {
    if record.agent_name.is_empty() {
        format!("Agent {}", record.agent_id)
    } else {
        record.agent_name.clone()
    }
}

/// `★ 4.8 (124)`
#[must_use]
pub fn format_rating(rating: f32, reviews: u32) -> String {
    format!("★ {rating:.1} ({reviews})")
}

/// `850ms`, `1.2s`, `2m 05s`
#[must_use]
pub fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        let tenths = ms / 100;
        format!("{}.{}s", tenths / 10, tenths % 10)
    } else {
        let secs = ms / 1000;
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Horizontal bar proportional to `value / max`.
#[must_use]
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "█".repeat(value * width / max)
}
