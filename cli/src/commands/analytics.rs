//! `agentic analytics`: Execution statistics.
//!
//! `summary`, `top` and `categories` aggregate the execution history
//! locally; `dashboard`, `usage` and `export` show what the backend computed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::analytics::{self, AnalyticsReport};
use crate::application::services::catalog::CatalogStore;
use crate::domain::analytics::{ExportFormat, Timeframe};
use crate::domain::history;
use crate::infra::fs;
use crate::output::progress;

const TOP_AGENTS: usize = 5;

/// Analytics subcommands.
#[derive(Subcommand)]
pub enum AnalyticsCommand {
    /// Totals, success rate, time saved and the weekly trend
    Summary,
    /// Most executed agents
    Top {
        #[arg(short = 'n', long, default_value_t = TOP_AGENTS)]
        limit: usize,
    },
    /// Executions per category
    Categories,
    /// Dashboard figures computed by the backend
    Dashboard,
    /// Usage over a timeframe
    Usage {
        /// 7d, 30d or 90d
        #[arg(short, long, default_value = "7d")]
        timeframe: String,
    },
    /// Download an analytics export
    Export {
        /// json or csv
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Directory the file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

/// Run an analytics subcommand.
///
/// # Errors
///
/// Returns an error when not logged in, for an unknown timeframe or format,
/// or when a request fails.
pub async fn run(app: &AppContext, cmd: AnalyticsCommand) -> Result<ExitCode> {
    match cmd {
        AnalyticsCommand::Summary => {
            let report = local_report(app, TOP_AGENTS).await?;
            app.renderer().render_summary(&report)?;
        }
        AnalyticsCommand::Top { limit } => {
            let report = local_report(app, limit).await?;
            app.renderer().render_top_agents(&report.top_agents)?;
        }
        AnalyticsCommand::Categories => {
            let report = local_report(app, TOP_AGENTS).await?;
            app.renderer().render_category_shares(&report.categories)?;
        }
        AnalyticsCommand::Dashboard => {
            let dash = analytics::dashboard(&app.api, &app.session).await?;
            app.renderer().render_dashboard(&dash, Utc::now())?;
        }
        AnalyticsCommand::Usage { timeframe } => {
            let timeframe: Timeframe = timeframe.parse()?;
            let usage = analytics::usage(&app.api, &app.session, timeframe).await?;
            app.renderer().render_usage(&usage)?;
        }
        AnalyticsCommand::Export { format, output_dir } => {
            let format: ExportFormat = format.parse()?;
            let pb = progress::spinner_for(&app.output, "Exporting...");
            let file = analytics::export(&app.api, &app.session, format, Utc::now()).await;
            pb.finish_and_clear();
            let file = file?;
            let path = fs::write_export(&output_dir, &file.filename, file.contents).await?;
            app.renderer().render_exported(&path)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Aggregate the user's history against the current catalog.
///
/// A catalog load failure leaves categories empty but keeps the counters.
async fn local_report(app: &AppContext, top_n: usize) -> Result<AnalyticsReport> {
    let mut records = analytics::fetch_records(&app.api, &app.session).await?;
    let mut catalog = CatalogStore::new();
    if let Err(e) = catalog.load(&app.api).await {
        app.renderer().notice(&e.to_string());
    }
    history::fill_agent_details(&mut records, catalog.agents());
    Ok(analytics::build_report(
        catalog.agents(),
        &records,
        Utc::now(),
        top_n,
    ))
}
