//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Browse, build and run no-code AI agents
#[derive(Parser)]
#[command(
    name = "agentic",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Platform backend URL
    #[arg(long, global = true, env = "AGENTIC_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse, run and build agents
    #[command(subcommand)]
    Agents(commands::agents::AgentsCommand),

    /// Show execution history
    History(commands::history::HistoryArgs),

    /// Show execution analytics
    #[command(subcommand)]
    Analytics(commands::analytics::AnalyticsCommand),

    /// Sign in to the platform
    Login(commands::auth::LoginArgs),

    /// Sign out and clear local data
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show or edit the stored profile
    #[command(subcommand)]
    Profile(commands::profile::ProfileCommand),

    /// Manage teams
    #[command(subcommand)]
    Teams(commands::teams::TeamsCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the application context cannot be built or the
    /// command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            api_url,
            yes,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            api_url,
            yes,
        };
        let app = AppContext::new(&flags)?;

        match command {
            Command::Agents(cmd) => commands::agents::run(&app, cmd).await,
            Command::History(args) => commands::history::run(&app, &args).await,
            Command::Analytics(cmd) => commands::analytics::run(&app, cmd).await,
            Command::Login(args) => commands::auth::login(&app, args).await,
            Command::Logout => commands::auth::logout(&app),
            Command::Whoami => commands::auth::whoami(&app),
            Command::Profile(cmd) => commands::profile::run(&app, cmd),
            Command::Teams(cmd) => commands::teams::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
