//! `agentic profile`: The locally stored user profile.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::auth::{self, ProfileUpdate};

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the stored profile
    Show,
    /// Change profile fields (stored locally only)
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
}

impl From<UpdateArgs> for ProfileUpdate {
    fn from(args: UpdateArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            company: args.company,
            role: args.role,
            bio: args.bio,
        }
    }
}

/// Run a profile subcommand.
///
/// # Errors
///
/// Returns an error when no profile is stored or nothing was given to
/// change.
pub fn run(app: &AppContext, cmd: ProfileCommand) -> Result<ExitCode> {
    match cmd {
        ProfileCommand::Show => {
            app.renderer().render_user(app.session.require_user()?)?;
        }
        ProfileCommand::Update(args) => {
            let update = ProfileUpdate::from(args);
            anyhow::ensure!(
                !update.is_empty(),
                "Nothing to update. Pass at least one of --name, --email, --company, --role or --bio."
            );
            let user = auth::update_profile(&app.local, update)?;
            if !app.is_json() {
                app.output.success("Profile updated");
            }
            app.renderer().render_user(&user)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
