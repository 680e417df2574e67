//! `agentic teams`: List, create, delete and invite.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use serde_json::json;

use crate::app::AppContext;
use crate::application::services::teams;
use crate::domain::teams::TeamView;

/// Teams subcommands.
#[derive(Subcommand)]
pub enum TeamsCommand {
    /// List teams
    List {
        /// mine, joined or all
        #[arg(long, default_value = "mine")]
        view: TeamView,
    },
    /// Create a team
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a team you own
    Delete {
        /// Team ID
        id: i64,
    },
    /// Invite a member by email
    Invite {
        /// Team ID
        id: i64,
        email: String,
    },
}

/// Run a teams subcommand.
///
/// # Errors
///
/// Returns an error when not logged in, when the stored profile has no user
/// id, or when a request fails.
pub async fn run(app: &AppContext, cmd: TeamsCommand) -> Result<ExitCode> {
    match cmd {
        TeamsCommand::List { view } => {
            let listing = teams::list_teams(&app.api, &app.session, view).await?;
            app.renderer().render_teams(&listing)?;
        }
        TeamsCommand::Create { name, description } => {
            let team = teams::create_team(&app.api, &app.session, &name, &description).await?;
            app.renderer().render_team_created(&team)?;
        }
        TeamsCommand::Delete { id } => {
            if !app.confirm(&format!("Delete team {id}? This cannot be undone."), false)? {
                app.renderer()
                    .done("Cancelled", json!({ "cancelled": true, "team_id": id }))?;
                return Ok(ExitCode::SUCCESS);
            }
            teams::delete_team(&app.api, &app.session, id).await?;
            app.renderer()
                .done(&format!("Team {id} deleted"), json!({ "team_id": id }))?;
        }
        TeamsCommand::Invite { id, email } => {
            teams::invite_member(&app.api, &app.session, id, &email).await?;
            app.renderer().done(
                &format!("Invitation sent to {}", email.trim()),
                json!({ "team_id": id, "email": email.trim() }),
            )?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
