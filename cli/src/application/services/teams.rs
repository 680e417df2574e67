//! Application service: team management.

use agentic_common::Team;
use anyhow::{Context, Result};

use crate::application::ports::TeamsApi;
use crate::domain::session::SessionContext;
use crate::domain::teams::{self, TeamTotals, TeamView};

/// Teams visible to the signed-in user under one view.
#[derive(Debug, Clone)]
pub struct TeamListing {
    pub user_id: i64,
    pub view: TeamView,
    pub teams: Vec<Team>,
    pub totals: TeamTotals,
}

/// List teams and split them by owner.
///
/// # Errors
///
/// Returns an error if the session has no token, no stored user id, or the
/// request fails.
pub async fn list_teams(
    api: &impl TeamsApi,
    session: &SessionContext,
    view: TeamView,
) -> Result<TeamListing> {
    let token = session.require_token()?;
    let user_id = session.user_id()?;
    let all = api.list_teams(token).await.context("cannot load teams")?;
    let totals = teams::totals(&all, user_id);
    let teams = teams::select(&all, user_id, view).into_iter().cloned().collect();
    Ok(TeamListing {
        user_id,
        view,
        teams,
        totals,
    })
}

/// # Errors
///
/// Returns an error if the name is blank, the session has no token, or
/// the request fails.
pub async fn create_team(
    api: &impl TeamsApi,
    session: &SessionContext,
    name: &str,
    description: &str,
) -> Result<Team> {
    let name = name.trim();
    anyhow::ensure!(!name.is_empty(), "Team name is required.");
    let token = session.require_token()?;
    api.create_team(token, name, description.trim())
        .await
        .with_context(|| format!("cannot create team '{name}'"))
}

/// Delete a team owned by the signed-in user.
///
/// Ownership is checked against the listed teams before the request is
/// sent; the backend enforces it again.
///
/// # Errors
///
/// Returns an error if the team is unknown, not owned by the user, or the
/// request fails.
pub async fn delete_team(api: &impl TeamsApi, session: &SessionContext, team_id: i64) -> Result<()> {
    let token = session.require_token()?;
    let user_id = session.user_id()?;
    let all = api.list_teams(token).await.context("cannot load teams")?;
    let team = all
        .iter()
        .find(|t| t.id == team_id)
        .with_context(|| format!("Team {team_id} not found."))?;
    anyhow::ensure!(
        teams::is_owner(team, user_id),
        "Only the team owner can delete '{}'.",
        team.name
    );
    api.delete_team(token, team_id)
        .await
        .with_context(|| format!("cannot delete team {team_id}"))
}

/// # Errors
///
/// Returns an error if the email is blank, the session has no token, or
/// the request fails.
pub async fn invite_member(
    api: &impl TeamsApi,
    session: &SessionContext,
    team_id: i64,
    email: &str,
) -> Result<()> {
    let email = email.trim();
    anyhow::ensure!(email.contains('@'), "Invalid email address: {email}");
    let token = session.require_token()?;
    api.invite_member(token, team_id, email)
        .await
        .with_context(|| format!("cannot invite {email} to team {team_id}"))
}
