//! Team list views.

use std::str::FromStr;

use agentic_common::Team;
use serde::Serialize;

/// Which side of the owned/joined split to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamView {
    #[default]
    Mine,
    Joined,
    All,
}

impl FromStr for TeamView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mine" => Ok(TeamView::Mine),
            "joined" => Ok(TeamView::Joined),
            "all" => Ok(TeamView::All),
            other => Err(format!("unknown team view '{other}' (mine, joined, all)")),
        }
    }
}

/// Counters shown under the team list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamTotals {
    pub teams: usize,
    pub owned: usize,
    pub joined: usize,
    pub members: u64,
    pub agents: u64,
}

/// Teams visible under `view` for the user `me`, input order preserved.
#[must_use]
pub fn select(teams: &[Team], me: i64, view: TeamView) -> Vec<&Team> {
    teams
        .iter()
        .filter(|t| match view {
            TeamView::Mine => t.created_by == me,
            TeamView::Joined => t.created_by != me,
            TeamView::All => true,
        })
        .collect()
}

/// Whether `me` may delete `team`.
#[must_use]
pub fn is_owner(team: &Team, me: i64) -> bool {
    team.created_by == me
}

#[must_use]
pub fn totals(teams: &[Team], me: i64) -> TeamTotals {
    let owned = teams.iter().filter(|t| is_owner(t, me)).count();
    TeamTotals {
        teams: teams.len(),
        owned,
        joined: teams.len() - owned,
        members: teams.iter().map(|t| u64::from(t.member_count)).sum(),
        agents: teams.iter().map(|t| u64::from(t.agent_count)).sum(),
    }
}
