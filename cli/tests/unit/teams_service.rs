//! Unit tests for the teams service.

#![allow(clippy::unwrap_used)]

use agentic_cli::application::services::teams::{
    create_team, delete_team, invite_member, list_teams,
};
use agentic_cli::domain::error::AccountError;
use agentic_cli::domain::session::SessionContext;
use agentic_cli::domain::teams::TeamView;

use crate::helpers::{MockApi, TOKEN, anonymous, signed_in, team, user};

fn api_with_teams() -> MockApi {
    MockApi {
        teams: Ok(vec![team(10, 1), team(11, 2), team(12, 1), team(13, 3)]),
        ..MockApi::default()
    }
}

#[tokio::test]
async fn test_mine_and_joined_split_on_session_user() {
    let api = api_with_teams();
    let session = signed_in();

    let mine = list_teams(&api, &session, TeamView::Mine).await.unwrap();
    let ids: Vec<_> = mine.teams.iter().map(|t| t.id).collect();
    assert_eq!(ids, [10, 12]);
    assert_eq!(mine.user_id, 1);

    let joined = list_teams(&api, &session, TeamView::Joined).await.unwrap();
    let ids: Vec<_> = joined.teams.iter().map(|t| t.id).collect();
    assert_eq!(ids, [11, 13]);

    let all = list_teams(&api, &session, TeamView::All).await.unwrap();
    assert_eq!(all.teams.len(), 4);
    assert_eq!(all.totals.owned, 2);
    assert_eq!(all.totals.joined, 2);
    assert_eq!(all.totals, mine.totals, "totals ignore the view");
}

#[tokio::test]
async fn test_list_refused_without_user_id() {
    let api = api_with_teams();
    let session = SessionContext::new(Some(TOKEN.into()), Some(user(None)));

    let err = list_teams(&api, &session, TeamView::Mine).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AccountError>(),
        Some(AccountError::MissingUserId)
    ));
    assert_eq!(api.count("list_teams"), 0);
}

#[tokio::test]
async fn test_list_refused_without_profile() {
    let api = api_with_teams();
    let session = SessionContext::new(Some(TOKEN.into()), None);
    let err = list_teams(&api, &session, TeamView::All).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AccountError>(),
        Some(AccountError::NoProfile)
    ));
}

#[tokio::test]
async fn test_anonymous_cannot_list() {
    let api = api_with_teams();
    assert!(list_teams(&api, &anonymous(), TeamView::Mine).await.is_err());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_create_requires_name() {
    let api = MockApi::default();
    assert!(create_team(&api, &signed_in(), "   ", "desc").await.is_err());
    assert_eq!(api.count("create_team"), 0);

    let team = create_team(&api, &signed_in(), " Growth ", " Marketing squad ")
        .await
        .unwrap();
    assert_eq!(team.name, "Growth");
    assert_eq!(team.description, "Marketing squad");
}

#[tokio::test]
async fn test_delete_only_owned_team() {
    let api = api_with_teams();
    let session = signed_in();

    let err = delete_team(&api, &session, 11).await.unwrap_err();
    assert!(err.to_string().contains("Only the team owner"));
    assert_eq!(api.count("delete_team"), 0);

    assert!(delete_team(&api, &session, 99).await.is_err());

    delete_team(&api, &session, 12).await.unwrap();
    assert_eq!(api.count(&format!("delete_team 12 {TOKEN}")), 1);
}

#[tokio::test]
async fn test_invite_validates_email() {
    let api = MockApi::default();
    assert!(invite_member(&api, &signed_in(), 10, "not-an-email").await.is_err());
    assert_eq!(api.count("invite_member"), 0);

    invite_member(&api, &signed_in(), 10, " bob@example.com ").await.unwrap();
    assert_eq!(api.count("invite_member 10 bob@example.com"), 1);
}
