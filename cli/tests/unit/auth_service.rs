//! Unit tests for login, logout and the stored profile.

#![allow(clippy::unwrap_used)]

use agentic_cli::application::ports::LocalStore;
use agentic_cli::application::services::auth::{
    ProfileUpdate, load_session, login, logout, update_profile,
};
use agentic_cli::application::services::builder::create_agent;
use agentic_cli::domain::error::{AccountError, ApiError};
use agentic_common::{User, local_keys};

use crate::helpers::{MemoryStore, MockApi, RecordingReporter, TOKEN, anonymous, draft};

#[tokio::test]
async fn test_login_stores_token_and_user() {
    let api = MockApi::default();
    let store = MemoryStore::default();

    let user = login(&api, &store, "ada@example.com", "secret").await.unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(store.get::<String>(local_keys::TOKEN).unwrap().as_deref(), Some(TOKEN));
    assert_eq!(store.get::<User>(local_keys::USER).unwrap(), Some(user));

    let session = load_session(&store).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.user_id().unwrap(), 1);
}

#[tokio::test]
async fn test_rejected_login_stores_nothing() {
    let api = MockApi {
        login: Err(ApiError::Status {
            status: 401,
            body: "Invalid credentials".into(),
        }),
        ..MockApi::default()
    };
    let store = MemoryStore::default();

    let err = login(&api, &store, "ada@example.com", "wrong").await.unwrap_err();

    assert!(format!("{err:#}").contains("Invalid credentials"));
    assert!(store.keys().is_empty());
}

#[test]
fn test_empty_store_loads_anonymous_session() {
    let session = load_session(&MemoryStore::default()).unwrap();
    assert!(!session.is_authenticated());
    assert!(session.user.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_logout_clears_session_and_demo_agents() {
    let api = MockApi::default();
    let store = MemoryStore::default();
    login(&api, &store, "ada@example.com", "secret").await.unwrap();
    create_agent(&api, &store, &anonymous(), draft("Kept until logout"), &RecordingReporter::default())
        .await
        .unwrap();
    store.set(local_keys::THEME, &"dark").unwrap();

    logout(&store).unwrap();

    assert_eq!(store.keys(), vec![local_keys::THEME.to_string()]);
    assert!(!load_session(&store).unwrap().is_authenticated());
}

#[test]
fn test_update_profile_merges_fields() {
    let store = MemoryStore::default();
    let mut stored = crate::helpers::user(Some(7));
    stored
        .extra
        .insert("plan".into(), serde_json::json!("pro"));
    store.set(local_keys::USER, &stored).unwrap();

    let updated = update_profile(
        &store,
        ProfileUpdate {
            company: Some("Acme".into()),
            bio: Some("Builds agents".into()),
            ..ProfileUpdate::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.company.as_deref(), Some("Acme"));
    assert_eq!(updated.extra.get("plan"), Some(&serde_json::json!("pro")));
    assert_eq!(store.get::<User>(local_keys::USER).unwrap(), Some(updated));
}

#[test]
fn test_update_profile_without_user_is_no_profile() {
    let err = update_profile(
        &MemoryStore::default(),
        ProfileUpdate {
            name: Some("X".into()),
            ..ProfileUpdate::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err.downcast_ref::<AccountError>(), Some(AccountError::NoProfile)));
}

#[test]
fn test_profile_update_is_empty() {
    assert!(ProfileUpdate::default().is_empty());
    assert!(
        !ProfileUpdate {
            role: Some("Engineer".into()),
            ..ProfileUpdate::default()
        }
        .is_empty()
    );
}
