//! Unit tests for agent creation and the demo-mode fallback.

#![allow(clippy::unwrap_used)]

use agentic_cli::application::services::builder::{
    CreateOutcome, FallbackReason, create_agent, demo_agents, recent_demo_agents,
};
use agentic_cli::domain::catalog::seed_agents;
use agentic_cli::domain::error::{ApiError, BuilderError};
use agentic_common::AgentDraft;

use crate::helpers::{MemoryStore, MockApi, RecordingReporter, anonymous, draft, signed_in};

#[tokio::test(start_paused = true)]
async fn test_anonymous_create_is_stored_locally() {
    let api = MockApi::default();
    let store = MemoryStore::default();
    let reporter = RecordingReporter::default();

    let outcome = create_agent(&api, &store, &anonymous(), draft("Status Reporter"), &reporter)
        .await
        .unwrap();

    assert!(outcome.is_demo());
    assert!(matches!(
        outcome,
        CreateOutcome::Demo {
            reason: FallbackReason::NotAuthenticated,
            ..
        }
    ));
    assert_eq!(api.count("create_agent"), 0);

    let stored = demo_agents(&store).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(&stored[0].id, outcome.id());
    assert_eq!(stored[0].draft.name, "Status Reporter");
    assert!(stored[0].id.as_str().parse::<i64>().is_ok(), "millisecond timestamp id");
}

#[tokio::test(start_paused = true)]
async fn test_backend_failure_falls_back_to_demo() {
    let api = MockApi {
        create: Err(ApiError::Status {
            status: 500,
            body: "Internal Server Error".into(),
        }),
        ..MockApi::default()
    };
    let store = MemoryStore::default();
    let reporter = RecordingReporter::default();

    let outcome = create_agent(&api, &store, &signed_in(), draft("Digest"), &reporter)
        .await
        .unwrap();

    match outcome {
        CreateOutcome::Demo {
            reason: FallbackReason::Backend(e),
            ..
        } => assert!(e.to_string().contains("Internal Server Error")),
        other => panic!("expected demo outcome, got {other:?}"),
    }
    assert_eq!(api.count("create_agent Digest"), 1);
    assert_eq!(demo_agents(&store).unwrap().len(), 1);
    let messages = reporter.messages.lock().unwrap();
    assert!(messages.iter().any(|m| m.contains("demo mode")));
}

#[tokio::test(start_paused = true)]
async fn test_demo_path_waits_processing_delay() {
    let api = MockApi::default();
    let store = MemoryStore::default();
    let reporter = RecordingReporter::default();
    let started = tokio::time::Instant::now();

    create_agent(&api, &store, &anonymous(), draft("Slow"), &reporter)
        .await
        .unwrap();

    assert!(started.elapsed() >= agentic_cli::application::services::builder::DEMO_PROCESSING_DELAY);
}

#[tokio::test]
async fn test_remote_create_does_not_touch_local_store() {
    let mut created = seed_agents().remove(0);
    created.name = "Remote One".into();
    let api = MockApi {
        create: Ok(created),
        ..MockApi::default()
    };
    let store = MemoryStore::default();

    let outcome = create_agent(
        &api,
        &store,
        &signed_in(),
        draft("Remote One"),
        &RecordingReporter::default(),
    )
    .await
    .unwrap();

    assert!(!outcome.is_demo());
    assert!(matches!(outcome, CreateOutcome::Remote(ref a) if a.name == "Remote One"));
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_before_any_call() {
    let api = MockApi::default();
    let store = MemoryStore::default();
    let blank = AgentDraft {
        description: "no name".into(),
        ..AgentDraft::default()
    };

    let err = create_agent(&api, &store, &signed_in(), blank, &RecordingReporter::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuilderError>(),
        Some(&BuilderError::MissingField("name"))
    );
    assert!(api.calls().is_empty());
    assert!(store.keys().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_demo_ids_are_unique_and_recent_is_newest_first() {
    let api = MockApi::default();
    let store = MemoryStore::default();
    let reporter = RecordingReporter::default();

    for name in ["First", "Second", "Third", "Fourth"] {
        create_agent(&api, &store, &anonymous(), draft(name), &reporter)
            .await
            .unwrap();
    }

    let all = demo_agents(&store).unwrap();
    let mut ids: Vec<_> = all.iter().map(|d| d.id.as_str().to_string()).collect();
    ids.dedup();
    assert_eq!(ids.len(), 4);

    let recent = recent_demo_agents(&store, 3).unwrap();
    let names: Vec<_> = recent.iter().map(|d| d.draft.name.as_str()).collect();
    assert_eq!(names, ["Fourth", "Third", "Second"]);
}
