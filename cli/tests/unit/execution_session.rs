//! Unit tests for the execution session manager.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use agentic_cli::application::services::catalog::CatalogStore;
use agentic_cli::application::services::execution::{ExecutionSession, fetch_history};
use agentic_cli::domain::error::{ApiError, SessionError};
use agentic_cli::domain::execution::NO_RESPONSE;
use agentic_common::{AgentId, ExecutionStatus};
use chrono::Utc;
use serde_json::json;

use crate::helpers::{MockApi, TOKEN, anonymous, backend_row, network, record, signed_in};

fn id(raw: &str) -> AgentId {
    AgentId::new(raw)
}

// ── Validation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_blank_input_creates_no_record() {
    let api = MockApi::default();
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);

    let err = exec
        .execute(&CatalogStore::seeded(), &id("1"), "   \n")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::EmptyInput));
    assert!(exec.records().is_empty());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_anonymous_execution_never_reaches_backend() {
    let api = MockApi::default();
    let session = anonymous();
    let exec = ExecutionSession::new(&api, &session);

    let err = exec
        .execute(&CatalogStore::seeded(), &id("1"), "Write a tagline")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::NotAuthenticated));
    assert!(err.to_string().contains("agentic login"));
    assert!(exec.records().is_empty());
    assert_eq!(api.count("execute_agent"), 0);
}

#[tokio::test]
async fn test_unknown_agent_creates_no_record() {
    let api = MockApi::default();
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);

    let err = exec
        .execute(&CatalogStore::seeded(), &id("77"), "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::AgentNotFound(_)));
    assert!(exec.records().is_empty());
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_success_uses_response_field() {
    let api = MockApi::default();
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);

    let outcome = exec
        .execute(&CatalogStore::seeded(), &id("1"), "Write a tagline")
        .await
        .unwrap();

    let record = &outcome.record;
    assert_eq!(record.status, ExecutionStatus::Success);
    assert_eq!(record.output, "Here is your copy.");
    assert_eq!(record.agent_name, "Marketing Copywriter");
    assert_eq!(record.input, "Write a tagline");
    assert_eq!(api.count(&format!("execute_agent 1 Write a tagline {TOKEN}")), 1);

    let records = exec.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ExecutionStatus::Success);
}

#[tokio::test]
async fn test_output_field_used_when_response_absent() {
    let api = MockApi {
        execute: Ok(json!({ "output": "from output" })),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);
    let outcome = exec
        .execute(&CatalogStore::seeded(), &id("2"), "fix this")
        .await
        .unwrap();
    assert_eq!(outcome.record.output, "from output");
}

#[tokio::test]
async fn test_empty_body_records_placeholder_output() {
    let api = MockApi {
        execute: Ok(json!({})),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);
    let outcome = exec
        .execute(&CatalogStore::seeded(), &id("2"), "fix this")
        .await
        .unwrap();
    assert_eq!(outcome.record.status, ExecutionStatus::Success);
    assert_eq!(outcome.record.output, NO_RESPONSE);
}

#[tokio::test]
async fn test_backend_failure_produces_error_record() {
    let api = MockApi {
        execute: Err(ApiError::Status {
            status: 500,
            body: "model overloaded".into(),
        }),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);

    let outcome = exec
        .execute(&CatalogStore::seeded(), &id("3"), "hello")
        .await
        .unwrap();

    assert_eq!(outcome.record.status, ExecutionStatus::Error);
    assert!(outcome.record.output.starts_with("Execution failed: "));
    assert!(outcome.record.output.contains("model overloaded"));
    assert_eq!(exec.records()[0].status, ExecutionStatus::Error);
}

#[tokio::test]
async fn test_network_failure_appends_exactly_one_error_record() {
    let api = MockApi {
        execute: Err(network()),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);
    assert_eq!(exec.records().len(), 0);

    let outcome = exec
        .execute(&CatalogStore::seeded(), &id("4"), "summarize this")
        .await
        .unwrap();

    let records = exec.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, outcome.record.id);
    assert_eq!(records[0].status, ExecutionStatus::Error);
    assert_eq!(records[0].input, "summarize this");
    assert!(records[0].output.starts_with("Execution failed: "));
    assert!(records[0].output.contains("connection refused"));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_produces_error_record() {
    let api = MockApi {
        execute_delay: Some(Duration::from_secs(60)),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session).with_timeout(Duration::from_secs(5));

    let outcome = exec
        .execute(&CatalogStore::seeded(), &id("1"), "slow")
        .await
        .unwrap();

    assert_eq!(outcome.record.status, ExecutionStatus::Error);
    assert!(outcome.record.output.contains("timed out"));
    assert_eq!(api.count("execute_agent"), 1);
}

// ── History refresh ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_prefers_remote_history() {
    let catalog = CatalogStore::seeded();
    let agent = catalog.get_by_id(&id("1")).unwrap().clone();
    let api = MockApi {
        history: Ok(vec![
            record(&agent, ExecutionStatus::Success, Utc::now()),
            record(&agent, ExecutionStatus::Error, Utc::now()),
        ]),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);

    let outcome = exec.execute(&catalog, &id("1"), "again").await.unwrap();

    assert!(outcome.history.is_remote());
    assert_eq!(outcome.history.records().len(), 2);
    assert_eq!(api.count("list_history 1"), 1);
}

#[tokio::test]
async fn test_remote_history_rows_get_catalog_name_and_icon() {
    let catalog = CatalogStore::seeded();
    let agent = catalog.get_by_id(&id("1")).unwrap().clone();
    let api = MockApi {
        history: Ok(vec![backend_row(&agent, ExecutionStatus::Success, Utc::now())]),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);

    let outcome = exec.execute(&catalog, &id("1"), "again").await.unwrap();

    let row = &outcome.history.records()[0];
    assert_eq!(row.agent_name, agent.name);
    assert_eq!(row.agent_icon, agent.icon);
}

#[tokio::test]
async fn test_refresh_failure_falls_back_to_local_history() {
    let api = MockApi {
        history: Err(network()),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);
    let catalog = CatalogStore::seeded();

    exec.execute(&catalog, &id("1"), "first").await.unwrap();
    exec.execute(&catalog, &id("2"), "other agent").await.unwrap();
    let outcome = exec.execute(&catalog, &id("1"), "second").await.unwrap();

    assert!(!outcome.history.is_remote());
    let local = outcome.history.records();
    assert_eq!(local.len(), 2, "only agent 1 records");
    assert_eq!(local[0].input, "second", "most recent first");
    assert_eq!(outcome.record.status, ExecutionStatus::Success);
}

// ── Reentrancy ───────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_second_run_of_same_agent_is_rejected_while_submitting() {
    let api = MockApi {
        execute_delay: Some(Duration::from_millis(500)),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);
    let catalog = CatalogStore::seeded();

    let (id_one_a, id_one_b) = (id("1"), id("1"));
    let (first, second) = tokio::join!(
        exec.execute(&catalog, &id_one_a, "one"),
        exec.execute(&catalog, &id_one_b, "two"),
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(SessionError::ExecutionInFlight(_))));
    assert_eq!(exec.records().len(), 1);
    assert_eq!(api.count("execute_agent"), 1);

    // The guard is released once the first run finishes.
    assert!(exec.execute(&catalog, &id("1"), "three").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_different_agents_run_concurrently() {
    let api = MockApi {
        execute_delay: Some(Duration::from_millis(500)),
        ..MockApi::default()
    };
    let session = signed_in();
    let exec = ExecutionSession::new(&api, &session);
    let catalog = CatalogStore::seeded();

    let (id_one, id_two) = (id("1"), id("2"));
    let (a, b) = tokio::join!(
        exec.execute(&catalog, &id_one, "one"),
        exec.execute(&catalog, &id_two, "two"),
    );

    assert!(a.is_ok() && b.is_ok());
    let records = exec.records();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].id, records[1].id);
    assert!(records.iter().all(|r| r.status.is_terminal()));
}

// ── History page ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_history_requires_token() {
    let api = MockApi::default();
    assert!(fetch_history(&api, &anonymous(), None).await.is_err());
    assert_eq!(api.count("list_history"), 0);

    fetch_history(&api, &signed_in(), Some(&id("5"))).await.unwrap();
    assert_eq!(api.count("list_history 5"), 1);
}
