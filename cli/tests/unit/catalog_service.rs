//! Unit tests for the catalog store and the agent page loader.

#![allow(clippy::unwrap_used)]

use agentic_cli::application::services::catalog::{CatalogStore, load_agent_page};
use agentic_cli::domain::catalog::{CategoryFilter, PriceFilter, seed_agents};
use agentic_cli::domain::error::{ApiError, CatalogError};
use agentic_common::{AgentId, DemoAgent, ExecutionStatus};
use chrono::Utc;

use crate::helpers::{
    MockApi, anonymous, backend_row, draft, network, not_found, record, signed_in,
};

#[tokio::test]
async fn test_load_replaces_contents_on_success() {
    let api = MockApi::default();
    let mut store = CatalogStore::new();
    assert!(store.is_empty());

    let count = store.load(&api).await.unwrap();

    assert_eq!(count, seed_agents().len());
    assert_eq!(store.len(), count);
    assert_eq!(api.count("list_agents"), 1);
}

#[tokio::test]
async fn test_load_failure_keeps_previous_contents() {
    let api = MockApi {
        agents: Err(network()),
        ..MockApi::default()
    };
    let mut store = CatalogStore::seeded();
    let before = store.len();

    let err = store.load(&api).await.unwrap_err();

    assert!(matches!(err, CatalogError::LoadFailed(_)));
    assert!(err.to_string().starts_with("Could not load agents"));
    assert_eq!(store.len(), before);
}

#[tokio::test]
async fn test_load_failure_on_first_load_leaves_store_empty() {
    let api = MockApi {
        agents: Err(ApiError::Timeout),
        ..MockApi::default()
    };
    let mut store = CatalogStore::new();
    assert!(store.load(&api).await.is_err());
    assert!(store.is_empty());
    assert!(store.search("", CategoryFilter::All, PriceFilter::All).is_empty());
}

#[test]
fn test_get_by_id_unknown_is_not_found() {
    let store = CatalogStore::seeded();
    let err = store.get_by_id(&AgentId::new("404")).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(id) if id.as_str() == "404"));
}

#[test]
fn test_include_demo_agents_skips_existing_ids() {
    let mut store = CatalogStore::seeded();
    let before = store.len();
    let demo = DemoAgent {
        id: AgentId::new("1700000000000"),
        draft: draft("Status Reporter"),
        created_at: Utc::now(),
    };
    store.include_demo_agents(&[demo.clone(), demo]);
    assert_eq!(store.len(), before + 1);
    assert_eq!(
        store.get_by_id(&AgentId::new("1700000000000")).unwrap().name,
        "Status Reporter"
    );
}

#[test]
fn test_categories_start_with_all_in_first_seen_order() {
    let store = CatalogStore::seeded();
    let tabs = store.categories();
    assert_eq!(tabs[0], "All");
    assert_eq!(tabs[1], "Marketing");
    assert_eq!(tabs[2], "Development");
    let mut unique = tabs.clone();
    unique.dedup();
    assert_eq!(unique.len(), tabs.len());
}

#[tokio::test]
async fn test_agent_page_fetches_agent_and_history() {
    let agents = seed_agents();
    let api = MockApi {
        history: Ok(vec![record(&agents[0], ExecutionStatus::Success, Utc::now())]),
        ..MockApi::default()
    };
    let session = signed_in();

    let page = load_agent_page(&api, &session, &AgentId::new("1"), &CatalogStore::new())
        .await
        .unwrap();

    assert_eq!(page.agent.name, "Marketing Copywriter");
    assert_eq!(page.history.len(), 1);
    assert!(page.history_error.is_none());
    assert_eq!(api.count("get_agent 1"), 1);
    assert_eq!(api.count("list_history 1"), 1);
}

#[tokio::test]
async fn test_agent_page_names_backend_history_rows() {
    let agent = seed_agents().into_iter().find(|a| a.id.as_str() == "2").unwrap();
    let api = MockApi {
        history: Ok(vec![backend_row(&agent, ExecutionStatus::Error, Utc::now())]),
        ..MockApi::default()
    };

    let page = load_agent_page(&api, &signed_in(), &AgentId::new("2"), &CatalogStore::new())
        .await
        .unwrap();

    assert_eq!(page.history[0].agent_name, "Code Assistant");
    assert_eq!(page.history[0].agent_icon, agent.icon);
}

#[tokio::test]
async fn test_agent_page_anonymous_skips_history() {
    let api = MockApi::default();
    let page = load_agent_page(&api, &anonymous(), &AgentId::new("2"), &CatalogStore::new())
        .await
        .unwrap();
    assert!(page.history.is_empty());
    assert_eq!(api.count("list_history"), 0);
}

#[tokio::test]
async fn test_agent_page_history_failure_is_reported_not_fatal() {
    let api = MockApi {
        history: Err(ApiError::Status {
            status: 500,
            body: "db down".into(),
        }),
        ..MockApi::default()
    };
    let page = load_agent_page(&api, &signed_in(), &AgentId::new("3"), &CatalogStore::new())
        .await
        .unwrap();
    assert_eq!(page.agent.name, "Customer Support");
    assert!(page.history.is_empty());
    assert!(page.history_error.is_some());
}

#[tokio::test]
async fn test_agent_page_falls_back_to_local_catalog() {
    let api = MockApi {
        agent: Some(Err(network())),
        ..MockApi::default()
    };
    let page = load_agent_page(&api, &anonymous(), &AgentId::new("4"), &CatalogStore::seeded())
        .await
        .unwrap();
    assert_eq!(page.agent.name, "Content Summarizer");
}

#[tokio::test]
async fn test_agent_page_unknown_agent_is_not_found() {
    let api = MockApi {
        agent: Some(Err(not_found())),
        ..MockApi::default()
    };
    let err = load_agent_page(&api, &anonymous(), &AgentId::new("99"), &CatalogStore::seeded())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_agent_page_backend_failure_without_fallback_is_load_failed() {
    let api = MockApi {
        agent: Some(Err(network())),
        ..MockApi::default()
    };
    let err = load_agent_page(&api, &anonymous(), &AgentId::new("99"), &CatalogStore::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::LoadFailed(_)));
}
