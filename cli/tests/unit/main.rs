//! Unit tests for the agentic CLI
//!
//! These tests use mocked ports and run fast without network access.

mod agent_builder;
mod auth_service;
mod catalog_service;
mod config_service;
mod execution_session;
mod teams_service;
