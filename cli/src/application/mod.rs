//! Application layer: port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` and `agentic_common`, never on
//! `crate::infra`, `crate::commands`, or `crate::output`.

pub mod ports;
pub mod services;

pub use ports::{
    AgentApi, AnalyticsApi, AuthApi, CatalogApi, ConfigStore, ExecutionApi, LocalStore,
    ProgressReporter, TeamsApi,
};
