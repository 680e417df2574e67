//! Command implementations

pub mod agents;
pub mod analytics;
pub mod auth;
pub mod config;
pub mod history;
pub mod profile;
pub mod teams;
pub mod version;
