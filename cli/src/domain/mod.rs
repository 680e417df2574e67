//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `reqwest`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod analytics;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod execution;
pub mod history;
pub mod session;
pub mod teams;

pub use catalog::{CategoryFilter, PriceFilter};
pub use config::{AgenticConfig, ApiConfig, validate_config_key, validate_config_value};
pub use error::{
    AccountError, ApiError, BuilderError, CatalogError, ConfigError, FilterError, SessionError,
};
pub use history::{ExecutionHistory, StatusFilter};
pub use session::SessionContext;
