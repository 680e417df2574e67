pub mod account;
pub mod agent;
pub mod analytics;
pub mod execution;
pub mod local_keys;

pub use account::{LoginResponse, Team, User};
pub use agent::{Agent, AgentDraft, AgentId, Category, DemoAgent, ParseCategoryError, Price};
pub use analytics::{
    AnalyticsSummary, CategoryShare, DailyCount, DashboardAnalytics, TopAgent, UsageAnalytics,
};
pub use execution::{ExecutionRecord, ExecutionStatus, TransitionError};
