//! Key names of the durable local key-value store.

/// Bearer credential issued by `POST /api/v1/auth/login`.
/// Value: JSON string.
pub const TOKEN: &str = "token";

/// Signed-in user profile.
/// Value: JSON-serialized `User`.
pub const USER: &str = "user";

/// Agents created in demo mode, in creation order.
/// Value: JSON array of `DemoAgent`.
/// Cleared on logout.
pub const DEMO_AGENTS: &str = "demo_agents";

/// Display preference. Opaque to this client.
pub const THEME: &str = "theme";

/// Keys removed by logout.
pub const SESSION_KEYS: &[&str] = &[TOKEN, USER, DEMO_AGENTS];
