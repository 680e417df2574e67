use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Agent identifier.
///
/// The backend emits numeric ids, demo agents use millisecond timestamps
/// rendered as strings. Both normalise to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for AgentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_or_number(deserializer).map(Self)
    }
}

/// Accepts either a JSON string or a JSON integer and yields a string.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
    })
}

// ── Category ──────────────────────────────────────────────────────────────────

/// The fixed set of agent categories offered by the builder and marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Marketing,
    Development,
    Support,
    Productivity,
    Analytics,
    Sales,
    Design,
    Finance,
    Legal,
    #[serde(rename = "HR")]
    Hr,
}

impl Category {
    /// Every category, in builder order.
    pub const ALL: [Category; 10] = [
        Category::Marketing,
        Category::Development,
        Category::Support,
        Category::Productivity,
        Category::Analytics,
        Category::Sales,
        Category::Design,
        Category::Finance,
        Category::Legal,
        Category::Hr,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Marketing => "Marketing",
            Category::Development => "Development",
            Category::Support => "Support",
            Category::Productivity => "Productivity",
            Category::Analytics => "Analytics",
            Category::Sales => "Sales",
            Category::Design => "Design",
            Category::Finance => "Finance",
            Category::Legal => "Legal",
            Category::Hr => "HR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category name. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

// ── Price ─────────────────────────────────────────────────────────────────────

/// Price tier: the literal `"Free"` or any monetary label such as `"$19/mo"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Price {
    #[default]
    Free,
    Paid(String),
}

impl Price {
    #[must_use]
    pub fn is_free(&self) -> bool {
        matches!(self, Price::Free)
    }
}

impl From<String> for Price {
    fn from(s: String) -> Self {
        if s == "Free" { Price::Free } else { Price::Paid(s) }
    }
}

impl From<&str> for Price {
    fn from(s: &str) -> Self {
        Price::from(s.to_string())
    }
}

impl From<Price> for String {
    fn from(p: Price) -> Self {
        match p {
            Price::Free => "Free".to_string(),
            Price::Paid(label) => label,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Free => f.write_str("Free"),
            Price::Paid(label) => f.write_str(label),
        }
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_ICON: &str = "🤖";
pub const DEFAULT_COLOR: &str = "from-blue-500 to-purple-500";

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A configured AI task definition as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, alias = "example_input", skip_serializing_if = "Option::is_none")]
    pub example_input: Option<String>,
    #[serde(default, alias = "example_output", skip_serializing_if = "Option::is_none")]
    pub example_output: Option<String>,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub rating: f32,
    #[serde(default, alias = "reviews", alias = "review_count")]
    pub review_count: u32,
}

/// Builder form payload, posted as-is to `POST /api/v1/agents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub example_input: String,
    #[serde(default)]
    pub example_output: String,
}

impl Default for AgentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: Category::Marketing,
            icon: default_icon(),
            color: default_color(),
            instructions: String::new(),
            example_input: String::new(),
            example_output: String::new(),
        }
    }
}

/// An agent persisted locally because the backend could not create it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoAgent {
    pub id: AgentId,
    #[serde(flatten)]
    pub draft: AgentDraft,
    pub created_at: DateTime<Utc>,
}

impl DemoAgent {
    /// View the demo agent as a catalog agent (free, unrated).
    #[must_use]
    pub fn to_agent(&self) -> Agent {
        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Agent {
            id: self.id.clone(),
            name: self.draft.name.clone(),
            description: self.draft.description.clone(),
            category: self.draft.category,
            icon: self.draft.icon.clone(),
            color: self.draft.color.clone(),
            instructions: optional(&self.draft.instructions),
            example_input: optional(&self.draft.example_input),
            example_output: optional(&self.draft.example_output),
            price: Price::Free,
            rating: 0.0,
            review_count: 0,
        }
    }
}
