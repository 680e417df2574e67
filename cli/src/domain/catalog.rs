//! Catalog search and filtering.
//!
//! Pure functions with no I/O or retained state, cheap enough to call
//! on every keystroke.

use std::str::FromStr;

use agentic_common::{Agent, AgentId, Category, Price};

use crate::domain::error::FilterError;

/// Selector value meaning "no restriction" for category and price.
pub const ALL: &str = "All";

/// Category selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, agent: &Agent) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => agent.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>()
            .map(CategoryFilter::Only)
            .map_err(|_| FilterError::UnknownCategory {
                value: s.to_string(),
                valid: std::iter::once(ALL)
                    .chain(Category::ALL.iter().map(|c| c.as_str()))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Price tier selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFilter {
    #[default]
    All,
    Free,
    Paid,
}

impl PriceFilter {
    #[must_use]
    pub fn matches(self, price: &Price) -> bool {
        match self {
            PriceFilter::All => true,
            PriceFilter::Free => price.is_free(),
            PriceFilter::Paid => !price.is_free(),
        }
    }
}

impl FromStr for PriceFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(PriceFilter::All),
            "Free" => Ok(PriceFilter::Free),
            "Paid" => Ok(PriceFilter::Paid),
            other => Err(FilterError::UnknownPrice(other.to_string())),
        }
    }
}

/// Narrow `agents` by free-text query, category and price tier.
///
/// The query is a case-insensitive substring match against the name or the
/// description; an empty query matches everything. All predicates are
/// ANDed and the input order is preserved.
#[must_use]
pub fn filter<'a>(
    agents: &'a [Agent],
    query: &str,
    category: CategoryFilter,
    price: PriceFilter,
) -> Vec<&'a Agent> {
    let needle = query.to_lowercase();
    agents
        .iter()
        .filter(|agent| {
            matches_text(agent, &needle) && category.matches(agent) && price.matches(&agent.price)
        })
        .collect()
}

fn matches_text(agent: &Agent, needle: &str) -> bool {
    needle.is_empty()
        || agent.name.to_lowercase().contains(needle)
        || agent.description.to_lowercase().contains(needle)
}

/// Category tabs: `All` followed by the categories present, first-seen order.
#[must_use]
pub fn category_tabs(agents: &[Agent]) -> Vec<String> {
    let mut tabs = vec![ALL.to_string()];
    for agent in agents {
        let name = agent.category.as_str();
        if !tabs.iter().any(|t| t == name) {
            tabs.push(name.to_string());
        }
    }
    tabs
}

/// Built-in marketplace catalog used when running offline.
#[must_use]
pub fn seed_agents() -> Vec<Agent> {
    let seed = |id: &str,
                name: &str,
                description: &str,
                category: Category,
                icon: &str,
                color: &str,
                price: &str,
                rating: f32,
                review_count: u32| Agent {
        id: AgentId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        category,
        icon: icon.to_string(),
        color: color.to_string(),
        instructions: None,
        example_input: None,
        example_output: None,
        price: Price::from(price),
        rating,
        review_count,
    };
    vec![
        seed(
            "1",
            "Marketing Copywriter",
            "Creates compelling marketing copy for ads, emails, and social media",
            Category::Marketing,
            "📝",
            "from-pink-500 to-rose-500",
            "Free",
            4.8,
            124,
        ),
        seed(
            "2",
            "Code Assistant",
            "Helps write, debug, and optimize code in multiple programming languages",
            Category::Development,
            "💻",
            "from-blue-500 to-cyan-500",
            "$19/mo",
            4.9,
            89,
        ),
        seed(
            "3",
            "Customer Support",
            "Automates customer inquiries and provides 24/7 support",
            Category::Support,
            "🎯",
            "from-green-500 to-emerald-500",
            "$29/mo",
            4.7,
            203,
        ),
        seed(
            "4",
            "Content Summarizer",
            "Summarizes long articles, reports, and documents into key points",
            Category::Productivity,
            "📊",
            "from-purple-500 to-violet-500",
            "Free",
            4.6,
            56,
        ),
        seed(
            "5",
            "SEO Optimizer",
            "Analyzes and optimizes content for search engine rankings",
            Category::Marketing,
            "🚀",
            "from-orange-500 to-amber-500",
            "$15/mo",
            4.5,
            78,
        ),
        seed(
            "6",
            "Data Analyst",
            "Analyzes datasets and provides insights and visualizations",
            Category::Analytics,
            "📈",
            "from-indigo-500 to-blue-500",
            "$25/mo",
            4.8,
            45,
        ),
        seed(
            "7",
            "Social Media Manager",
            "Creates and schedules social media posts across platforms",
            Category::Marketing,
            "📱",
            "from-blue-500 to-teal-500",
            "$22/mo",
            4.4,
            92,
        ),
        seed(
            "8",
            "Legal Assistant",
            "Drafts legal documents and provides legal research assistance",
            Category::Legal,
            "⚖️",
            "from-gray-500 to-gray-700",
            "$39/mo",
            4.7,
            34,
        ),
        seed(
            "9",
            "Financial Advisor",
            "Analyzes financial data and provides investment recommendations",
            Category::Finance,
            "💰",
            "from-green-500 to-lime-500",
            "$45/mo",
            4.9,
            67,
        ),
    ]
}

// ── Unit tests ───────────────────────────────────────────────────────────────
