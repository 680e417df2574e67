//! Agent builder form: validation, icon and color palettes, templates.

use agentic_common::{AgentDraft, Category};

use crate::domain::error::BuilderError;

/// Icons offered by the builder.
pub const ICONS: &[&str] = &[
    "🤖", "📝", "💻", "🎯", "📊", "🚀", "💰", "📱", "⚡", "✨", "🔍", "🎨", "📈", "🔧", "🛡️", "💬",
    "🎓", "🔄", "📋", "🔔",
];

/// Card gradients offered by the builder, as `(value, label)`.
pub const COLORS: &[(&str, &str)] = &[
    ("from-blue-500 to-purple-500", "Blue-Purple"),
    ("from-green-500 to-emerald-500", "Green-Emerald"),
    ("from-pink-500 to-rose-500", "Pink-Rose"),
    ("from-orange-500 to-amber-500", "Orange-Amber"),
    ("from-indigo-500 to-blue-500", "Indigo-Blue"),
    ("from-purple-500 to-pink-500", "Purple-Pink"),
    ("from-red-500 to-orange-500", "Red-Orange"),
    ("from-teal-500 to-cyan-500", "Teal-Cyan"),
];

/// Check the required fields of a draft.
///
/// # Errors
///
/// Returns [`BuilderError::MissingField`] when the name or description is
/// blank after trimming.
pub fn validate_draft(draft: &AgentDraft) -> Result<(), BuilderError> {
    if draft.name.trim().is_empty() {
        return Err(BuilderError::MissingField("name"));
    }
    if draft.description.trim().is_empty() {
        return Err(BuilderError::MissingField("description"));
    }
    Ok(())
}

/// Prefilled drafts the builder can start from.
#[must_use]
pub fn templates() -> Vec<AgentDraft> {
    vec![
        AgentDraft {
            name: "Social Media Manager".into(),
            description: "Creates and schedules social media posts".into(),
            category: Category::Marketing,
            icon: "📱".into(),
            color: "from-pink-500 to-rose-500".into(),
            instructions: "Create engaging social media posts for various platforms. Use trending \
                           hashtags, emojis, and include calls to action."
                .into(),
            example_input: "Create a Twitter thread about AI ethics".into(),
            example_output: "🧵 AI Ethics: Why It Matters\n\n\
                             1. Transparency in AI decision-making builds trust\n\
                             2. Bias in training data leads to unfair outcomes\n\
                             3. Privacy concerns with data collection\n\n\
                             #AIethics #ResponsibleAI #MachineLearning"
                .into(),
        },
        AgentDraft {
            name: "Code Reviewer".into(),
            description: "Reviews code and suggests improvements".into(),
            category: Category::Development,
            icon: "🔍".into(),
            color: "from-blue-500 to-cyan-500".into(),
            instructions: "Review code for bugs, security issues, and best practices. Provide \
                           constructive feedback and improvement suggestions."
                .into(),
            example_input: "Review this Python function for calculating fibonacci".into(),
            example_output: "✅ Good: Function works correctly\n\
                             ⚠️ Improvement: Add input validation\n\
                             🐛 Bug: No handling for negative numbers\n\
                             💡 Suggestion: Use memoization for better performance"
                .into(),
        },
        AgentDraft {
            name: "Meeting Summarizer".into(),
            description: "Summarizes meeting notes and action items".into(),
            category: Category::Productivity,
            icon: "📋".into(),
            color: "from-green-500 to-emerald-500".into(),
            instructions: "Extract key decisions, action items, and deadlines from meeting \
                           transcripts. Organize information clearly."
                .into(),
            example_input: "Summarize this team meeting about Q2 goals".into(),
            example_output: "📋 Q2 Meeting Summary\n\n\
                             Key Decisions:\n\
                             - Launch new feature by April 15\n\
                             - Increase marketing budget by 20%\n\n\
                             Action Items:\n\
                             - John: Complete UX designs by March 30\n\
                             - Sarah: Prepare marketing plan by April 5\n\n\
                             Next Meeting: April 10, 2 PM"
                .into(),
        },
    ]
}

/// Look up a template by name, ignoring ASCII case.
///
/// # Errors
///
/// Returns [`BuilderError::UnknownTemplate`] listing the available names.
pub fn template(name: &str) -> Result<AgentDraft, BuilderError> {
    let all = templates();
    let available = all
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    all.iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .cloned()
        .ok_or_else(|| BuilderError::UnknownTemplate {
            name: name.to_string(),
            available,
        })
}
