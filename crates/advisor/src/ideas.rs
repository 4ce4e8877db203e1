//! Brainstormed video ideas for a library entry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Titles, hooks and a thumbnail concept suggested by the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdeas {
    pub titles: Vec<String>,
    pub hooks: Vec<String>,
    pub thumbnail_idea: String,
}

impl ContentIdeas {
    /// Shape-check a generated object; `None` when any field is unusable
    pub fn from_value(value: &Value) -> Option<Self> {
        let ideas: ContentIdeas = serde_json::from_value(value.clone()).ok()?;
        if ideas.titles.is_empty() && ideas.hooks.is_empty() && ideas.thumbnail_idea.trim().is_empty() {
            return None;
        }
        Some(ideas)
    }
}
