use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to each suggestion when it is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionId(Uuid);

impl SuggestionId {
    pub fn new() -> Self {
        SuggestionId(Uuid::new_v4())
    }
}

impl Default for SuggestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// One gift idea returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftSuggestion {
    pub id: SuggestionId,
    pub name: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl GiftSuggestion {
    pub fn new(name: impl Into<String>, reason: impl Into<String>, price: Option<String>) -> Self {
        GiftSuggestion {
            id: SuggestionId::new(),
            name: name.into(),
            reason: reason.into(),
            price,
        }
    }
}

/// A web citation that grounded the model's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// Everything one request produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionBatch {
    pub suggestions: Vec<GiftSuggestion>,
    pub sources: Vec<GroundingSource>,
}

impl SuggestionBatch {
    /// No suggestions and no sources: the "nothing found" outcome
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty() && self.sources.is_empty()
    }
}
