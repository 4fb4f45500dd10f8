use serde::Serialize;

use crate::model::{AppConfig, GiftSuggestion, GroundingSource, SuggestionBatch};
use crate::ops::search_link::search_url;
use crate::ops::session::NO_RESULTS_MESSAGE;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SuggestionJson {
    pub name: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub search_url: String,
}

#[derive(Serialize)]
pub struct SourceJson {
    pub title: String,
    pub uri: String,
}

#[derive(Serialize)]
pub struct BatchJson {
    pub suggestions: Vec<SuggestionJson>,
    pub sources: Vec<SourceJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Effective config, with the API key replaced by whether it is present
#[derive(Serialize)]
pub struct ConfigJson<'a> {
    pub path: String,
    #[serde(flatten)]
    pub config: &'a AppConfig,
    pub api_key_set: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn suggestion_to_json(suggestion: &GiftSuggestion) -> SuggestionJson {
    SuggestionJson {
        name: suggestion.name.clone(),
        reason: suggestion.reason.clone(),
        price: suggestion.price.clone(),
        search_url: search_url(&suggestion.name),
    }
}

pub fn source_to_json(source: &GroundingSource) -> SourceJson {
    SourceJson {
        title: source.title.clone(),
        uri: source.uri.clone(),
    }
}

/// The no-results notice is attached only when nothing at all came back
pub fn batch_to_json(batch: &SuggestionBatch) -> BatchJson {
    BatchJson {
        suggestions: batch.suggestions.iter().map(suggestion_to_json).collect(),
        sources: batch.sources.iter().map(source_to_json).collect(),
        notice: batch.is_empty().then(|| NO_RESULTS_MESSAGE.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Numbered suggestion block: name and price, then the reason indented
pub fn format_suggestion(index: usize, suggestion: &GiftSuggestion) -> Vec<String> {
    let price = suggestion
        .price
        .as_deref()
        .map(|p| format!(" ({})", p))
        .unwrap_or_default();
    vec![
        format!("{}. {}{}", index + 1, suggestion.name, price),
        format!("   {}", suggestion.reason),
        format!("   Find it: {}", search_url(&suggestion.name)),
    ]
}

/// Text output of `suggest`. Sources are printed even when no idea could
/// be read from the answer.
pub fn format_batch(batch: &SuggestionBatch) -> Vec<String> {
    if batch.is_empty() {
        return vec![NO_RESULTS_MESSAGE.to_string()];
    }
    let mut lines = Vec::new();
    if batch.suggestions.is_empty() {
        lines.push("No gift ideas could be read from the answer.".to_string());
    }
    for (i, suggestion) in batch.suggestions.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(format_suggestion(i, suggestion));
    }
    if !batch.sources.is_empty() {
        lines.push(String::new());
        lines.push("Sources:".to_string());
        for source in &batch.sources {
            let title = if source.title.is_empty() {
                &source.uri
            } else {
                &source.title
            };
            lines.push(format!("  - {} <{}>", title, source.uri));
        }
    }
    lines
}

pub fn format_config(path: &str, config: &AppConfig, api_key_set: bool) -> Vec<String> {
    let api = &config.api;
    let key_state = if api_key_set { "set" } else { "not set" };
    vec![
        format!("config file:        {}", path),
        format!("api.model:          {}", api.model),
        format!("api.base_url:       {}", api.base_url),
        format!("api.temperature:    {}", api.temperature),
        format!("api.api_key_env:    {} ({})", api.api_key_env, key_state),
        format!("api.timeout_secs:   {}", api.timeout_secs),
        format!("api.grounding:      {}", api.grounding),
        format!("ui.show_key_hints:  {}", config.ui.show_key_hints),
        format!("log.level:          {}", config.log.level),
    ]
}
