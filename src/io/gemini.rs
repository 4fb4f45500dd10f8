use std::time::Duration;

use async_trait::async_trait;
use chrono::Datelike;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use crate::io::gateway::{SuggestError, SuggestionGateway};
use crate::model::{ApiConfig, GroundingSource, RecipientProfile, SuggestionBatch};
use crate::ops::prompt::build_prompt;
use crate::parse::parse_suggestions;

/// Where the API key comes from. Environment keys are read on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    Env(String),
    Fixed(String),
}

impl ApiKeySource {
    pub fn resolve(&self) -> Result<String, SuggestError> {
        match self {
            ApiKeySource::Env(var) => std::env::var(var)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| SuggestError::MissingApiKey { var: var.clone() }),
            ApiKeySource::Fixed(key) => Ok(key.clone()),
        }
    }
}

/// Google Gemini `generateContent` client with Google Search grounding
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    grounding: bool,
    api_key: ApiKeySource,
}

impl GeminiGateway {
    pub fn from_config(api: &ApiConfig) -> Result<Self, SuggestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| SuggestError::Upstream(format!("could not build HTTP client: {}", e)))?;
        Ok(GeminiGateway {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            model: api.model.clone(),
            temperature: api.temperature,
            grounding: api.grounding,
            api_key: ApiKeySource::Env(api.api_key_env.clone()),
        })
    }

    pub fn with_api_key(mut self, source: ApiKeySource) -> Self {
        self.api_key = source;
        self
    }

    pub fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": { "temperature": self.temperature },
        });
        if self.grounding {
            body["tools"] = json!([{ "google_search": {} }]);
        }
        body
    }
}

#[async_trait]
impl SuggestionGateway for GeminiGateway {
    async fn suggest(&self, profile: &RecipientProfile) -> Result<SuggestionBatch, SuggestError> {
        let api_key = self.api_key.resolve()?;
        let current_year = chrono::Local::now().year();
        let prompt = build_prompt(profile, current_year);
        let body = self.request_body(&prompt);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        info!(
            model = %self.model,
            grounding = self.grounding,
            characteristics = profile.characteristics.len(),
            "Requesting gift suggestions"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini HTTP request failed: {}", e);
                SuggestError::Upstream(e.to_string())
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            error!("Failed to read Gemini response body: {}", e);
            SuggestError::Upstream(e.to_string())
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error: {}", truncate_body(&text));
            return Err(classify_failure(status.as_u16(), &text));
        }

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse Gemini response JSON: {}", e);
            SuggestError::Upstream(format!("malformed response from the model service ({})", e))
        })?;

        let batch = parse_response(&data);
        info!(
            suggestions = batch.suggestions.len(),
            sources = batch.sources.len(),
            "Gift suggestions received"
        );
        Ok(batch)
    }
}

/// Map an unsuccessful HTTP response onto a user-facing error
pub fn classify_failure(status: u16, body: &str) -> SuggestError {
    if matches!(status, 401 | 403)
        || body.contains("API_KEY_INVALID")
        || body.contains("API key not valid")
    {
        return SuggestError::InvalidApiKey;
    }
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate_body(body));
    if message.is_empty() {
        SuggestError::Upstream(format!("HTTP {}", status))
    } else {
        SuggestError::Upstream(format!("HTTP {}: {}", status, message))
    }
}

/// Pull the answer text and grounding citations out of a generateContent response
pub fn parse_response(data: &Value) -> SuggestionBatch {
    let Some(candidate) = data["candidates"].get(0) else {
        warn!(
            block_reason = data["promptFeedback"]["blockReason"].as_str().unwrap_or(""),
            "Gemini returned no candidates"
        );
        return SuggestionBatch::default();
    };

    let mut text = String::new();
    if let Some(parts) = candidate["content"]["parts"].as_array() {
        for part in parts {
            let is_thought = part.get("thought").and_then(Value::as_bool).unwrap_or(false);
            if is_thought {
                continue;
            }
            if let Some(t) = part.get("text").and_then(Value::as_str) {
                text.push_str(t);
            }
        }
    }
    if text.trim().is_empty() {
        warn!(
            finish_reason = candidate["finishReason"].as_str().unwrap_or("unknown"),
            "Gemini returned an empty answer"
        );
    }
    debug!(text_len = text.len(), "Gemini answer text");

    let sources = candidate["groundingMetadata"]["groundingChunks"]
        .as_array()
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| {
                    let web = chunk.get("web")?;
                    let uri = web.get("uri")?.as_str()?;
                    let title = web
                        .get("title")
                        .and_then(Value::as_str)
                        .filter(|t| !t.is_empty())
                        .unwrap_or(uri);
                    Some(GroundingSource {
                        uri: uri.to_string(),
                        title: title.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    SuggestionBatch {
        suggestions: parse_suggestions(&text),
        sources,
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > 300 {
        let head: String = trimmed.chars().take(300).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}
