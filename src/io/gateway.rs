use async_trait::async_trait;

use crate::model::{RecipientProfile, SuggestionBatch};

/// Why a suggestion request failed. The Display text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestError {
    #[error("API key is not configured. Please set the {var} environment variable.")]
    MissingApiKey { var: String },
    #[error("The API key is invalid. Please check your configuration.")]
    InvalidApiKey,
    #[error("Failed to get gift suggestions: {0}")]
    Upstream(String),
}

/// Something that can turn a recipient profile into gift ideas
#[async_trait]
pub trait SuggestionGateway: Send + Sync {
    async fn suggest(&self, profile: &RecipientProfile) -> Result<SuggestionBatch, SuggestError>;
}
