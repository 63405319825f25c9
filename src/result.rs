use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of one scrape call. Constructed exactly once and never
/// mutated afterwards; `word_count` is always derived from `text` at
/// construction so the two cannot drift apart.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub url: String,
    pub title: String,
    pub description: String,
    pub text: String,
    pub word_count: usize,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Successful extraction. `text` must be non-empty; the orchestrator
    /// routes empty cleanings through [`ExtractionResult::failure`].
    pub fn success(
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        text: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let word_count = count_words(&text);
        Self {
            url: url.into(),
            title: title.into(),
            description: description.into(),
            text,
            word_count,
            timestamp,
            success: true,
            error: None,
        }
    }

    /// Degraded result for any failure path: empty content fields, the
    /// failure reason in `error`.
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            text: String::new(),
            word_count: 0,
            timestamp: Utc::now(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Whitespace-delimited non-empty token count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
