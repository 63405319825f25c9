use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SiteText/1.0)";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(1000);

/// Per-call fetch configuration. Immutable from the pipeline's point of
/// view; clone and adjust with the builder methods instead.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Budget for a single attempt, including the body download.
    pub timeout: Duration,
    /// Total attempt budget. 3 means at most three requests go out.
    pub max_retries: u32,
    pub user_agent: String,
    /// Linear backoff base: the sleep after attempt `n` is `base * n`.
    pub retry_backoff_base: Duration,
    /// Caller-driven cancellation. When triggered, the in-flight attempt
    /// is abandoned and no further attempts are made.
    pub cancel: Option<CancellationToken>,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry_backoff_base: DEFAULT_BACKOFF_BASE,
            cancel: None,
        }
    }
}

impl FetchPolicy {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.retry_backoff_base = base;
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Sleep inserted after failed attempt `attempt` (1-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_backoff_base * attempt
    }
}

/// Decoded response body plus its originating URL. Ephemeral: lives
/// only inside the fetch call stack, never persisted.
#[derive(Debug)]
pub struct RawDocument {
    pub url_final: Url,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}
