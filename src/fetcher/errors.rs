use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("http error: {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body empty or too short ({0} chars)")]
    EmptyBody(usize),

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("charset error: {0}")]
    Charset(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("cancelled by caller")]
    Cancelled,
}

impl FetchError {
    /// Whether another attempt could plausibly succeed. Every transient
    /// condition is retried within the budget, including HTTP error
    /// statuses; only conditions that cannot change between attempts
    /// are terminal.
    pub fn should_retry(&self) -> bool {
        !matches!(
            self,
            Self::InvalidUrl(_) | Self::Cancelled | Self::BodyTooLarge(_)
        )
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            // DNS, connect, TLS and body-read failures
            Self::Network(err.to_string())
        }
    }
}
