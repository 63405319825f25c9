use crate::fetcher::{
    decode::decode_body,
    errors::FetchError,
    types::{FetchPolicy, RawDocument},
};
use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{info, instrument, warn};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const MIN_BODY_CHARS: usize = 100;

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "sr-RS,sr;q=0.9,en;q=0.8";

// Accept-Encoding and Connection are supplied by reqwest itself
// (gzip/brotli/deflate decompression is transparent).
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = header::HeaderMap::new();
            headers.insert(header::ACCEPT, ACCEPT.parse().unwrap());
            headers.insert(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE.parse().unwrap());
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetch one URL under the policy's time and retry budget.
///
/// Every transient failure is retried with a linear backoff sleep of
/// `retry_backoff_base * attempt`; only the final attempt's error is
/// surfaced to the caller.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_with_retries(url: &Url, policy: &FetchPolicy) -> Result<RawDocument, FetchError> {
    if let Some(token) = &policy.cancel
        && token.is_cancelled()
    {
        return Err(FetchError::Cancelled);
    }

    let mut attempt = 1;
    loop {
        match fetch_once(url, policy).await {
            Ok(document) => {
                info!(attempt, chars = document.body.len(), "fetched {}", document.url_final);
                return Ok(document);
            }
            Err(err) => {
                warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    "fetch attempt failed: {err}"
                );
                if attempt >= policy.max_retries || !err.should_retry() {
                    return Err(err);
                }
                let delay = policy.backoff_delay(attempt);
                if let Some(token) = &policy.cancel {
                    tokio::select! {
                        _ = token.cancelled() => return Err(FetchError::Cancelled),
                        _ = sleep(delay) => {}
                    }
                } else {
                    sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}

/// One attempt: the whole request, including the body download and
/// decode, races the policy timeout and the optional cancellation token.
async fn fetch_once(url: &Url, policy: &FetchPolicy) -> Result<RawDocument, FetchError> {
    let bounded = timeout(policy.timeout, do_request(url, policy));
    let outcome = if let Some(token) = &policy.cancel {
        tokio::select! {
            _ = token.cancelled() => return Err(FetchError::Cancelled),
            outcome = bounded => outcome,
        }
    } else {
        bounded.await
    };
    match outcome {
        Ok(result) => result,
        Err(_elapsed) => Err(FetchError::Timeout),
    }
}

async fn do_request(url: &Url, policy: &FetchPolicy) -> Result<RawDocument, FetchError> {
    let response = HTTP_CLIENT
        .get(url.clone())
        .header(header::USER_AGENT, &policy.user_agent)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check the advertised length before downloading anything.
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let url_final = response.url().clone();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    // Content-Length may have been absent.
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    let body = decode_body(&content_type, &body_bytes)?;

    // Guards against bot-block pages and blank redirect stubs.
    let chars = body.chars().count();
    if chars < MIN_BODY_CHARS {
        return Err(FetchError::EmptyBody(chars));
    }

    Ok(RawDocument {
        url_final,
        body,
        fetched_at: Utc::now(),
    })
}
