//! The single public entry point composing normalization, fetch, and
//! extraction.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{info, instrument, warn};
use url::Url;

use crate::{
    extractor,
    fetcher::{self, FetchPolicy},
    result::ExtractionResult,
    urls,
};

/// Scrape one URL into an [`ExtractionResult`].
///
/// Never fails and never panics past this boundary: validation, fetch,
/// and extraction failures all fold into a `success == false` result
/// that callers are expected to treat as non-fatal.
#[instrument(skip(policy), fields(url = %url))]
pub async fn scrape_website(url: &str, policy: &FetchPolicy) -> ExtractionResult {
    let normalized = urls::normalize_url(url);
    if !urls::is_valid_url(&normalized) {
        warn!("rejected invalid url");
        return ExtractionResult::failure(normalized, format!("invalid url: {url:?}"));
    }
    let parsed = match Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(err) => {
            return ExtractionResult::failure(normalized, format!("invalid url: {err}"));
        }
    };

    let document = match fetcher::fetch_with_retries(&parsed, policy).await {
        Ok(document) => document,
        Err(err) => return ExtractionResult::failure(normalized, err.to_string()),
    };

    // The extractor is pure regex work and should not be able to panic,
    // but the no-fail contract of this function does not depend on that.
    let page = match catch_unwind(AssertUnwindSafe(|| extractor::extract(&document.body))) {
        Ok(page) => page,
        Err(_) => {
            warn!("extractor panicked");
            return ExtractionResult::failure(normalized, "extraction failed");
        }
    };

    if page.text.is_empty() {
        return ExtractionResult::failure(normalized, "no extractable text in page");
    }

    let result = ExtractionResult::success(
        normalized,
        page.title,
        page.description,
        page.text,
        document.fetched_at,
    );
    info!(words = result.word_count, "scraped {}", result.url);
    result
}
