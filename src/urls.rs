//! Normalization and validation of user-supplied addresses.
//!
//! Callers are expected to run [`normalize_url`] first and then
//! [`is_valid_url`]; the scrape pipeline rejects anything that still
//! fails validation before touching the network.

use url::Url;

/// Prepend `https://` when the `http://`/`https://` prefix is missing.
///
/// Deliberately minimal: no trailing-slash canonicalization, no host
/// lowercasing. The input is otherwise returned unchanged.
pub fn normalize_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}

/// Strict parse check. Only absolute http/https URLs with a host pass.
/// Never panics.
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}
