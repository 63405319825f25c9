//! Title and description extraction.

use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::cleaner;

/// Sentinel when no title can be found.
pub const UNTITLED: &str = "Bez naslova";
/// Sentinel when no meta description is present.
pub const NO_DESCRIPTION: &str = "Bez opisa";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());

static META_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*?name\s*=\s*["']description["'][^>]*?content\s*=\s*["']([^"']*)["']"#)
        .unwrap()
});
// content attribute written before name
static META_DESC_REVERSED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*?content\s*=\s*["']([^"']*)["'][^>]*?name\s*=\s*["']description["']"#)
        .unwrap()
});

/// First `<title>`, else first `<h1>`, else the untitled sentinel. The
/// matched fragment goes through the same strip/decode/normalize passes
/// as body text.
pub fn extract_title(html: &str) -> String {
    for re in [&TITLE_RE, &H1_RE] {
        if let Some(caps) = re.captures(html) {
            let title = cleaner::clean(&caps[1]);
            if !title.is_empty() {
                return title;
            }
        }
    }
    UNTITLED.to_string()
}

/// `<meta name="description" content="...">` in either attribute order,
/// else the no-description sentinel.
pub fn extract_description(html: &str) -> String {
    for re in [&META_DESC_RE, &META_DESC_REVERSED_RE] {
        if let Some(caps) = re.captures(html) {
            let description = cleaner::clean(&caps[1]);
            if !description.is_empty() {
                return description;
            }
        }
    }
    NO_DESCRIPTION.to_string()
}
