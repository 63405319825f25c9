//! Tag stripping and whitespace normalization.
//!
//! Pass order matters: script/style/noscript/iframe bodies and the
//! document head must be removed before the generic tag strip, or their
//! contents would survive as visible text.

use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::entities::decode_entities;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());
static NOSCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<noscript\b[^>]*>.*?</noscript>").unwrap());
static IFRAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe>").unwrap());
static HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?</head>").unwrap());

// Unclosed script/style blocks would otherwise leak their bodies past
// the generic tag strip; truncating to the end of input is the
// best-effort answer for malformed markup.
static UNCLOSED_SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*$").unwrap());
static UNCLOSED_STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*$").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());
static TRIPLE_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {3,}").unwrap());

/// Strip a raw HTML document down to clean plain text: block removal,
/// tag strip, entity decode, whitespace normalization, in that order.
pub fn clean(html: &str) -> String {
    let stripped = SCRIPT_RE.replace_all(html, " ");
    let stripped = UNCLOSED_SCRIPT_RE.replace_all(&stripped, " ");
    let stripped = STYLE_RE.replace_all(&stripped, " ");
    let stripped = UNCLOSED_STYLE_RE.replace_all(&stripped, " ");
    let stripped = NOSCRIPT_RE.replace_all(&stripped, " ");
    let stripped = IFRAME_RE.replace_all(&stripped, " ");
    let stripped = HEAD_RE.replace_all(&stripped, " ");
    let stripped = TAG_RE.replace_all(&stripped, " ");
    let decoded = decode_entities(&stripped);
    normalize_whitespace(&decoded)
}

/// Collapse space/tab runs to one space and blank-line runs to a single
/// break, drop lines that are empty after trimming, trim the ends, and
/// tighten any remaining 3+ space runs to two.
pub fn normalize_whitespace(text: &str) -> String {
    let spaced = SPACE_RUN_RE.replace_all(text, " ");
    let condensed = BLANK_LINES_RE.replace_all(&spaced, "\n");
    let joined = condensed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    TRIPLE_SPACE_RE.replace_all(&joined, "  ").trim().to_string()
}
