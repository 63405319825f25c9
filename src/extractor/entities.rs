//! HTML entity decoding.
//!
//! Single pass, lossy-safe: anything matching the entity shape that is
//! neither in the named table nor a valid numeric reference passes
//! through unchanged rather than being dropped.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&([a-zA-Z0-9#]+);").unwrap());

/// Named entities the cleaner understands.
const NAMED: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", " "),
    ("copy", "\u{a9}"),
    ("reg", "\u{ae}"),
    ("trade", "\u{2122}"),
    ("euro", "\u{20ac}"),
    ("pound", "\u{a3}"),
    ("cent", "\u{a2}"),
    ("deg", "\u{b0}"),
    ("plusmn", "\u{b1}"),
    ("times", "\u{d7}"),
    ("divide", "\u{f7}"),
    ("frac12", "\u{bd}"),
    ("frac14", "\u{bc}"),
    ("frac34", "\u{be}"),
];

pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            if let Some(digits) = name.strip_prefix('#') {
                return decode_numeric(digits).unwrap_or_else(|| caps[0].to_string());
            }
            for (candidate, replacement) in NAMED {
                if *candidate == name {
                    return (*replacement).to_string();
                }
            }
            caps[0].to_string()
        })
        .into_owned()
}

fn decode_numeric(digits: &str) -> Option<String> {
    let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_entity_round_trip() {
        assert_eq!(decode_entities("&amp;&lt;&gt;&quot;&#39;&nbsp;"), "&<>\"' ");
    }

    #[test]
    fn extended_entities() {
        assert_eq!(
            decode_entities("&copy; 2024 &euro;10 &frac12; price"),
            "\u{a9} 2024 \u{20ac}10 \u{bd} price"
        );
        assert_eq!(decode_entities("5&times;4&divide;2 &plusmn;1"), "5\u{d7}4\u{f7}2 \u{b1}1");
    }

    #[test]
    fn numeric_references_decimal_and_hex() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("&#8217;"), "\u{2019}");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
        assert_eq!(decode_entities("&mdashx;"), "&mdashx;");
    }

    #[test]
    fn invalid_numeric_references_pass_through() {
        // Out of Unicode range and non-numeric digits keep their source form.
        assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn decoding_is_single_pass() {
        // "&amp;lt;" decodes the amp only; the result is not re-scanned.
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn bare_ampersand_untouched() {
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
    }
}
