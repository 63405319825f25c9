//! Charset detection and decoding of response bodies to UTF-8.
//!
//! Precedence: the `Content-Type` header charset, then `<meta>`
//! declarations in the first 4 KiB of the body, then a chardetng guess.

use bytes::Bytes;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

use crate::fetcher::errors::FetchError;

const META_SNIFF_WINDOW: usize = 4096;

static HEADER_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn decode_body(content_type: &str, body: &Bytes) -> Result<String, FetchError> {
    let encoding = detect_encoding(content_type, body);
    let (decoded, _actual, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "body not decodable as {}",
            encoding.name()
        )));
    }
    Ok(decoded.into_owned())
}

fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = charset_from_capture(&HEADER_CHARSET_RE, content_type) {
        return encoding;
    }

    let window = &body[..body.len().min(META_SNIFF_WINDOW)];
    let head = String::from_utf8_lossy(window);
    for re in [&META_CHARSET_RE, &META_HTTP_EQUIV_RE] {
        if let Some(encoding) = charset_from_capture(re, &head) {
            return encoding;
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(window, false);
    detector.guess(None, true)
}

fn charset_from_capture(re: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = re.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_from_content_type_header() {
        let body = Bytes::from_static(b"<html><head><title>Test</title></head></html>");
        let encoding = detect_encoding("text/html; charset=utf-8", &body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn charset_from_meta_tag() {
        let body = Bytes::from_static(
            b"<html><head><meta charset=\"windows-1252\"><title>Test</title></head></html>",
        );
        let encoding = detect_encoding("text/html", &body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn charset_from_meta_http_equiv() {
        let body = Bytes::from_static(
            b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head></html>",
        );
        let encoding = detect_encoding("text/html", &body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn iso_8859_1_maps_to_windows_1252() {
        // encoding_rs treats latin-1 labels as windows-1252, its superset.
        let body = Bytes::from_static(b"<html><head><meta charset=\"iso-8859-1\"></head></html>");
        let encoding = detect_encoding("text/html", &body);
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn decodes_utf8_body() {
        let body = Bytes::from("Hello, \u{4e16}\u{754c}!");
        let decoded = decode_body("text/html; charset=utf-8", &body).unwrap();
        assert_eq!(decoded, "Hello, \u{4e16}\u{754c}!");
    }

    #[test]
    fn decodes_windows_1252_body() {
        // 0xE9 is e-acute in windows-1252.
        let body = Bytes::from_static(b"caf\xe9");
        let decoded = decode_body("text/html; charset=windows-1252", &body).unwrap();
        assert_eq!(decoded, "caf\u{e9}");
    }
}
