//! Response body decoding.
//!
//! The charset comes from the `charset=` parameter of the Content-Type header
//! and defaults to UTF-8. Decoding never fails: an unknown label or a byte
//! sequence that is invalid for the declared charset falls back to lossy UTF-8
//! and is logged.

use encoding_rs::Encoding;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Charset assumed when the Content-Type does not declare one.
pub const DEFAULT_CHARSET: &str = "utf-8";

static CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"charset=([\w-]+)").expect("Failed to compile charset regex")
});

/// Extracts the charset label from a Content-Type value.
///
/// # Examples
///
/// ```
/// use response_extractor::extract::charset::charset_from_content_type;
///
/// assert_eq!(charset_from_content_type(Some("text/html; charset=iso-8859-1")), "iso-8859-1");
/// assert_eq!(charset_from_content_type(Some("application/json")), "utf-8");
/// assert_eq!(charset_from_content_type(None), "utf-8");
/// ```
pub fn charset_from_content_type(content_type: Option<&str>) -> &str {
    content_type
        .and_then(|ct| CHARSET_REGEX.captures(ct))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_CHARSET)
}

/// Labels naming true ISO-8859-1.
///
/// `encoding_rs` resolves these to windows-1252, which maps 0x80..=0x9F to
/// printable characters instead of the C1 control points.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
];

fn is_latin1_label(label: &str) -> bool {
    LATIN1_LABELS.iter().any(|l| label.eq_ignore_ascii_case(l))
}

/// Why a body could not be decoded with its declared charset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown charset '{0}'")]
    UnknownCharset(String),

    #[error("invalid byte sequence for charset '{0}'")]
    Malformed(String),
}

/// Decodes `bytes` strictly with the charset named by `label`.
///
/// A leading byte order mark is not stripped; the bytes are taken as given.
/// ISO-8859-1 maps every byte to the code point of the same value.
pub fn decode_strict<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>, DecodeError> {
    let label = label.trim();
    if is_latin1_label(label) {
        return Ok(Cow::Owned(bytes.iter().copied().map(char::from).collect()));
    }

    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| DecodeError::UnknownCharset(label.to_string()))?;

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| DecodeError::Malformed(encoding.name().to_string()))
}

/// Decodes `bytes` with `label`, falling back to lossy UTF-8 on failure.
///
/// # Arguments
///
/// * `bytes` - Raw body bytes
/// * `label` - Charset label, e.g. `utf-8` or `iso-8859-1`
/// * `log_fallback` - Whether a fallback is reported through `log::warn!`
pub fn decode_body<'a>(bytes: &'a [u8], label: &str, log_fallback: bool) -> Cow<'a, str> {
    match decode_strict(bytes, label) {
        Ok(text) => text,
        Err(err) => {
            if log_fallback {
                log::warn!("[response tag] Failed to decode body: {}", err);
            }
            String::from_utf8_lossy(bytes)
        }
    }
}
