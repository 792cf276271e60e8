//! Extraction of a single value from a dependency's response.
//!
//! The body is decoded with its declared charset and searched with the user's
//! regular expression. Only the first match is used, and the number of capture
//! groups in the pattern decides what is returned:
//!
//! - no groups: the whole match
//! - one group: that group's text
//! - two or more: an error, since the intended group is ambiguous

pub mod charset;

use crate::error::TagError;
use crate::host::ExecutionHost;
use crate::models::StoredResponse;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use charset::{charset_from_content_type, decode_body, DEFAULT_CHARSET};

/// Part of the response the filter is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseAttribute {
    /// The decoded response body.
    #[default]
    Body,
}

impl ResponseAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseAttribute::Body => "body",
        }
    }
}

impl fmt::Display for ResponseAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseAttribute {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "body" => Ok(ResponseAttribute::Body),
            other => Err(TagError::UnsupportedAttribute(other.to_string())),
        }
    }
}

/// Extracts a value from `response`.
///
/// # Arguments
///
/// * `host` - Host providing the body bytes
/// * `response` - Response to search, already validated by the resend engine
/// * `attribute` - Attribute name; only `body` is supported
/// * `filter` - Regular expression to apply
/// * `log_decode_fallback` - Whether a charset fallback is logged
///
/// # Errors
///
/// `MissingFilter` for an empty filter, then `UnsupportedAttribute`, then any
/// error from [`apply_filter`].
pub fn extract<H>(
    host: &H,
    response: &StoredResponse,
    attribute: &str,
    filter: &str,
    log_decode_fallback: bool,
) -> Result<String, TagError>
where
    H: ExecutionHost + ?Sized,
{
    if filter.is_empty() {
        return Err(TagError::MissingFilter);
    }

    match attribute.parse::<ResponseAttribute>()? {
        ResponseAttribute::Body => {
            let bytes = host.response_body(response, "");
            let label = charset_from_content_type(response.content_type());
            let body = decode_body(&bytes, label, log_decode_fallback);
            apply_filter(&body, filter)
        }
    }
}

/// Applies `filter` to `text` and returns the extracted value.
///
/// Filters use `regex` crate syntax. Lookaround and backreferences are
/// rejected as `InvalidFilter`, and `\d`, `\w` and `\s` are Unicode-aware;
/// `(?-u:\d)` restricts a class to ASCII.
///
/// # Examples
///
/// ```
/// use response_extractor::extract::apply_filter;
///
/// assert_eq!(apply_filter("user id=42 active", r"id=(\d+)").unwrap(), "42");
/// assert_eq!(apply_filter("user id=42 active", r"\d+").unwrap(), "42");
/// assert!(apply_filter("user id=42 active", r"(id)=(\d+)").is_err());
/// ```
pub fn apply_filter(text: &str, filter: &str) -> Result<String, TagError> {
    let re = Regex::new(filter).map_err(|e| TagError::InvalidFilter {
        filter: filter.to_string(),
        detail: e.to_string(),
    })?;

    let captures = re.captures(text).ok_or_else(|| TagError::NoMatch {
        filter: filter.to_string(),
    })?;

    // Group 0 is the whole match.
    let groups = captures.len() - 1;
    if groups > 1 {
        return Err(TagError::TooManyMatches {
            filter: filter.to_string(),
            groups,
        });
    }

    let value = if groups == 1 {
        // A group that did not take part in the match yields "".
        captures.get(1).map_or("", |m| m.as_str())
    } else {
        captures.get(0).map_or("", |m| m.as_str())
    };

    Ok(value.to_string())
}
