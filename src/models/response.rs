//! Stored response data model.
//!
//! A `StoredResponse` is what the host keeps after executing a request: the
//! status, the raw body, the content type, and an error message when the
//! request never produced an HTTP response at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A response recorded by the host for a previously executed request.
///
/// The extractor never mutates a response; it only reads the timestamp,
/// status, error, content type and body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResponse {
    /// Unique identifier for this response.
    pub id: String,

    /// Identifier of the request that produced this response.
    pub request_id: String,

    /// Environment that was active when the request was sent.
    ///
    /// Latest-response lookups are scoped by this value.
    pub environment_id: Option<String>,

    /// Time at which the response was recorded.
    ///
    /// Used by the `when-expired` trigger policy to compute the age.
    pub created: DateTime<Utc>,

    /// HTTP status code, if the server produced one.
    ///
    /// `None` or `Some(0)` means there is no usable status.
    pub status_code: Option<u16>,

    /// Raw value of the Content-Type header.
    pub content_type: Option<String>,

    /// Response body as raw bytes.
    ///
    /// Kept undecoded so the extractor can honour the declared charset.
    pub body: Vec<u8>,

    /// Transport-level failure message.
    ///
    /// Set when sending the request failed (DNS, connection refused, ...).
    pub error: Option<String>,
}

impl StoredResponse {
    /// Creates a new response for `request_id` with the given status code.
    ///
    /// # Arguments
    ///
    /// * `request_id` - Identifier of the request that produced the response
    /// * `status_code` - HTTP status code returned by the server
    ///
    /// # Returns
    ///
    /// A new `StoredResponse` stamped with the current time and an empty body.
    pub fn new(request_id: impl Into<String>, status_code: u16) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            request_id: request_id.into(),
            environment_id: None,
            created: Utc::now(),
            status_code: Some(status_code),
            content_type: None,
            body: Vec::new(),
            error: None,
        }
    }

    /// Creates a response describing a request that failed to send.
    ///
    /// The response carries no status code and the given error message.
    pub fn failed(request_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status_code: None,
            error: Some(error.into()),
            ..Self::new(request_id, 0)
        }
    }

    /// Sets the response body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the Content-Type header value.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the environment the response belongs to.
    pub fn with_environment(mut self, environment_id: Option<String>) -> Self {
        self.environment_id = environment_id;
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Checks whether the response carries a non-zero status code.
    ///
    /// # Returns
    ///
    /// `true` if a status code is present and non-zero, `false` otherwise.
    pub fn has_status(&self) -> bool {
        matches!(self.status_code, Some(code) if code != 0)
    }

    /// Age of the response relative to `now`, in fractional seconds.
    ///
    /// Millisecond precision. Negative when `created` lies in the future.
    pub fn age_secs(&self, now: DateTime<Utc>) -> f64 {
        now.signed_duration_since(self.created).num_milliseconds() as f64 / 1000.0
    }
}
