//! Stored request data model.
//!
//! Requests are owned by the host. The extractor only needs their identity to
//! guard against cycles and to hand them back to the host for execution.

use serde::{Deserialize, Serialize};

/// A request definition known to the host.
///
/// The `id` is the value placed in the render chain; two requests with the
/// same id are the same request as far as cycle detection is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRequest {
    /// Unique identifier of the request.
    pub id: String,

    /// Human-readable name, used in log messages.
    #[serde(default)]
    pub name: String,
}

impl StoredRequest {
    /// Creates a request whose name defaults to its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
