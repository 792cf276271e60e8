//! Interface to the request execution environment hosting the tag.
//!
//! The host owns requests, recorded responses and the transport. The tag only
//! consumes the operations below; [`memory::InMemoryHost`] is a reference
//! implementation that keeps everything in memory.

pub mod memory;

pub use memory::{responder_fn, Execution, FnResponder, InMemoryHost, Responder};

use crate::models::{StoredRequest, StoredResponse};
use crate::render::RenderChain;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Operations the tag needs from the environment it runs in.
///
/// Implementations must be shareable across tasks: a nested render triggered
/// by [`execute_request`](Self::execute_request) may evaluate further tags
/// against the same host.
#[async_trait]
pub trait ExecutionHost: Send + Sync {
    /// Looks up a request definition by id.
    async fn resolve_request(&self, request_id: &str) -> Option<StoredRequest>;

    /// Returns the most recent response recorded for `request_id` in the
    /// given environment.
    async fn latest_response(
        &self,
        request_id: &str,
        environment_id: Option<&str>,
    ) -> Option<StoredResponse>;

    /// Sends `request`, rendering it with `render_chain` as the chain seen by
    /// any tags inside it.
    ///
    /// Transport failures are reported through [`StoredResponse::error`], not
    /// as an `Err`.
    async fn execute_request(
        &self,
        request: &StoredRequest,
        render_chain: &RenderChain,
    ) -> StoredResponse;

    /// Raw body bytes of `response`.
    ///
    /// `encoding_hint` is passed through untouched; an empty hint lets the
    /// host pick its default.
    fn response_body(&self, response: &StoredResponse, encoding_hint: &str) -> Vec<u8> {
        let _ = encoding_hint;
        response.body.clone()
    }

    /// Environment currently selected in the host.
    fn current_environment_id(&self) -> Option<String>;

    /// Current time, used for response age.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
