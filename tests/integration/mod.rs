//! Integration tests module for the response extractor
//!
//! Shared fixtures: logging setup, a host that answers every request with a
//! fixed body, and helpers for recording aged responses.

pub mod extraction_test;
pub mod properties_test;

use chrono::{DateTime, Duration, Utc};
use response_extractor::host::{responder_fn, InMemoryHost};
use response_extractor::models::{StoredRequest, StoredResponse};
use response_extractor::render::RenderChain;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Host whose transport answers every request with `200` and `body`.
///
/// The clock is frozen at `now` and the active environment is `env_dev`.
pub fn host_with_body(body: &'static str, now: DateTime<Utc>) -> InMemoryHost {
    init_test_env();
    let host = InMemoryHost::new(responder_fn(
        move |request: &StoredRequest, _: &RenderChain| {
            StoredResponse::new(&request.id, 200)
                .with_body(body)
                .with_content_type("text/plain; charset=utf-8")
        },
    ))
    .with_environment("env_dev")
    .with_clock(now);
    host.add_request(StoredRequest::new("req_login").with_name("Login"));
    host
}

/// A recorded `200` response for `request_id` in `env_dev`, aged `age`.
pub fn recorded(request_id: &str, body: &str, now: DateTime<Utc>, age: Duration) -> StoredResponse {
    StoredResponse::new(request_id, 200)
        .with_body(body.as_bytes().to_vec())
        .with_content_type("text/plain")
        .with_environment(Some("env_dev".to_string()))
        .with_created(now - age)
}
