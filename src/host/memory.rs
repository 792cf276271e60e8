//! In-memory execution host.
//!
//! Keeps requests and responses in process memory and delegates the actual
//! "sending" to a [`Responder`]. Every execution is recorded together with the
//! render chain it received, which makes the host useful for previews and for
//! verifying resend behavior. Nothing is persisted.

use super::ExecutionHost;
use crate::models::{StoredRequest, StoredResponse};
use crate::render::RenderChain;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Produces the response for a request the host was asked to execute.
///
/// The responder receives the host itself so it can render tags nested in the
/// request with the chain it was given.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(
        &self,
        host: &InMemoryHost,
        request: &StoredRequest,
        render_chain: &RenderChain,
    ) -> StoredResponse;
}

/// Adapts a synchronous closure into a [`Responder`].
pub struct FnResponder<F>(F);

/// Wraps `f` so it can be used as a [`Responder`].
pub fn responder_fn<F>(f: F) -> FnResponder<F>
where
    F: Fn(&StoredRequest, &RenderChain) -> StoredResponse + Send + Sync,
{
    FnResponder(f)
}

#[async_trait]
impl<F> Responder for FnResponder<F>
where
    F: Fn(&StoredRequest, &RenderChain) -> StoredResponse + Send + Sync,
{
    async fn respond(
        &self,
        _host: &InMemoryHost,
        request: &StoredRequest,
        render_chain: &RenderChain,
    ) -> StoredResponse {
        (self.0)(request, render_chain)
    }
}

/// One call to [`ExecutionHost::execute_request`].
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Request that was executed.
    pub request_id: String,
    /// Chain handed to the request's own render.
    pub render_chain: RenderChain,
    /// Host time when execution started.
    pub started: DateTime<Utc>,
}

/// Execution host backed by in-memory maps.
pub struct InMemoryHost {
    requests: Mutex<HashMap<String, StoredRequest>>,
    responses: Mutex<Vec<StoredResponse>>,
    executions: Mutex<Vec<Execution>>,
    environment_id: Mutex<Option<String>>,
    clock: Mutex<Option<DateTime<Utc>>>,
    responder: Box<dyn Responder>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryHost {
    /// Creates an empty host that executes requests through `responder`.
    pub fn new(responder: impl Responder + 'static) -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
            responses: Mutex::new(Vec::new()),
            executions: Mutex::new(Vec::new()),
            environment_id: Mutex::new(None),
            clock: Mutex::new(None),
            responder: Box::new(responder),
        }
    }

    /// Selects the active environment.
    pub fn with_environment(self, environment_id: impl Into<String>) -> Self {
        self.set_environment(Some(environment_id.into()));
        self
    }

    /// Freezes the host clock at `now`.
    pub fn with_clock(self, now: DateTime<Utc>) -> Self {
        self.set_clock(Some(now));
        self
    }

    pub fn set_environment(&self, environment_id: Option<String>) {
        *lock(&self.environment_id) = environment_id;
    }

    /// Freezes the clock at `now`, or unfreezes it with `None`.
    pub fn set_clock(&self, now: Option<DateTime<Utc>>) {
        *lock(&self.clock) = now;
    }

    /// Moves a frozen clock forward. Has no effect on a live clock.
    pub fn advance_clock(&self, by: Duration) {
        if let Some(now) = lock(&self.clock).as_mut() {
            *now += by;
        }
    }

    /// Registers a request definition, replacing any with the same id.
    pub fn add_request(&self, request: StoredRequest) {
        lock(&self.requests).insert(request.id.clone(), request);
    }

    /// Records a response as if the request had been sent earlier.
    pub fn record_response(&self, response: StoredResponse) {
        lock(&self.responses).push(response);
    }

    /// All executions so far, in order.
    pub fn executions(&self) -> Vec<Execution> {
        lock(&self.executions).clone()
    }

    /// Number of times `request_id` has been executed.
    pub fn execution_count(&self, request_id: &str) -> usize {
        lock(&self.executions)
            .iter()
            .filter(|e| e.request_id == request_id)
            .count()
    }

    /// All responses recorded for `request_id`, oldest first.
    pub fn responses_for(&self, request_id: &str) -> Vec<StoredResponse> {
        let mut responses: Vec<StoredResponse> = lock(&self.responses)
            .iter()
            .filter(|r| r.request_id == request_id)
            .cloned()
            .collect();
        responses.sort_by_key(|r| r.created);
        responses
    }
}

#[async_trait]
impl ExecutionHost for InMemoryHost {
    async fn resolve_request(&self, request_id: &str) -> Option<StoredRequest> {
        lock(&self.requests).get(request_id).cloned()
    }

    async fn latest_response(
        &self,
        request_id: &str,
        environment_id: Option<&str>,
    ) -> Option<StoredResponse> {
        lock(&self.responses)
            .iter()
            .filter(|r| r.request_id == request_id && r.environment_id.as_deref() == environment_id)
            .max_by_key(|r| r.created)
            .cloned()
    }

    async fn execute_request(
        &self,
        request: &StoredRequest,
        render_chain: &RenderChain,
    ) -> StoredResponse {
        let started = self.now();
        lock(&self.executions).push(Execution {
            request_id: request.id.clone(),
            render_chain: render_chain.clone(),
            started,
        });

        let mut response = self.responder.respond(self, request, render_chain).await;
        response.request_id = request.id.clone();
        response.environment_id = self.current_environment_id();
        response.created = self.now();

        self.record_response(response.clone());
        response
    }

    fn current_environment_id(&self) -> Option<String> {
        lock(&self.environment_id).clone()
    }

    fn now(&self) -> DateTime<Utc> {
        (*lock(&self.clock)).unwrap_or_else(Utc::now)
    }
}
