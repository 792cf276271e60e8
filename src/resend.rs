//! Conditional resend of a dependency request.
//!
//! Before a tag can read another request's response it may have to send that
//! request again, depending on the trigger policy. Two rules keep this safe:
//!
//! - only a send render may execute anything; previews read what is recorded
//! - a request already present in the render chain is never sent again in the
//!   same render, which cuts cycles such as A → B → A

use crate::error::TagError;
use crate::host::ExecutionHost;
use crate::models::StoredResponse;
use crate::render::{RenderChain, RenderContext, RenderPurpose};
use crate::trigger::TriggerPolicy;
use chrono::{DateTime, Utc};

/// Outcome of the resend decision for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendDecision {
    /// What the trigger policy alone asks for.
    pub policy_resend: bool,
    /// The request is already in the render chain.
    pub cycle_detected: bool,
    /// Whether the request will actually be executed.
    pub execute: bool,
}

impl ResendDecision {
    /// Resend wanted after the cycle guard, regardless of render purpose.
    pub fn should_resend(&self) -> bool {
        self.policy_resend && !self.cycle_detected
    }
}

/// Computes the resend decision without touching the host.
///
/// The cycle guard overrides the policy, and the purpose gate overrides both.
pub fn decide(
    request_id: &str,
    policy: TriggerPolicy,
    max_age_secs: f64,
    cached: Option<&StoredResponse>,
    chain: &RenderChain,
    purpose: RenderPurpose,
    now: DateTime<Utc>,
) -> ResendDecision {
    let policy_resend = policy.should_resend(cached, max_age_secs, now);
    let cycle_detected = chain.contains(request_id);
    ResendDecision {
        policy_resend,
        cycle_detected,
        execute: policy_resend && !cycle_detected && purpose.is_send(),
    }
}

/// Resolves a usable response for `request_id`, sending the request first
/// when the policy requires it.
///
/// # Arguments
///
/// * `host` - Execution environment
/// * `request_id` - Dependency to read
/// * `policy` - Trigger policy
/// * `max_age_secs` - Max age for `when-expired`, taken literally
/// * `context` - Render purpose and the chain of this render
///
/// # Errors
///
/// - `NoRequestSpecified` if `request_id` is empty
/// - `RequestNotFound` if the host does not know the request
/// - `NoResponse` if there is neither a recorded nor a fresh response
/// - `DependencyFailed` if the response carries a transport error
/// - `NoSuccessfulResponse` if the response has no status code
pub async fn decide_and_fetch<H>(
    host: &H,
    request_id: &str,
    policy: TriggerPolicy,
    max_age_secs: f64,
    context: &RenderContext,
) -> Result<StoredResponse, TagError>
where
    H: ExecutionHost + ?Sized,
{
    if request_id.is_empty() {
        return Err(TagError::NoRequestSpecified);
    }

    let request = host
        .resolve_request(request_id)
        .await
        .ok_or_else(|| TagError::RequestNotFound(request_id.to_string()))?;

    let environment_id = host.current_environment_id();
    let mut response = host
        .latest_response(&request.id, environment_id.as_deref())
        .await;

    let decision = decide(
        &request.id,
        policy,
        max_age_secs,
        response.as_ref(),
        &context.chain,
        context.purpose,
        host.now(),
    );

    if decision.cycle_detected {
        log::debug!(
            "[response tag] Preventing recursive render of request {}",
            request.id
        );
    }

    if decision.execute {
        log::info!(
            "[response tag] Resending dependency {} ({})",
            request.name,
            request.id
        );
        let chain = context.chain.extended(&request.id);
        response = Some(host.execute_request(&request, &chain).await);
    } else if decision.should_resend() {
        log::debug!(
            "[response tag] Skipping resend of {} during {:?} render",
            request.id,
            context.purpose
        );
    }

    let response = response.ok_or_else(|| {
        log::debug!("[response tag] No response found for {}", request.id);
        TagError::NoResponse
    })?;

    if let Some(error) = &response.error {
        log::debug!("[response tag] Response error {}", error);
        return Err(TagError::DependencyFailed(error.clone()));
    }

    if !response.has_status() {
        log::debug!(
            "[response tag] Invalid status code {:?}",
            response.status_code
        );
        return Err(TagError::NoSuccessfulResponse);
    }

    Ok(response)
}
