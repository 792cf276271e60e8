//! Error types raised while evaluating the extractor tag.
//!
//! Every variant aborts the evaluation and is shown to the user as a render
//! error. None of them are retried here; the render system decides whether to
//! render again later.

use thiserror::Error;

/// Errors that can occur while resolving a dependency or extracting from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The tag was rendered without a request reference.
    #[error("No request specified")]
    NoRequestSpecified,

    /// The referenced request does not exist in the host.
    #[error("Could not find request {0}")]
    RequestNotFound(String),

    /// No cached response exists and none was produced by a resend.
    #[error("No responses for request")]
    NoResponse,

    /// The dependency was sent but the transport reported an error.
    #[error("Failed to send dependent request {0}")]
    DependencyFailed(String),

    /// The response has no usable status code.
    #[error("No successful responses for request")]
    NoSuccessfulResponse,

    /// The RegExp argument is empty.
    #[error("No filter specified")]
    MissingFilter,

    /// Only the response body can be searched for now.
    #[error("Not implemented yet: attribute '{0}' is not supported")]
    UnsupportedAttribute(String),

    /// The filter compiled but found nothing in the body.
    #[error("No matches for regexp: {filter}")]
    NoMatch { filter: String },

    /// The filter declares more than one capture group.
    #[error("RegExp returns too many results: {filter} has {groups} capture groups")]
    TooManyMatches { filter: String, groups: usize },

    /// The filter is not a valid regular expression.
    #[error("Wrong regexp: {filter}, {detail}")]
    InvalidFilter { filter: String, detail: String },
}

impl TagError {
    /// Whether the error comes from resolving the dependency rather than from
    /// searching its body.
    pub fn is_dependency_error(&self) -> bool {
        matches!(
            self,
            TagError::NoRequestSpecified
                | TagError::RequestNotFound(_)
                | TagError::NoResponse
                | TagError::DependencyFailed(_)
                | TagError::NoSuccessfulResponse
        )
    }
}
