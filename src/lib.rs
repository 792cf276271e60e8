//! RegExp response extractor for templated API requests.
//!
//! This crate provides the `RegExpExtractor` template tag: it reads the
//! response of another request, optionally sending that request again first,
//! and extracts a value from the body with a regular expression.
//!
//! # Architecture
//!
//! - **models**: Requests and recorded responses owned by the host
//! - **render**: Render purpose and the render chain used for cycle detection
//! - **trigger**: Trigger policies deciding when a dependency is resent
//! - **resend**: Resend decision engine producing a usable response
//! - **extract**: Charset-aware body decoding and RegExp extraction
//! - **host**: Interface to the request execution environment, plus an
//!   in-memory implementation
//! - **tag**: The tag itself, its arguments and its field schema
//! - **config**: User defaults loaded from host settings
//!
//! # Cycle prevention
//!
//! When request A's template reads B and B's template reads A, an `always`
//! policy would send A, then B, then A again forever. Each send render carries
//! a [`RenderChain`] of the requests already sent; a request found in the chain
//! is never sent again, and its recorded response is used instead.
//!
//! # Usage
//!
//! ```no_run
//! use response_extractor::host::InMemoryHost;
//! use response_extractor::render::RenderContext;
//! use response_extractor::tag::{RegexExtractorTag, TagArguments};
//!
//! # async fn example(host: &InMemoryHost) -> Result<(), Box<dyn std::error::Error>> {
//! let tag = RegexExtractorTag::new();
//! let args = TagArguments::new("req_login")
//!     .filter(r#""token":"([^"]+)""#)
//!     .trigger("when-expired")
//!     .max_age_secs(300.0);
//!
//! let token = tag.run(host, &RenderContext::send(), &args).await?;
//! println!("token: {}", token);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod host;
pub mod models;
pub mod render;
pub mod resend;
pub mod tag;
pub mod trigger;

pub use error::TagError;
pub use host::ExecutionHost;
pub use models::{StoredRequest, StoredResponse};
pub use render::{RenderChain, RenderContext, RenderPurpose};
pub use resend::{decide, decide_and_fetch, ResendDecision};
pub use tag::{RegexExtractorTag, TagArguments};
pub use trigger::TriggerPolicy;
