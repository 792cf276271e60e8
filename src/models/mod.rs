//! Data models for requests and their recorded responses.
//!
//! Both are owned by the host execution environment; the extractor reads them.

pub mod request;
pub mod response;

pub use request::StoredRequest;
pub use response::StoredResponse;
