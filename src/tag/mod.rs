//! The `RegExpExtractor` template tag.
//!
//! Rendering the tag runs the resend engine for the referenced request and
//! then applies the RegExp to the body of the response it produced:
//!
//! 1. resolve the request and its latest response in the active environment
//! 2. resend it if the trigger policy asks for it, this is a send render, and
//!    the request is not already in the render chain
//! 3. reject missing, failed or status-less responses
//! 4. decode the body and return the value selected by the RegExp

pub mod arguments;
pub mod fields;

pub use arguments::TagArguments;
pub use fields::{argument_definitions, ArgumentDefinition, ArgumentKind, EnumOption, VisibilityRule};

use crate::config::{get_config, ExtractorConfig};
use crate::error::TagError;
use crate::extract::{extract, ResponseAttribute};
use crate::host::ExecutionHost;
use crate::render::RenderContext;
use crate::resend::decide_and_fetch;
use serde::Serialize;

/// Registration data a host needs to list the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub args: Vec<ArgumentDefinition>,
}

/// Template tag extracting a RegExp match from another request's response.
#[derive(Debug, Clone, Default)]
pub struct RegexExtractorTag {
    config: ExtractorConfig,
}

impl RegexExtractorTag {
    pub const NAME: &'static str = "RegExpExtractor";
    pub const DISPLAY_NAME: &'static str = "RegExp from response";
    pub const DESCRIPTION: &'static str = "reference values from other request's responses";

    /// Creates the tag using the current global configuration.
    pub fn new() -> Self {
        Self::with_config(get_config())
    }

    /// Creates the tag with an explicit configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Name, description and argument schema for registration with a host.
    pub fn definition(&self) -> TagDefinition {
        TagDefinition {
            name: Self::NAME,
            display_name: Self::DISPLAY_NAME,
            description: Self::DESCRIPTION,
            args: argument_definitions(&self.config),
        }
    }

    /// Renders the tag.
    ///
    /// # Arguments
    ///
    /// * `host` - Execution environment owning requests and responses
    /// * `context` - Purpose and render chain of the current render
    /// * `args` - Arguments entered by the user
    ///
    /// # Returns
    ///
    /// The extracted value, or the first [`TagError`] encountered. Dependency
    /// errors are reported before filter and attribute errors.
    pub async fn run<H>(
        &self,
        host: &H,
        context: &RenderContext,
        args: &TagArguments,
    ) -> Result<String, TagError>
    where
        H: ExecutionHost + ?Sized,
    {
        let request_id = args.request_id.as_deref().unwrap_or_default();
        let policy = args.trigger_policy(self.config.default_trigger);
        let max_age_secs = args
            .max_age_secs
            .unwrap_or(self.config.default_max_age_secs);

        let response = decide_and_fetch(host, request_id, policy, max_age_secs, context).await?;

        let attribute = args
            .attribute
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(ResponseAttribute::default().as_str());
        let filter = args.filter.as_deref().unwrap_or_default();

        extract(
            host,
            &response,
            attribute,
            filter,
            self.config.log_decode_fallbacks,
        )
    }
}
