//! Arguments a user supplies to the extractor tag.

use crate::trigger::TriggerPolicy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw tag arguments as entered by the user.
///
/// Every field is optional; blanks are filled from [`ExtractorConfig`]
/// defaults when the tag runs.
///
/// [`ExtractorConfig`]: crate::config::ExtractorConfig
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagArguments {
    /// Id of the request whose response is read.
    #[serde(default)]
    pub request_id: Option<String>,

    /// Response attribute to search; only `body` is supported.
    #[serde(default)]
    pub attribute: Option<String>,

    /// Regular expression applied to the attribute.
    #[serde(default)]
    pub filter: Option<String>,

    /// Trigger policy text, matched case-insensitively.
    #[serde(default)]
    pub trigger: Option<String>,

    /// Max age in seconds for the `when-expired` policy.
    #[serde(default)]
    pub max_age_secs: Option<f64>,
}

impl TagArguments {
    /// Arguments reading the body of `request_id`.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..Self::default()
        }
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn max_age_secs(mut self, max_age_secs: f64) -> Self {
        self.max_age_secs = Some(max_age_secs);
        self
    }

    /// Builds arguments from the positional values a template host passes:
    /// request, attribute, filter, trigger behavior, max age.
    ///
    /// Missing positions, `null` and values of the wrong type are treated as
    /// blank. The max age accepts a JSON number or a numeric string.
    ///
    /// # Examples
    ///
    /// ```
    /// use response_extractor::tag::TagArguments;
    /// use serde_json::json;
    ///
    /// let args = TagArguments::from_positional(&[
    ///     json!("req_login"),
    ///     json!("body"),
    ///     json!(r#""token":"([^"]+)""#),
    ///     json!("when-expired"),
    ///     json!(300),
    /// ]);
    /// assert_eq!(args.request_id.as_deref(), Some("req_login"));
    /// assert_eq!(args.max_age_secs, Some(300.0));
    /// ```
    pub fn from_positional(values: &[Value]) -> Self {
        let text = |index: usize| {
            values
                .get(index)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let max_age_secs = values.get(4).and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        });

        Self {
            request_id: text(0),
            attribute: text(1),
            filter: text(2),
            trigger: text(3),
            max_age_secs,
        }
    }

    /// Trigger policy to apply, falling back to `default` when blank or
    /// unrecognized.
    pub fn trigger_policy(&self, default: TriggerPolicy) -> TriggerPolicy {
        TriggerPolicy::parse_or(self.trigger.as_deref(), default)
    }
}
