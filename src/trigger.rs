//! Trigger policies deciding when a dependent request is sent again.
//!
//! # Policies
//!
//! | Policy         | Resend when                                   |
//! |----------------|-----------------------------------------------|
//! | `never`        | never                                         |
//! | `no-history`   | no response has been recorded yet             |
//! | `when-expired` | no response, or the latest is older than max  |
//! | `always`       | on every send render                          |

use crate::models::StoredResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule selecting whether a dependency is re-executed before it is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum TriggerPolicy {
    /// Never resend; only read the latest recorded response.
    #[default]
    Never,
    /// Resend only when no response exists.
    NoHistory,
    /// Resend when no response exists or it is older than the max age.
    WhenExpired,
    /// Resend every time.
    Always,
}

impl TriggerPolicy {
    /// All policies in the order they are offered to users.
    pub const ALL: [TriggerPolicy; 4] = [
        TriggerPolicy::Never,
        TriggerPolicy::NoHistory,
        TriggerPolicy::WhenExpired,
        TriggerPolicy::Always,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerPolicy::Never => "never",
            TriggerPolicy::NoHistory => "no-history",
            TriggerPolicy::WhenExpired => "when-expired",
            TriggerPolicy::Always => "always",
        }
    }

    /// Parses user-supplied policy text, falling back to `default`.
    ///
    /// Absent or blank text yields `default`. Unrecognized text also yields
    /// `default` and is logged.
    pub fn parse_or(text: Option<&str>, default: TriggerPolicy) -> TriggerPolicy {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            None => default,
            Some(t) => t.parse::<TriggerPolicy>().unwrap_or_else(|err: UnknownPolicy| {
                log::warn!("[response tag] {}, using '{}'", err, default);
                default
            }),
        }
    }

    /// Decides whether the dependency must be sent again.
    ///
    /// # Arguments
    ///
    /// * `cached` - Latest recorded response, if any
    /// * `max_age_secs` - Maximum age in seconds, only read by `when-expired`
    /// * `now` - Current time
    ///
    /// `max_age_secs` is used as given: `0` expires everything older than
    /// the current millisecond, a huge value never expires, and a response
    /// exactly `max_age_secs` old is still fresh.
    pub fn should_resend(
        &self,
        cached: Option<&StoredResponse>,
        max_age_secs: f64,
        now: DateTime<Utc>,
    ) -> bool {
        match self {
            TriggerPolicy::Never => false,
            TriggerPolicy::NoHistory => cached.is_none(),
            TriggerPolicy::WhenExpired => match cached {
                None => true,
                Some(response) => response.age_secs(now) > max_age_secs,
            },
            TriggerPolicy::Always => true,
        }
    }
}

impl fmt::Display for TriggerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy text that matches none of the known policies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trigger behavior '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for TriggerPolicy {
    type Err = UnknownPolicy;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TriggerPolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == lower)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

impl TryFrom<String> for TriggerPolicy {
    type Error = UnknownPolicy;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
