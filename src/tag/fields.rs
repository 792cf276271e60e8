//! Declarative argument schema for the extractor tag.
//!
//! Hosts render these definitions as form fields. The schema is data only:
//! nothing in the resend engine reads it.

use super::TagArguments;
use crate::config::ExtractorConfig;
use crate::trigger::TriggerPolicy;
use serde::Serialize;
use serde_json::{json, Value};

/// One option of an enum argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumOption {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: String,
}

/// Input type of an argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArgumentKind {
    /// Reference to a host model, e.g. a request.
    Model { model: String },
    /// Choice among fixed options.
    Enum { options: Vec<EnumOption> },
    String,
    Number,
}

/// Condition under which an argument is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "when", content = "value", rename_all = "camelCase")]
pub enum VisibilityRule {
    /// Shown only while the trigger policy equals the given one.
    TriggerIs(TriggerPolicy),
}

impl VisibilityRule {
    /// Evaluates the rule against the arguments currently entered.
    ///
    /// Blank or unrecognized trigger text counts as `default_trigger`.
    pub fn is_satisfied(&self, args: &TagArguments, default_trigger: TriggerPolicy) -> bool {
        match self {
            VisibilityRule::TriggerIs(policy) => {
                let current = args
                    .trigger
                    .as_deref()
                    .and_then(|t| t.parse::<TriggerPolicy>().ok())
                    .unwrap_or(default_trigger);
                current == *policy
            }
        }
    }
}

/// Definition of a single tag argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDefinition {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(flatten)]
    pub kind: ArgumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibilityRule>,
}

impl ArgumentDefinition {
    fn new(display_name: &str, kind: ArgumentKind) -> Self {
        Self {
            display_name: display_name.to_string(),
            help: None,
            kind,
            default_value: None,
            visible_when: None,
        }
    }

    fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    fn visible_when(mut self, rule: VisibilityRule) -> Self {
        self.visible_when = Some(rule);
        self
    }

    /// Whether the field should be hidden for the given arguments.
    pub fn is_hidden(&self, args: &TagArguments, default_trigger: TriggerPolicy) -> bool {
        self.visible_when
            .is_some_and(|rule| !rule.is_satisfied(args, default_trigger))
    }
}

fn trigger_option(policy: TriggerPolicy) -> EnumOption {
    let (display_name, description) = match policy {
        TriggerPolicy::Never => ("Never", "never resend request"),
        TriggerPolicy::NoHistory => ("No History", "resend when no responses present"),
        TriggerPolicy::WhenExpired => ("When Expired", "resend when existing response has expired"),
        TriggerPolicy::Always => ("Always", "resend request when needed"),
    };
    EnumOption {
        display_name: display_name.to_string(),
        description: Some(description.to_string()),
        value: policy.as_str().to_string(),
    }
}

/// The five arguments of the tag, in positional order.
pub fn argument_definitions(config: &ExtractorConfig) -> Vec<ArgumentDefinition> {
    vec![
        ArgumentDefinition::new(
            "Request",
            ArgumentKind::Model {
                model: "Request".to_string(),
            },
        ),
        ArgumentDefinition::new(
            "Attribute",
            ArgumentKind::Enum {
                options: vec![EnumOption {
                    display_name: "Request body".to_string(),
                    description: None,
                    value: "body".to_string(),
                }],
            },
        )
        .default_value(json!("body")),
        ArgumentDefinition::new("RegExp", ArgumentKind::String).default_value(json!("")),
        ArgumentDefinition::new(
            "Trigger Behavior",
            ArgumentKind::Enum {
                options: TriggerPolicy::ALL.into_iter().map(trigger_option).collect(),
            },
        )
        .help("Configure when to resend the dependent request")
        .default_value(json!(config.default_trigger.as_str())),
        ArgumentDefinition::new("Max age (seconds)", ArgumentKind::Number)
            .help("The maximum age of a response to use before it expires")
            .default_value(json!(config.default_max_age_secs))
            .visible_when(VisibilityRule::TriggerIs(TriggerPolicy::WhenExpired)),
    ]
}
