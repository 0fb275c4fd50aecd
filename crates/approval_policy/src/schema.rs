//! Typed model of the approval policy document.
//!
//! The document is a list of [`PullRequestApprovalRule`]s, each binding a
//! set of target branches to its [`Rule`]s and [`Alert`]s:
//!
//! ```yaml
//! pull_request_approval_rules:
//!   - target_branches: [main]
//!     alerts:
//!       - regex: "- \\[x\\] Emergency"
//!         slack_webhook_secret: EMERGENCY_SLACK_WEBHOOK
//!         slack_message: "Emergency change merged"
//!     rules:
//!       - regex: "- \\[x\\] Standard change"
//!         approving_team_handles: [platform, security]
//!         approval_mode: require_all
//!         labels: [standard]
//! ```
//!
//! Optional fields that are absent or `null` decode to their empty value,
//! so a caller cannot tell "omitted" from "explicitly empty".

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ApprovalMode;

/// Root of the approval policy document.
///
/// Rule sets keep document order; the evaluation engine walks them in that
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration {
    /// Rule sets, one per group of target branches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pull_request_approval_rules: Vec<PullRequestApprovalRule>,
}

/// Associates a set of rules and alerts with a set of target branches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PullRequestApprovalRule {
    /// Rules applied to PRs targeting one of the branches below.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,

    /// Alerts to fire when a matching PR is merged.
    #[serde(default, deserialize_with = "null_as_default")]
    pub alerts: Vec<Alert>,

    /// Target branch names of the PR. May be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_branches: Vec<String>,
}

/// Approval requirements for PRs that match a particular pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rule {
    /// Pattern matched against the PR body. Empty when not set.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub regex: String,

    /// Pattern matched against the PR labels. Empty when not set.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub regex_label: String,

    /// Directories to check for changes. Empty means all directories.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub directories: Vec<String>,

    /// IDs, slugs or names of the teams whose approval counts for this rule.
    #[serde(default, deserialize_with = "null_as_default")]
    pub approving_team_handles: Vec<String>,

    /// How approvals from the teams above are aggregated. `None` when the
    /// document leaves the mode unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_mode: Option<ApprovalMode>,

    /// Labels to add to the PR depending on whether it matches.
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,

    /// Approve the PR regardless of the current state of its reviews.
    #[serde(default, deserialize_with = "yaml11_bool")]
    pub force_approval: bool,

    /// Only count an approval from a reviewer who has neither pushed nor
    /// co-authored a commit on the branch being merged. Merges of the base
    /// branch through the UI are not treated as contributions.
    #[serde(default, deserialize_with = "yaml11_bool")]
    pub ignore_contributor_approval: bool,
}

/// Notification sent when a PR whose body matches `regex` is merged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alert {
    /// Pattern matched against the PR body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub regex: String,

    /// Name of the secret holding the Slack webhook URL. The URL itself is
    /// sensitive and never appears in the document.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slack_webhook_secret: String,

    /// Message template posted to Slack.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slack_message: String,
}

impl Configuration {
    /// Iterate over every rule in document order, across all rule sets.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.pull_request_approval_rules
            .iter()
            .flat_map(|set| set.rules.iter())
    }

    /// Iterate over every alert in document order, across all rule sets.
    pub fn alerts(&self) -> impl Iterator<Item = &Alert> {
        self.pull_request_approval_rules
            .iter()
            .flat_map(|set| set.alerts.iter())
    }
}

/// Decode `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a flag that may be written with the YAML 1.1 boolean literals
/// (`yes`/`no`, `on`/`off`, `y`/`n`) existing policy files rely on.
/// `null` decodes as `false`.
fn yaml11_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(Yaml11BoolVisitor)
}

struct Yaml11BoolVisitor;

impl<'de> Visitor<'de> for Yaml11BoolVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean")
    }

    fn visit_bool<E>(self, value: bool) -> Result<bool, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_str<E>(self, value: &str) -> Result<bool, E>
    where
        E: de::Error,
    {
        match value {
            "y" | "Y" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => {
                Ok(true)
            }
            "n" | "N" | "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False"
            | "FALSE" => Ok(false),
            other => Err(E::invalid_value(Unexpected::Str(other), &self)),
        }
    }

    fn visit_unit<E>(self) -> Result<bool, E>
    where
        E: de::Error,
    {
        Ok(false)
    }

    fn visit_none<E>(self) -> Result<bool, E>
    where
        E: de::Error,
    {
        Ok(false)
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
