//! Approval mode of a rule.
//!
//! The mode is a closed enumeration. Its `Deserialize` impl is the decode
//! hook that rejects unknown literals while the document is being parsed,
//! so a decoded [`Rule`](crate::Rule) never carries an unknown mode.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::{ConfigurationError, ConfigurationResult};

/// How the approvals of the teams listed on a rule are aggregated.
///
/// # Examples
///
/// ```
/// use approval_policy::ApprovalMode;
///
/// let mode = ApprovalMode::try_new("require_any").unwrap();
/// assert_eq!(mode, ApprovalMode::RequireAny);
/// assert_eq!(mode.as_str(), "require_any");
///
/// assert!(ApprovalMode::try_new("REQUIRE_ANY").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalMode {
    /// Every listed team must approve the PR.
    RequireAll,

    /// At least one listed team must approve the PR.
    RequireAny,
}

impl ApprovalMode {
    /// All valid modes, in wire-literal order.
    pub const ALL: [ApprovalMode; 2] = [Self::RequireAll, Self::RequireAny];

    /// Parse a wire literal.
    ///
    /// Matching is exact and case-sensitive: only `require_all` and
    /// `require_any` are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidApprovalMode` carrying the
    /// offending literal for any other input, including the empty string.
    pub fn try_new(value: &str) -> ConfigurationResult<Self> {
        match value {
            "require_all" => Ok(Self::RequireAll),
            "require_any" => Ok(Self::RequireAny),
            other => Err(ConfigurationError::InvalidApprovalMode {
                value: other.to_string(),
            }),
        }
    }

    /// The wire literal for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequireAll => "require_all",
            Self::RequireAny => "require_any",
        }
    }
}

impl fmt::Display for ApprovalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl Serialize for ApprovalMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApprovalMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::try_new(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
#[path = "approval_mode_tests.rs"]
mod tests;
