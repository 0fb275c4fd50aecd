//! Team approval policy for pull requests.
//!
//! A repository describes, per set of target branches, which teams must
//! approve a pull request before it can merge. The policy lives in a YAML
//! document at [`CONFIGURATION_FILE_PATH`] and is read with
//! [`read_configuration`].
//!
//! This crate owns the typed model and its codec only. Matching rules
//! against a pull request, talking to the source-control host and sending
//! Slack alerts are the job of the consumers of [`Configuration`].
//!
//! ```
//! use approval_policy::{ApprovalMode, Configuration};
//!
//! let config: Configuration = r#"
//! pull_request_approval_rules:
//!   - target_branches: [main]
//!     rules:
//!       - regex: "- \\[x\\] Breaking change"
//!         approving_team_handles: [architecture, platform]
//!         approval_mode: require_all
//! "#
//! .parse()?;
//!
//! let rule = config.rules().next().unwrap();
//! assert_eq!(rule.approval_mode, Some(ApprovalMode::RequireAll));
//! assert_eq!(rule.approving_team_handles, ["architecture", "platform"]);
//! # Ok::<(), approval_policy::ConfigurationError>(())
//! ```

pub mod approval_mode;
pub mod codec;
pub mod errors;
pub mod schema;

pub use approval_mode::ApprovalMode;
pub use codec::read_configuration;
pub use errors::{ConfigurationError, ConfigurationResult};
pub use schema::{Alert, Configuration, PullRequestApprovalRule, Rule};

/// Location of the policy document, relative to the root of the repository.
pub const CONFIGURATION_FILE_PATH: &str = ".github/GITHUB_TEAM_APPROVER.yaml";
