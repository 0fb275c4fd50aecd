use std::io;
use std::path::PathBuf;

use approval_policy::ConfigurationError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the approval policy CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// The policy file could not be opened or read.
    ///
    /// Returned for missing files, permission problems and other
    /// file-system failures before any YAML is parsed.
    #[error("Failed to load policy file {}: {source}", .path.display())]
    LoadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The policy file was read but is not a valid approval policy.
    #[error("Invalid policy file {}: {source}", .path.display())]
    InvalidPolicy {
        path: PathBuf,
        #[source]
        source: ConfigurationError,
    },

    /// The canonical form of the policy could not be written back.
    #[error("Failed to save policy file {}: {source}", .path.display())]
    SaveFile {
        path: PathBuf,
        #[source]
        source: ConfigurationError,
    },

    /// Formatting would remove the comments on the listed lines.
    ///
    /// The canonical encoding has no comments; `format` refuses to drop
    /// them unless asked to with `--discard-comments`.
    #[error(
        "Policy file {} has comments on line(s) {lines:?} that formatting would remove; pass --discard-comments to format it anyway",
        .path.display()
    )]
    CommentsWouldBeLost { path: PathBuf, lines: Vec<usize> },

    /// `format --check` found a file that is not in canonical form.
    #[error("Policy file {} is not formatted", .path.display())]
    NotFormatted { path: PathBuf },
}
