//! Approval policy error types.
//!
//! Every failure of the codec is returned to the caller as a
//! [`ConfigurationError`]. Nothing in this crate logs, retries or swallows
//! an error; the first problem found aborts the whole decode or encode.

use std::io;

use thiserror::Error;

/// Errors raised while decoding or encoding an approval policy document.
///
/// The underlying parser or I/O failure is kept as the error's `source()`
/// so callers can walk the full cause chain.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The input stream failed before the whole document could be read.
    #[error("error decoding configuration: failed to read input: {source}")]
    Read {
        #[source]
        source: io::Error,
    },

    /// The input contained no YAML document at all.
    #[error("error decoding configuration: document is empty")]
    EmptyDocument,

    /// The document is not well-formed YAML, a field has the wrong shape,
    /// or an `approval_mode` literal was rejected by the decode hook.
    #[error("error decoding configuration: {source}")]
    Decode {
        #[source]
        source: serde_yaml::Error,
    },

    /// A string outside the closed set of approval modes.
    #[error("{value:?} is not a valid approval mode")]
    InvalidApprovalMode { value: String },

    /// The configuration could not be serialized.
    #[error("error encoding configuration: {source}")]
    Encode {
        #[source]
        source: serde_yaml::Error,
    },

    /// The output stream failed while the document was being written.
    #[error("error encoding configuration: failed to write output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
}

impl ConfigurationError {
    /// Position in the input document where decoding failed, if the parser
    /// reported one.
    pub fn location(&self) -> Option<serde_yaml::Location> {
        match self {
            Self::Decode { source } => source.location(),
            _ => None,
        }
    }
}

/// Result type alias for approval policy operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
