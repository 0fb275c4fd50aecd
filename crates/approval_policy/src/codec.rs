//! YAML codec for the approval policy document.
//!
//! Decoding reads the whole input, parses it and validates approval modes
//! in a single pass. It yields either a complete [`Configuration`] or an
//! error, never a partially populated value. Encoding is the inverse: any
//! configuration produced by decoding encodes to a document that decodes
//! back to an equal value.

use std::io::{Read, Write};
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::{Configuration, ConfigurationError, ConfigurationResult};

/// Read a [`Configuration`] from the provided reader.
///
/// The reader is consumed to the end before parsing starts.
///
/// # Errors
///
/// - `ConfigurationError::Read` if the reader fails.
/// - `ConfigurationError::EmptyDocument` if the input holds no YAML content.
/// - `ConfigurationError::Decode` for malformed YAML, fields of the wrong
///   shape, and approval modes outside the closed set.
///
/// # Examples
///
/// ```
/// use approval_policy::{read_configuration, ApprovalMode};
///
/// let yaml = b"
/// pull_request_approval_rules:
///   - target_branches: [main]
///     rules:
///       - approving_team_handles: [platform]
///         approval_mode: require_any
/// ";
///
/// let config = read_configuration(&yaml[..])?;
/// let rule = config.rules().next().unwrap();
/// assert_eq!(rule.approval_mode, Some(ApprovalMode::RequireAny));
/// # Ok::<(), approval_policy::ConfigurationError>(())
/// ```
#[instrument(skip_all)]
pub fn read_configuration<R: Read>(mut reader: R) -> ConfigurationResult<Configuration> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .map_err(|source| ConfigurationError::Read { source })?;

    Configuration::from_yaml_slice(&content)
}

impl Configuration {
    /// Parse a configuration from an in-memory YAML document.
    ///
    /// See [`read_configuration`] for the error contract.
    pub fn from_yaml_str(content: &str) -> ConfigurationResult<Self> {
        Self::from_yaml_slice(content.as_bytes())
    }

    /// Parse a configuration from raw YAML bytes.
    ///
    /// Bytes that are not valid YAML text, including invalid UTF-8, are a
    /// `ConfigurationError::Decode`. A stream holding more than one
    /// document is rejected rather than truncated to its first document.
    #[instrument(skip_all)]
    pub fn from_yaml_slice(content: &[u8]) -> ConfigurationResult<Self> {
        if is_empty_stream(content) {
            return Err(ConfigurationError::EmptyDocument);
        }

        let config: Configuration = serde_yaml::from_slice(content)
            .map_err(|source| ConfigurationError::Decode { source })?;

        debug!(
            rule_sets = config.pull_request_approval_rules.len(),
            rules = config.rules().count(),
            alerts = config.alerts().count(),
            "Decoded approval policy"
        );

        Ok(config)
    }

    /// Serialize this configuration to a YAML document.
    pub fn to_yaml_string(&self) -> ConfigurationResult<String> {
        serde_yaml::to_string(self).map_err(|source| ConfigurationError::Encode { source })
    }

    /// Write this configuration as YAML to the provided writer.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::Encode` if serialization fails.
    /// - `ConfigurationError::Write` if the writer fails.
    #[instrument(skip_all)]
    pub fn write<W: Write>(&self, mut writer: W) -> ConfigurationResult<()> {
        let content = self.to_yaml_string()?;

        writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| ConfigurationError::Write { source })?;

        debug!(bytes = content.len(), "Encoded approval policy");
        Ok(())
    }
}

impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_yaml_str(s)
    }
}

/// Whether the YAML stream holds no document at all.
///
/// A stream without a document is made only of blank lines, comments and
/// `...` document-end markers. A `---` marker or a `%` directive always
/// opens a document, even an empty one. The parser reports an empty stream
/// and an explicitly empty document identically, so the distinction is
/// made on the raw text.
fn is_empty_stream(content: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(content) else {
        return false;
    };

    text.trim_start_matches('\u{feff}').lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || is_document_end(line)
    })
}

fn is_document_end(line: &str) -> bool {
    match line.strip_prefix("...") {
        Some("") => true,
        Some(rest) => {
            rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with('#')
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
