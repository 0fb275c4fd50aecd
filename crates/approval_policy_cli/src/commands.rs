//! Implementation of the `validate` and `format` commands.
//!
//! Both commands locate the policy file, decode it with
//! [`approval_policy::read_configuration`] and report the result. `format`
//! additionally writes the canonical encoding back to disk.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use approval_policy::{
    read_configuration, Configuration, ConfigurationError, CONFIGURATION_FILE_PATH,
};
use clap::Args;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use crate::errors::Error;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Arguments shared by the commands that operate on a policy file.
#[derive(Args, Debug, Clone)]
pub struct PolicyFileArgs {
    /// Path to the policy file. Overrides the conventional location.
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Repository root used to find the policy file at its conventional location.
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,
}

impl PolicyFileArgs {
    /// The policy file these arguments point at.
    pub fn policy_path(&self) -> PathBuf {
        resolve_policy_path(self.path.as_deref(), &self.repo_root)
    }
}

/// Counts reported by a successful `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicySummary {
    pub rule_sets: usize,
    pub rules: usize,
    pub alerts: usize,
}

impl PolicySummary {
    fn of(config: &Configuration) -> Self {
        Self {
            rule_sets: config.pull_request_approval_rules.len(),
            rules: config.rules().count(),
            alerts: config.alerts().count(),
        }
    }
}

/// Result of a `format` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The file was already in canonical form.
    Unchanged,
    /// The file was rewritten in canonical form.
    Rewritten,
}

/// Pick the explicit path if one was given, otherwise the conventional
/// location under the repository root.
pub fn resolve_policy_path(path: Option<&Path>, repo_root: &Path) -> PathBuf {
    match path {
        Some(path) => path.to_path_buf(),
        None => repo_root.join(CONFIGURATION_FILE_PATH),
    }
}

/// Decode the policy file and summarize it.
#[instrument]
pub fn validate(path: &Path) -> Result<PolicySummary, Error> {
    debug!(message = "Validating policy file", path = ?path);

    let file = File::open(path).map_err(|source| Error::LoadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = read_configuration(BufReader::new(file)).map_err(|source| {
        Error::InvalidPolicy {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let summary = PolicySummary::of(&config);
    info!(
        message = "Policy file is valid",
        path = ?path,
        rule_sets = summary.rule_sets,
        rules = summary.rules,
        alerts = summary.alerts
    );
    Ok(summary)
}

/// Options for a `format` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Report instead of writing when the file is not in canonical form.
    pub check: bool,

    /// Rewrite even though the canonical form drops the file's comments.
    pub discard_comments: bool,
}

/// Rewrite the policy file in canonical form.
///
/// The canonical encoding carries no comments, so a file with comments is
/// left untouched and reported as `Error::CommentsWouldBeLost` unless
/// `discard_comments` is set. With `check` set nothing is written; a file
/// that would change is reported as `Error::NotFormatted`.
///
/// The new content is written to a temporary file next to the policy and
/// then renamed over it, so a failed write leaves the original in place.
#[instrument]
pub fn format(path: &Path, options: FormatOptions) -> Result<FormatOutcome, Error> {
    debug!(message = "Formatting policy file", path = ?path, ?options);

    let content = fs::read_to_string(path).map_err(|source| Error::LoadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = Configuration::from_yaml_str(&content).map_err(|source| {
        Error::InvalidPolicy {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let canonical = config.to_yaml_string().map_err(|source| Error::SaveFile {
        path: path.to_path_buf(),
        source,
    })?;

    if canonical == content {
        debug!(message = "Policy file already formatted", path = ?path);
        return Ok(FormatOutcome::Unchanged);
    }

    if options.check {
        return Err(Error::NotFormatted {
            path: path.to_path_buf(),
        });
    }

    let comments = comment_lines(&content);
    if !comments.is_empty() {
        if !options.discard_comments {
            return Err(Error::CommentsWouldBeLost {
                path: path.to_path_buf(),
                lines: comments,
            });
        }
        warn!(
            message = "Discarding comments from policy file",
            path = ?path,
            lines = ?comments
        );
    }

    replace_file(path, &config).map_err(|source| Error::SaveFile {
        path: path.to_path_buf(),
        source,
    })?;

    info!(message = "Policy file rewritten", path = ?path);
    Ok(FormatOutcome::Rewritten)
}

/// Atomically replace `path` with the encoding of `config`, keeping the
/// original file's permissions.
fn replace_file(path: &Path, config: &Configuration) -> Result<(), ConfigurationError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp =
        NamedTempFile::new_in(parent).map_err(|source| ConfigurationError::Write { source })?;
    config.write(&mut temp)?;

    let permissions = fs::metadata(path)
        .map_err(|source| ConfigurationError::Write { source })?
        .permissions();
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|source| ConfigurationError::Write { source })?;

    temp.persist(path)
        .map_err(|e| ConfigurationError::Write { source: e.error })?;
    Ok(())
}

/// 1-based numbers of the lines that carry a YAML comment.
///
/// A `#` starts a comment at the beginning of a line or after whitespace,
/// outside single- and double-quoted scalars. Quoted scalars are tracked
/// per line only, and a quote opens one only where a scalar can start.
fn comment_lines(content: &str) -> Vec<usize> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| has_comment(line))
        .map(|(index, _)| index + 1)
        .collect()
}

fn has_comment(line: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut previous: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some('"') if c == '\\' => {
                chars.next();
            }
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None => match c {
                '#' if previous.map_or(true, char::is_whitespace) => return true,
                '\'' | '"'
                    if previous.map_or(true, |p| {
                        p.is_whitespace() || matches!(p, '[' | '{' | ',' | ':' | '-')
                    }) =>
                {
                    quote = Some(c)
                }
                _ => {}
            },
        }
        previous = Some(c);
    }

    false
}
