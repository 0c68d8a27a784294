//! Error types for harness operations.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for sandbox, chain, batch and assertion operations.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The sandbox directory could not be allocated.
    #[error("failed to create sandbox: {0}")]
    SandboxSetup(#[source] std::io::Error),

    /// The external tool exited non-zero or could not be launched.
    #[error("{operation} failed (exit code {}): {stderr}", describe_exit(*exit_code))]
    ToolFailed {
        /// Operation that invoked the tool (e.g. "add page about")
        operation: String,
        /// Process exit code, absent on launch failure
        exit_code: Option<i32>,
        /// Standard error, or the launch error message
        stderr: String,
    },

    /// The tool reported success but the expected filesystem effect is absent.
    #[error("{operation} reported success but {detail}")]
    MissingEffect {
        /// Operation that was verified
        operation: String,
        /// What was expected and not found
        detail: String,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFile {
        /// Path that was written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A YAML document failed to parse.
    #[error("failed to parse YAML in {}: {source}", path.display())]
    ParseYaml {
        /// Path of the document
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// A JSON document failed to parse.
    #[error("failed to parse JSON in {}: {source}", path.display())]
    ParseJson {
        /// Path of the document
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// A queued assertion did not hold.
    #[error("{message}: {detail}")]
    Assertion {
        /// Caller-supplied failure message
        message: String,
        /// Actual-vs-expected context
        detail: String,
    },

    /// No timing was recorded under the given name.
    #[error("no measurement recorded for operation '{name}'")]
    MissingMeasurement {
        /// Operation name
        name: String,
    },

    /// A timed operation did not finish under its limit.
    #[error("operation '{name}' took {elapsed:?}, expected less than {limit:?}")]
    TooSlow {
        /// Operation name
        name: String,
        /// Recorded duration
        elapsed: Duration,
        /// Exclusive upper bound
        limit: Duration,
    },

    /// The caller asked for something the sandbox cannot do.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error (loading, parsing).
    #[error("configuration error: {0}")]
    Config(String),
}

impl HarnessError {
    /// True when the tool itself reported failure, as opposed to a missing effect.
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, Self::ToolFailed { .. })
    }

    pub(crate) fn assertion(message: &str, detail: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.to_string(),
            detail: detail.into(),
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Convenience Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
