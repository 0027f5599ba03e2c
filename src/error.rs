//! Application error types using thiserror
//!
//! Error hierarchy:
//! - LockFileError: Malformed lock file content
//! - VcsError: Failures talking to git
//! - ReportError: Failures delivering a report to an external service
//! - ConfigError: Invalid CLI or environment configuration
//!
//! The diff engine itself has no error type: it is total over its inputs.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::LockFileKind;

/// Errors that abort a scan before any lock file is read
///
/// Lock file and reporter errors never abort: the scanner records the former
/// per file and the report runner logs the latter.
#[derive(Error, Debug)]
pub enum AppError {
    /// Version control related errors
    #[error(transparent)]
    Vcs(#[from] VcsError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to lock file parsing
#[derive(Error, Debug)]
pub enum LockFileError {
    /// TOML parsing error (Cargo.lock, poetry.lock, uv.lock)
    #[error("failed to parse TOML in {kind}: {message}")]
    TomlParseError { kind: &'static str, message: String },

    /// JSON parsing error (composer.lock, package-lock.json)
    #[error("failed to parse JSON in {kind}: {message}")]
    JsonParseError { kind: &'static str, message: String },

    /// No parser for this file
    #[error("unsupported lock file: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Errors related to git
#[derive(Error, Debug)]
pub enum VcsError {
    /// The working directory is not inside a git work tree
    #[error("not a git repository: {path}")]
    NotARepository { path: PathBuf },

    /// The revision does not resolve to a commit
    #[error("unknown revision '{revision}'")]
    UnknownRevision { revision: String },

    /// git exited with a failure status
    #[error("`git {command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// git could not be started
    #[error("failed to run git: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to delivering reports
#[derive(Error, Debug)]
pub enum ReportError {
    /// Network request failed
    #[error("{reporter} request failed: {message}")]
    NetworkError { reporter: String, message: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {reporter}")]
    RateLimitExceeded { reporter: String },

    /// Timeout
    #[error("timeout while sending report to {reporter}")]
    Timeout { reporter: String },

    /// Invalid response from the service
    #[error("invalid response from {reporter}: {message}")]
    InvalidResponse { reporter: String, message: String },

    /// Authentication error
    #[error("authentication failed for {reporter}: {message}")]
    AuthenticationError { reporter: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid working directory
    #[error("invalid working directory '{path}': {message}")]
    InvalidWorkingDir { path: PathBuf, message: String },

    /// Invalid environment variable value
    #[error("invalid value '{value}' for {name}: {message}")]
    InvalidEnv {
        name: String,
        value: String,
        message: String,
    },
}

impl LockFileError {
    /// Creates a new TomlParseError
    pub fn toml_parse_error(kind: LockFileKind, message: impl Into<String>) -> Self {
        LockFileError::TomlParseError {
            kind: kind.filename(),
            message: message.into(),
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(kind: LockFileKind, message: impl Into<String>) -> Self {
        LockFileError::JsonParseError {
            kind: kind.filename(),
            message: message.into(),
        }
    }

    /// Creates a new UnsupportedFormat error
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        LockFileError::UnsupportedFormat { path: path.into() }
    }
}

impl VcsError {
    /// Creates a new NotARepository error
    pub fn not_a_repository(path: impl Into<PathBuf>) -> Self {
        VcsError::NotARepository { path: path.into() }
    }

    /// Creates a new UnknownRevision error
    pub fn unknown_revision(revision: impl Into<String>) -> Self {
        VcsError::UnknownRevision {
            revision: revision.into(),
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        VcsError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl ReportError {
    /// Creates a new NetworkError
    pub fn network_error(reporter: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::NetworkError {
            reporter: reporter.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(reporter: impl Into<String>) -> Self {
        ReportError::RateLimitExceeded {
            reporter: reporter.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(reporter: impl Into<String>) -> Self {
        ReportError::Timeout {
            reporter: reporter.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(reporter: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::InvalidResponse {
            reporter: reporter.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidWorkingDir error
    pub fn invalid_working_dir(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::InvalidWorkingDir {
            path: path.into(),
            message: message.into(),
        }
    }
}
