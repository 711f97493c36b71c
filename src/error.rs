use crate::domain::ReleaseStage;
use thiserror::Error;

/// Unified error type for release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External command failed ({status}): {command}\nStdout: {stdout}\nStderr: {stderr}")]
    ExternalCommand {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    #[error("Malformed version: {0}")]
    MalformedVersion(String),

    #[error("Unsupported version format: {0}")]
    UnsupportedVersionFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Release failed at stage '{stage}': {source}")]
    StageFailed {
        stage: ReleaseStage,
        completed: Vec<ReleaseStage>,
        source: Box<ReleaseError>,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry parse error: {0}")]
    Registry(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    Settings(#[from] toml::de::Error),
}

/// Convenience type alias for Results in app-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        ReleaseError::Validation(msg.into())
    }

    /// Create a malformed version error with context
    pub fn malformed_version(msg: impl Into<String>) -> Self {
        ReleaseError::MalformedVersion(msg.into())
    }

    /// Create an unsupported version format error with context
    pub fn unsupported_version_format(msg: impl Into<String>) -> Self {
        ReleaseError::UnsupportedVersionFormat(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create an external command error from a finished process
    pub fn external_command(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        let status = match exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        ReleaseError::ExternalCommand {
            command: command.into(),
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// True when the failure was detected before any external side effect
    /// could have happened.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReleaseError::Validation(_)
                | ReleaseError::MalformedVersion(_)
                | ReleaseError::UnsupportedVersionFormat(_)
                | ReleaseError::Config(_)
                | ReleaseError::Registry(_)
                | ReleaseError::Settings(_)
        )
    }

    /// The pipeline stage that failed, if the error came out of the pipeline
    pub fn failed_stage(&self) -> Option<ReleaseStage> {
        match self {
            ReleaseError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Unwraps a stage failure down to the error that caused it
    pub fn root_cause(&self) -> &ReleaseError {
        match self {
            ReleaseError::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
