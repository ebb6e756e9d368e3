//! Error types for ydl-job
//!
//! Every error is local to a single [`DownloadJob`](crate::DownloadJob), a single
//! compile call, or a single [`JobQueue`](crate::JobQueue) operation; there is no
//! shared error state.

use crate::types::JobId;
use thiserror::Error;

/// Result type alias for ydl-job operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ydl-job
#[derive(Debug, Error)]
pub enum Error {
    /// Stage text outside the closed Queued/Active/Paused/Completed/Error set
    #[error("invalid stage: {0}")]
    InvalidStage(String),

    /// Reset attempted while the job is still running
    #[error("cannot reset job {id} while it is active")]
    IllegalReset {
        /// The job that refused the reset
        id: JobId,
    },

    /// Progress update payload was not a mapping
    #[error("malformed progress update: {0}")]
    MalformedInput(String),

    /// Human-readable size string could not be converted to bytes
    #[error("unparseable size string: {value:?}")]
    UnitParse {
        /// The offending size text, as reported by the external tool
        value: String,
    },

    /// Configuration mapping lacks a key the compiler depends on
    #[error("missing configuration key: {key}")]
    MissingConfigKey {
        /// The first missing key, in declaration order
        key: String,
    },

    /// Configuration key is present but holds an unusable value
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "retries")
        key: Option<String>,
    },

    /// JSON text could not be parsed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A job with the same identity is already registered
    #[error("duplicate job: {0}")]
    Duplicate(JobId),

    /// Job not registered in the queue
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// Operation refused because the job is active
    #[error("job {0} is active")]
    JobActive(JobId),
}

impl Error {
    /// Machine-readable error code
    ///
    /// Stable snake_case identifiers the UI layer can match on without parsing
    /// the display text.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidStage(_) => "invalid_stage",
            Error::IllegalReset { .. } => "illegal_reset",
            Error::MalformedInput(_) => "malformed_input",
            Error::UnitParse { .. } => "unit_parse_error",
            Error::MissingConfigKey { .. } => "missing_config_key",
            Error::Config { .. } => "config_error",
            Error::Serialization(_) => "serialization_error",
            Error::Duplicate(_) => "duplicate",
            Error::NotFound(_) => "not_found",
            Error::JobActive(_) => "job_active",
        }
    }

    /// Whether the error only invalidates a single field of an otherwise
    /// applied update
    ///
    /// [`DownloadJob::update`](crate::DownloadJob::update) reports a bad size
    /// string after it has applied every other field, so callers can log it and
    /// keep feeding progress lines.
    pub fn is_field_level(&self) -> bool {
        matches!(self, Error::UnitParse { .. })
    }
}
