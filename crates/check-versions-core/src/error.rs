//! Error types for a single tool check.
//!
//! Every variant is recoverable at the level of one tool: the driver catches
//! it, reports "could not check" for that tool and moves on.

use std::time::Duration;
use thiserror::Error;

/// Failure of one stage of a tool's check pipeline.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The binary is not on PATH, or the shell answered "command not found".
    #[error("'{binary}' is not installed or not on PATH")]
    ToolNotPresent { binary: String },

    /// The binary ran but exited unsuccessfully without printing anything usable.
    #[error("'{binary} --version' exited with code {code:?}")]
    ProbeFailed { binary: String, code: Option<i32> },

    /// A probe or registry request exceeded its time bound.
    #[error("{what} timed out after {} seconds", .after.as_secs())]
    Timeout { what: String, after: Duration },

    /// The registry request could not complete.
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    BadStatus { url: String, status: u16 },

    /// The registry body was not the expected JSON shape.
    #[error("Unexpected response from {url}: {message}")]
    BadBody { url: String, message: String },

    /// No `MAJOR.MINOR.PATCH` run was found in the given text.
    #[error("No version found in {input:?}")]
    Extraction { input: String },

    /// Spawning the probe failed for a reason other than a missing binary.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse grouping of [`CheckError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ToolNotPresent,
    NetworkFailure,
    BadResponse,
    ExtractionFailure,
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::ToolNotPresent { .. }
            | CheckError::ProbeFailed { .. }
            | CheckError::Io(_) => ErrorKind::ToolNotPresent,
            CheckError::Network { .. } | CheckError::Timeout { .. } => ErrorKind::NetworkFailure,
            CheckError::BadStatus { .. } | CheckError::BadBody { .. } => ErrorKind::BadResponse,
            CheckError::Extraction { .. } => ErrorKind::ExtractionFailure,
        }
    }
}

/// Result type alias for check operations.
pub type Result<T> = std::result::Result<T, CheckError>;
