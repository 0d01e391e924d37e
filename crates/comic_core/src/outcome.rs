use std::fmt;

use crate::{Comic, JobId};

/// Error returned by a comic fetcher for one job.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "json decode error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// What a worker produced for one consumed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The server returned a comic payload.
    Retrieved { job_id: JobId, comic: Comic },
    /// The server answered with a non-success status: no data for this id.
    Missing { job_id: JobId, status: u16 },
    /// Transport, timeout, size or decode failure.
    Failed { job_id: JobId, error: FetchError },
}

impl JobOutcome {
    /// Classify a fetch result. Non-success statuses are "no data", not failures.
    pub fn from_fetch(job_id: JobId, result: Result<Comic, FetchError>) -> Self {
        match result {
            Ok(comic) => JobOutcome::Retrieved { job_id, comic },
            Err(FetchError {
                kind: FailureKind::HttpStatus(status),
                ..
            }) => JobOutcome::Missing { job_id, status },
            Err(error) => JobOutcome::Failed { job_id, error },
        }
    }

    pub fn job_id(&self) -> JobId {
        match self {
            JobOutcome::Retrieved { job_id, .. }
            | JobOutcome::Missing { job_id, .. }
            | JobOutcome::Failed { job_id, .. } => *job_id,
        }
    }
}
