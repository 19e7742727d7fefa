use std::path::PathBuf;

use thiserror::Error;

use super::Stage;
use crate::model::ResourceKind;
use crate::remote::{BulkResponse, TransportError};
use crate::resolve::ResolveError;

/// Why the remote side did not accept a submission.
#[derive(Debug, Error)]
pub enum SubmissionCause {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("remote rejected {rejected} of {total} sub-requests (status {status}: {message})")]
    Rejected {
        rejected: usize,
        total: usize,
        status: u16,
        message: String,
    },
}

impl SubmissionCause {
    pub(crate) fn rejected(response: &BulkResponse) -> Option<Self> {
        let mut failed = response.failed_results();
        let first = failed.next()?;
        let message = first
            .body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("no message")
            .to_string();
        Some(SubmissionCause::Rejected {
            rejected: 1 + failed.count(),
            total: response.results.len(),
            status: first.status,
            message,
        })
    }
}

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("read answer file {}", path.display())]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not resolve {kind} '{name}'")]
    Resolution {
        kind: ResourceKind,
        name: String,
        #[source]
        source: ResolveError,
    },

    #[error("encode {what}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("submit {what}")]
    Submission {
        what: &'static str,
        #[source]
        source: SubmissionCause,
    },

    #[error("cancelled while {stage}")]
    Cancelled { stage: Stage },
}

impl DeployError {
    pub(crate) fn resolution(source: ResolveError) -> Self {
        let (kind, name) = match &source {
            ResolveError::EmptyName { kind } => (*kind, String::new()),
            ResolveError::NotFound { kind, name } | ResolveError::Transport { kind, name, .. } => {
                (*kind, name.clone())
            }
        };
        DeployError::Resolution { kind, name, source }
    }

    /// Stage the operation was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            DeployError::PayloadRead { .. } => Stage::Start,
            DeployError::Resolution { .. } => Stage::Resolving,
            DeployError::Encode { .. } => Stage::Composing,
            DeployError::Submission { .. } => Stage::Submitting,
            DeployError::Cancelled { stage } => *stage,
        }
    }

    /// Resource that could not be resolved, if that is why the run failed.
    pub fn unresolved(&self) -> Option<(ResourceKind, &str)> {
        match self {
            DeployError::Resolution { kind, name, .. } => Some((*kind, name)),
            _ => None,
        }
    }
}
