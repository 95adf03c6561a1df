//! Client error types.
//!
//! Per-candidate failures ([`AttemptError`]) never escape the dispatcher on
//! their own; they are folded into [`DispatchError::Exhausted`] once every
//! candidate has been tried. Coordinators turn both dispatch and validation
//! failures into [`OperationError`] and an operator notification.

use lec_core::enums::OperationKind;
use lec_core::errors::CoreError;
use thiserror::Error;

use crate::transport::Method;

/// Connectivity or low-level failure below the HTTP status layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP transport error from reqwest (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport.
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Why a single candidate did not succeed.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Not-found or bad-request: the endpoint or body shape is probably wrong.
    #[error("{method} {path} returned {status}: {message}")]
    ShapeMismatch {
        method: Method,
        path: String,
        status: u16,
        message: String,
    },

    /// Any other non-success status.
    #[error("{method} {path} returned {status}: {message}")]
    Rejected {
        method: Method,
        path: String,
        status: u16,
        message: String,
    },

    /// The request never produced a status.
    #[error("{method} {path} failed: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: TransportError,
    },
}

impl AttemptError {
    /// Label used in logs to tell failure classes apart.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "shape_mismatch",
            Self::Rejected { .. } => "rejected",
            Self::Transport { .. } => "transport_failure",
        }
    }

    /// HTTP status, when one was observed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ShapeMismatch { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Terminal outcome of a candidate search that found no working endpoint.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No catalog entry could be rendered with the parameters supplied.
    #[error("no candidate endpoint for {kind}: {reason}")]
    NoCandidates { kind: OperationKind, reason: String },

    /// Every candidate was tried and none succeeded.
    #[error("all {attempts} candidate endpoints for {kind} failed; last error: {last}")]
    Exhausted {
        kind: OperationKind,
        attempts: usize,
        last: Box<AttemptError>,
    },
}

impl DispatchError {
    /// The message of the last underlying error, for operator notifications.
    #[must_use]
    pub fn last_message(&self) -> String {
        match self {
            Self::NoCandidates { reason, .. } => reason.clone(),
            Self::Exhausted { last, .. } => last.to_string(),
        }
    }

    /// Number of candidates attempted before giving up.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        match self {
            Self::NoCandidates { .. } => 0,
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Failure of a coordinated operation, as reported to the caller.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Local validation rejected the request before any network attempt.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// No chapter was supplied and none is selected on the page.
    #[error("no chapter selected")]
    MissingChapter,

    /// The save batch contained no questions.
    #[error("no questions to save")]
    EmptyBatch,

    /// Every candidate endpoint failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A fetch succeeded but no question list could be located in the body.
    #[error("unrecognized response body from {path}")]
    UnrecognizedBody { path: String },
}

impl OperationError {
    /// Whether the failure happened before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::MissingChapter | Self::EmptyBatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_message_carries_last_error() {
        let err = DispatchError::Exhausted {
            kind: OperationKind::Delete,
            attempts: 7,
            last: Box::new(AttemptError::ShapeMismatch {
                method: Method::Delete,
                path: "/api/v1/questions/q-1".into(),
                status: 404,
                message: "no such route".into(),
            }),
        };
        assert_eq!(err.attempts(), 7);
        assert_eq!(
            err.last_message(),
            "DELETE /api/v1/questions/q-1 returned 404: no such route"
        );
        assert!(err.to_string().starts_with("all 7 candidate endpoints for delete failed"));
    }

    #[test]
    fn labels_distinguish_failure_classes() {
        let transport = AttemptError::Transport {
            method: Method::Post,
            path: "/api/questions".into(),
            source: TransportError::Connection("reset by peer".into()),
        };
        assert_eq!(transport.label(), "transport_failure");
        assert_eq!(transport.status(), None);
        assert!(transport.to_string().contains("reset by peer"));
    }

    #[test]
    fn validation_errors_are_flagged() {
        assert!(OperationError::MissingChapter.is_validation());
        assert!(OperationError::EmptyBatch.is_validation());
        let dispatch = OperationError::Dispatch(DispatchError::NoCandidates {
            kind: OperationKind::Save,
            reason: "no chapter".into(),
        });
        assert!(!dispatch.is_validation());
    }
}
