//! Sequential search over candidate endpoints.
//!
//! Candidates are tried strictly one after another; the next request is not
//! sent until the current one has settled, so one dispatch never has more
//! than one write in flight. Any failure (wrong shape, other status,
//! transport error) moves on to the next candidate. Only when the list is
//! exhausted does the dispatch fail, carrying the last error observed.

use lec_core::enums::OperationKind;
use serde_json::Value;

use crate::catalog::{Candidate, PathParams};
use crate::error::{AttemptError, DispatchError};
use crate::payload::{SaveBatch, build_body};
use crate::session::SessionContext;
use crate::transport::{Transport, WireRequest, WireResponse};

/// A candidate that the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptSuccess {
    pub candidate: Candidate,
    /// Rendered path that succeeded.
    pub path: String,
    pub status: u16,
    pub body: Option<Value>,
    /// 1-based position of the winning candidate.
    pub attempts: usize,
}

pub struct RequestDispatcher<'a, T> {
    ctx: &'a SessionContext,
    transport: &'a T,
}

impl<'a, T: Transport> RequestDispatcher<'a, T> {
    pub const fn new(ctx: &'a SessionContext, transport: &'a T) -> Self {
        Self { ctx, transport }
    }

    /// Candidate list for `kind`, memoized endpoints first, rendered with
    /// `params`. Templates needing a missing parameter are dropped.
    #[must_use]
    pub fn plan(&self, kind: OperationKind, params: &PathParams<'_>) -> Vec<(Candidate, String)> {
        self.ctx
            .memory()
            .ordered_candidates(kind, self.ctx.catalog())
            .into_iter()
            .filter_map(|candidate| {
                let path = candidate.endpoint.render(params)?;
                Some((candidate, path))
            })
            .collect()
    }

    /// Try candidates in order until one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoCandidates`] when no template can be
    /// rendered, or [`DispatchError::Exhausted`] with the last attempt error
    /// once every candidate has failed.
    pub async fn attempt_sequence(
        &self,
        kind: OperationKind,
        params: &PathParams<'_>,
        payload: Option<&SaveBatch>,
    ) -> Result<AttemptSuccess, DispatchError> {
        let plan = self.plan(kind, params);
        let total = plan.len();
        if total == 0 {
            return Err(DispatchError::NoCandidates {
                kind,
                reason: format!("no endpoint template can be filled from {params:?}"),
            });
        }

        let mut last: Option<AttemptError> = None;
        for (index, (candidate, path)) in plan.into_iter().enumerate() {
            let attempt = index + 1;
            let request = WireRequest {
                method: candidate.endpoint.method,
                path,
                body: build_body(candidate.format, payload),
            };
            tracing::debug!(
                %kind,
                attempt,
                total,
                method = %request.method,
                path = %request.path,
                format = %candidate.format,
                "trying candidate"
            );

            let error = match self.transport.send(&request).await {
                Ok(resp) if resp.is_success() => {
                    self.ctx
                        .memory()
                        .set(kind, candidate.endpoint.clone(), candidate.format);
                    tracing::info!(%kind, attempt, path = %request.path, status = resp.status, "candidate succeeded");
                    return Ok(AttemptSuccess {
                        body: resp.json(),
                        status: resp.status,
                        candidate,
                        path: request.path,
                        attempts: attempt,
                    });
                }
                Ok(resp) => status_error(&request, &resp),
                Err(source) => AttemptError::Transport {
                    method: request.method,
                    path: request.path,
                    source,
                },
            };

            match &error {
                AttemptError::Transport { .. } => {
                    tracing::warn!(%kind, attempt, total, label = error.label(), %error, "candidate failed");
                }
                _ => {
                    tracing::debug!(%kind, attempt, total, label = error.label(), %error, "candidate failed");
                }
            }
            last = Some(error);
        }

        match last {
            Some(last) => {
                tracing::warn!(%kind, attempts = total, last = %last, "all candidates exhausted");
                Err(DispatchError::Exhausted {
                    kind,
                    attempts: total,
                    last: Box::new(last),
                })
            }
            None => Err(DispatchError::NoCandidates {
                kind,
                reason: "candidate list was empty".into(),
            }),
        }
    }
}

fn status_error(request: &WireRequest, resp: &WireResponse) -> AttemptError {
    let method = request.method;
    let path = request.path.clone();
    let status = resp.status;
    let message = resp.error_message();
    if resp.is_shape_mismatch() {
        AttemptError::ShapeMismatch {
            method,
            path,
            status,
            message,
        }
    } else {
        AttemptError::Rejected {
            method,
            path,
            status,
            message,
        }
    }
}
