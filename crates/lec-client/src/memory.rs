//! Session-scoped record of the last endpoint that worked per operation kind.
//!
//! Memory is a hint only. It is written after a confirmed success, read when
//! building the next candidate list, and never invalidated on its own: a stale
//! entry costs one extra attempt before the catalog takes over. Concurrent
//! operations of the same kind may overwrite each other; last writer wins.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lec_core::enums::OperationKind;

use crate::catalog::{Candidate, Endpoint, EndpointCatalog, PayloadFormat};

/// What was remembered for one operation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remembered {
    pub endpoint: Endpoint,
    pub format: PayloadFormat,
}

#[derive(Debug, Default)]
pub struct EndpointMemory {
    entries: Mutex<HashMap<OperationKind, Remembered>>,
}

impl EndpointMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<OperationKind, Remembered>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, kind: OperationKind) -> Option<Remembered> {
        self.lock().get(&kind).cloned()
    }

    /// Record a confirmed success. Call only after the backend accepted
    /// the request.
    pub fn set(&self, kind: OperationKind, endpoint: Endpoint, format: PayloadFormat) {
        tracing::debug!(%kind, %endpoint, %format, "remembering endpoint");
        self.lock().insert(kind, Remembered { endpoint, format });
    }

    /// Forget everything learned this session.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Candidate order for `kind`: memoized candidates first, then the full
    /// catalog. Memoized entries are not removed from their catalog position.
    #[must_use]
    pub fn ordered_candidates(
        &self,
        kind: OperationKind,
        catalog: &EndpointCatalog,
    ) -> Vec<Candidate> {
        let mut front: Vec<Candidate> = Vec::new();

        match kind {
            OperationKind::Save => {
                let formats = catalog.save_formats();
                let remembered = self.get(OperationKind::Save);
                if let Some(r) = &remembered {
                    front.push(Candidate::new(kind, r.endpoint.clone(), r.format));
                    front.extend(
                        formats
                            .iter()
                            .filter(|f| **f != r.format)
                            .map(|f| Candidate::new(kind, r.endpoint.clone(), *f)),
                    );
                }
                let sibling = self
                    .get(OperationKind::Fetch)
                    .and_then(|fetch| fetch.endpoint.save_sibling())
                    .filter(|s| remembered.as_ref().is_none_or(|r| r.endpoint != *s));
                if let Some(sibling) = sibling {
                    front.extend(
                        formats
                            .iter()
                            .map(|f| Candidate::new(kind, sibling.clone(), *f)),
                    );
                }
            }
            OperationKind::Delete | OperationKind::Fetch => {
                if let Some(r) = self.get(kind) {
                    front.push(Candidate::new(kind, r.endpoint, r.format));
                }
            }
        }

        front.extend(catalog.candidates(kind));
        front
    }
}
