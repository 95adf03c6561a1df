//! Ordered candidate catalogs per operation kind.
//!
//! The order of every list is a prior belief about which backend revision is
//! live, most likely first. It is part of observable behavior: tests count
//! attempts against these literal positions, so do not reorder entries.
//!
//! Save candidates are the endpoint-major cross product of
//! [`SAVE_ENDPOINTS`] and [`SAVE_FORMATS`]; the sixth save candidate is
//! (`/api/chapters/{chapterId}/questions`, [`PayloadFormat::SnakeCaseWrapped`]).

use std::fmt;

use lec_core::enums::OperationKind;
use serde::{Deserialize, Serialize};

use crate::transport::Method;

/// Template placeholder for the question id.
pub const ID_PARAM: &str = "{id}";
/// Template placeholder for the chapter id.
pub const CHAPTER_PARAM: &str = "{chapterId}";

/// Body shape sent with a candidate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// No body.
    Empty,
    /// `{"isDeleted": true}`
    DeleteFlag,
    /// `{"is_deleted": true}`
    SnakeDeleteFlag,
    /// `{"chapterId", "questions", "count", "savedAt"}`
    WrappedWithMetadata,
    /// Bare array of questions, each carrying `chapterId`.
    FlatArray,
    /// `{"chapter_id", "questions"}` with snake_case question fields.
    SnakeCaseWrapped,
}

impl PayloadFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::DeleteFlag => "delete_flag",
            Self::SnakeDeleteFlag => "snake_delete_flag",
            Self::WrappedWithMetadata => "wrapped_with_metadata",
            Self::FlatArray => "flat_array",
            Self::SnakeCaseWrapped => "snake_case_wrapped",
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP method plus a path template with `{id}` / `{chapterId}` slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: Method,
    pub template: String,
}

impl Endpoint {
    pub fn new(method: Method, template: impl Into<String>) -> Self {
        Self {
            method,
            template: template.into(),
        }
    }

    /// Substitute path parameters. Returns `None` when the template needs a
    /// parameter that is not available.
    #[must_use]
    pub fn render(&self, params: &PathParams<'_>) -> Option<String> {
        let mut path = self.template.clone();
        if path.contains(ID_PARAM) {
            path = path.replace(ID_PARAM, &urlencoding::encode(params.id?));
        }
        if path.contains(CHAPTER_PARAM) {
            path = path.replace(CHAPTER_PARAM, &urlencoding::encode(params.chapter_id?));
        }
        Some(path)
    }

    /// Same resource, final path segment replaced by `save`, query dropped.
    ///
    /// Used to turn a remembered read path such as
    /// `/api/chapters/{chapterId}/questions/list` into
    /// `POST /api/chapters/{chapterId}/questions/save`.
    #[must_use]
    pub fn save_sibling(&self) -> Option<Self> {
        let path = self.template.split('?').next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        let (parent, last) = path.rsplit_once('/')?;
        if parent.is_empty() || last.is_empty() {
            return None;
        }
        Some(Self::new(Method::Post, format!("{parent}/save")))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

/// Values available for template substitution in one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathParams<'a> {
    pub id: Option<&'a str>,
    pub chapter_id: Option<&'a str>,
}

impl<'a> PathParams<'a> {
    #[must_use]
    pub const fn for_question(id: &'a str, chapter_id: Option<&'a str>) -> Self {
        Self {
            id: Some(id),
            chapter_id,
        }
    }

    #[must_use]
    pub const fn for_chapter(chapter_id: &'a str) -> Self {
        Self {
            id: None,
            chapter_id: Some(chapter_id),
        }
    }
}

/// One (endpoint, payload format, operation kind) triple considered during a
/// single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: OperationKind,
    pub endpoint: Endpoint,
    pub format: PayloadFormat,
}

impl Candidate {
    pub const fn new(kind: OperationKind, endpoint: Endpoint, format: PayloadFormat) -> Self {
        Self {
            kind,
            endpoint,
            format,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.endpoint, self.format)
    }
}

// ── Catalog literals ───────────────────────────────────────────────

/// Soft-delete paths first, then the generic logical-delete patch, then the
/// historically-named hard-delete paths.
pub const DELETE_CANDIDATES: &[(Method, &str, PayloadFormat)] = &[
    (Method::Post, "/api/questions/{id}/soft-delete", PayloadFormat::DeleteFlag),
    (Method::Put, "/api/questions/{id}/soft_delete", PayloadFormat::SnakeDeleteFlag),
    (Method::Patch, "/api/questions/{id}", PayloadFormat::DeleteFlag),
    (Method::Delete, "/api/questions/{id}", PayloadFormat::Empty),
    (Method::Delete, "/api/question/{id}", PayloadFormat::Empty),
    (Method::Delete, "/api/v1/questions/{id}", PayloadFormat::Empty),
    (Method::Delete, "/api/chapters/{chapterId}/questions/{id}", PayloadFormat::Empty),
];

pub const SAVE_ENDPOINTS: &[(Method, &str)] = &[
    (Method::Post, "/api/questions/batch"),
    (Method::Post, "/api/chapters/{chapterId}/questions"),
    (Method::Post, "/api/v1/questions/batch"),
    (Method::Post, "/api/questions"),
];

pub const SAVE_FORMATS: &[PayloadFormat] = &[
    PayloadFormat::WrappedWithMetadata,
    PayloadFormat::FlatArray,
    PayloadFormat::SnakeCaseWrapped,
];

pub const FETCH_ENDPOINTS: &[(Method, &str)] = &[
    (Method::Get, "/api/chapters/{chapterId}/questions"),
    (Method::Get, "/api/questions?chapterId={chapterId}"),
    (Method::Get, "/api/v1/chapters/{chapterId}/questions"),
    (Method::Get, "/api/chapters/{chapterId}/questions/list"),
];

/// Candidate lists for every operation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCatalog {
    delete: Vec<(Endpoint, PayloadFormat)>,
    save_endpoints: Vec<Endpoint>,
    save_formats: Vec<PayloadFormat>,
    fetch: Vec<Endpoint>,
}

impl Default for EndpointCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EndpointCatalog {
    /// The catalog built from the literal tables in this module.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            delete: DELETE_CANDIDATES
                .iter()
                .map(|(method, template, format)| (Endpoint::new(*method, *template), *format))
                .collect(),
            save_endpoints: SAVE_ENDPOINTS
                .iter()
                .map(|(method, template)| Endpoint::new(*method, *template))
                .collect(),
            save_formats: SAVE_FORMATS.to_vec(),
            fetch: FETCH_ENDPOINTS
                .iter()
                .map(|(method, template)| Endpoint::new(*method, *template))
                .collect(),
        }
    }

    /// Payload formats tried against every save endpoint, in order.
    #[must_use]
    pub fn save_formats(&self) -> &[PayloadFormat] {
        &self.save_formats
    }

    /// Full catalog order for `kind`, before endpoint memory is applied.
    #[must_use]
    pub fn candidates(&self, kind: OperationKind) -> Vec<Candidate> {
        match kind {
            OperationKind::Delete => self
                .delete
                .iter()
                .map(|(endpoint, format)| Candidate::new(kind, endpoint.clone(), *format))
                .collect(),
            OperationKind::Save => self
                .save_endpoints
                .iter()
                .flat_map(|endpoint| {
                    self.save_formats
                        .iter()
                        .map(move |format| Candidate::new(kind, endpoint.clone(), *format))
                })
                .collect(),
            OperationKind::Fetch => self
                .fetch
                .iter()
                .map(|endpoint| Candidate::new(kind, endpoint.clone(), PayloadFormat::Empty))
                .collect(),
        }
    }
}
