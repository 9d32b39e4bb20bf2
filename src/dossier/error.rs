use crate::id::Id;
use thiserror::Error;

/// What kind of entity a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Document,
    Dossier,
    Page,
    Marker,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Document => "Document",
            EntityKind::Dossier => "Dossier",
            EntityKind::Page => "Page",
            EntityKind::Marker => "Marker",
        };
        f.write_str(name)
    }
}

/// Failure reported by a paginated-document collaborator.
///
/// Carries only a message so that a failed resolution can be cached and
/// handed out again to every later caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SourceError(pub String);

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Error, Debug)]
pub enum DossierError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Id },

    #[error("Page {page} is out of range (document has {page_count} pages)")]
    OutOfRange { page: u32, page_count: u32 },

    #[error("Dossier name cannot be empty")]
    InvalidName,

    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("Select a dossier before adding pages")]
    NoSelection,

    #[error("{0}")]
    InvalidIndex(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DossierError {
    pub fn not_found(kind: EntityKind, id: &Id) -> Self {
        DossierError::NotFound {
            kind,
            id: id.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DossierError>;
