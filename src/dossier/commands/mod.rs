use crate::catalog::RenderableHandle;
use crate::config::DossierConfig;
use crate::id::Id;
use crate::index::PagePosition;
use crate::model::Marker;
use chrono::{DateTime, Utc};

pub mod add_page;
pub mod config;
pub mod create;
pub mod documents;
pub mod helpers;
pub mod list;
pub mod markers;
pub mod remove_page;
pub mod reorder;
pub mod select;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A dossier as shown in a listing.
#[derive(Debug, Clone)]
pub struct DossierSummary {
    pub position: usize,
    pub id: Id,
    pub name: String,
    pub content_count: usize,
    pub created_at: DateTime<Utc>,
    pub is_selected: bool,
}

/// A source document as shown in a listing.
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub position: usize,
    pub id: Id,
    pub name: String,
    /// Blank until the document has been opened.
    pub page_count: Option<u32>,
    pub failure: Option<String>,
    pub is_selected: bool,
}

/// Whether a page could be produced for rendering.
#[derive(Debug, Clone)]
pub enum PageRender {
    Available(RenderableHandle),
    Unavailable(String),
}

impl PageRender {
    pub fn is_available(&self) -> bool {
        matches!(self, PageRender::Available(_))
    }
}

/// One page of a source document, as shown when browsing it.
#[derive(Debug, Clone)]
pub struct PagePreview {
    pub page_number: u32,
    pub render: PageRender,
}

#[derive(Debug, Clone)]
pub enum ViewEntry {
    Cover {
        title: String,
        subtitle: String,
    },
    Content {
        position: PagePosition,
        page_id: Id,
        document_id: Id,
        /// `None` when the referenced document is not in the catalog.
        document_name: Option<String>,
        page_number: u32,
        markers: Vec<Marker>,
        render: PageRender,
    },
}

/// A dossier resolved against the catalog, ready to display.
#[derive(Debug, Clone)]
pub struct DossierView {
    pub id: Id,
    pub name: String,
    pub entries: Vec<ViewEntry>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Ids created or touched by the command, in the order it produced them.
    pub affected_ids: Vec<Id>,
    pub listed_dossiers: Vec<DossierSummary>,
    pub listed_documents: Vec<DocumentSummary>,
    pub document_pages: Vec<PagePreview>,
    pub dossier_view: Option<DossierView>,
    pub config: Option<DossierConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_ids(mut self, ids: Vec<Id>) -> Self {
        self.affected_ids = ids;
        self
    }

    pub fn with_listed_dossiers(mut self, dossiers: Vec<DossierSummary>) -> Self {
        self.listed_dossiers = dossiers;
        self
    }

    pub fn with_listed_documents(mut self, documents: Vec<DocumentSummary>) -> Self {
        self.listed_documents = documents;
        self
    }

    pub fn with_document_pages(mut self, pages: Vec<PagePreview>) -> Self {
        self.document_pages = pages;
        self
    }

    pub fn with_dossier_view(mut self, view: DossierView) -> Self {
        self.dossier_view = Some(view);
        self
    }

    pub fn with_config(mut self, config: DossierConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// The first id the command produced, if any.
    pub fn first_id(&self) -> Option<&Id> {
        self.affected_ids.first()
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
