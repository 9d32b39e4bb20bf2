//! # Document Catalog
//!
//! The catalog is the registry of uploaded source documents. It never parses
//! anything itself: each document is registered with a [`PageSource`], a
//! collaborator that can asynchronously open the raw upload into a
//! [`PaginatedDocument`].
//!
//! ## Resolution
//!
//! Opening happens at most once per document. The outcome, success or
//! failure, is cached in a [`tokio::sync::OnceCell`]:
//! - concurrent callers wait on the same opening instead of racing;
//! - later callers get the cached document (and so the cached page count);
//! - a parse failure is terminal for that document and is handed back to
//!   every caller. The catalog never retries.
//!
//! ## Ordering
//!
//! Documents are listed in insertion order. There is no removal.

use crate::error::{DossierError, EntityKind, Result, SourceError};
use crate::id::{Id, IdGenerator, DOCUMENT_PREFIX};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Whatever a paginated document produces for a page. Opaque to the core.
pub type PageContent = Arc<dyn Any + Send + Sync>;

/// An opened, queryable document.
#[async_trait]
pub trait PaginatedDocument: Send + Sync {
    fn page_count(&self) -> u32;

    /// Produces the renderable content of a 1-indexed page.
    async fn page(&self, page_number: u32) -> std::result::Result<PageContent, SourceError>;
}

/// The raw upload, not yet parsed.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn open(&self) -> std::result::Result<Arc<dyn PaginatedDocument>, SourceError>;
}

/// A page ready to be handed to a renderer.
#[derive(Clone)]
pub struct RenderableHandle {
    document_id: Id,
    page_number: u32,
    content: PageContent,
}

impl RenderableHandle {
    pub fn document_id(&self) -> &Id {
        &self.document_id
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.content.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for RenderableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderableHandle")
            .field("document_id", &self.document_id)
            .field("page_number", &self.page_number)
            .finish_non_exhaustive()
    }
}

type Opened = std::result::Result<Arc<dyn PaginatedDocument>, SourceError>;

pub struct SourceDocument {
    id: Id,
    display_name: String,
    added_at: DateTime<Utc>,
    source: Arc<dyn PageSource>,
    opened: OnceCell<Opened>,
}

impl SourceDocument {
    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// `None` until the document has been opened successfully.
    pub fn page_count(&self) -> Option<u32> {
        match self.opened.get() {
            Some(Ok(document)) => Some(document.page_count()),
            _ => None,
        }
    }

    /// The cached opening failure, if opening was attempted and failed.
    pub fn failure(&self) -> Option<&SourceError> {
        match self.opened.get() {
            Some(Err(err)) => Some(err),
            _ => None,
        }
    }

    async fn resolve(&self) -> Result<Arc<dyn PaginatedDocument>> {
        let opened = self
            .opened
            .get_or_init(|| async move {
                let outcome = self.source.open().await;
                match &outcome {
                    Ok(document) => tracing::info!(
                        document = %self.id,
                        pages = document.page_count(),
                        "document resolved"
                    ),
                    Err(err) => tracing::warn!(
                        document = %self.id,
                        error = %err,
                        "document failed to open"
                    ),
                }
                outcome
            })
            .await;

        opened.clone().map_err(DossierError::SourceUnavailable)
    }
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("page_count", &self.page_count())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct DocumentCatalog {
    documents: IndexMap<Id, SourceDocument>,
    ids: IdGenerator,
}

impl DocumentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            documents: IndexMap::new(),
            ids,
        }
    }

    /// Registers a document with an unknown page count.
    pub fn add_document<P>(&mut self, display_name: impl Into<String>, source: P) -> Id
    where
        P: PageSource + 'static,
    {
        let id = self.ids.new_id(DOCUMENT_PREFIX);
        let display_name = display_name.into();
        tracing::info!(document = %id, name = %display_name, "document registered");
        self.documents.insert(
            id.clone(),
            SourceDocument {
                id: id.clone(),
                display_name,
                added_at: Utc::now(),
                source: Arc::new(source),
                opened: OnceCell::new(),
            },
        );
        id
    }

    pub fn get(&self, id: &Id) -> Result<&SourceDocument> {
        self.documents
            .get(id)
            .ok_or_else(|| DossierError::not_found(EntityKind::Document, id))
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.documents.contains_key(id)
    }

    /// Documents in the order they were added.
    pub fn list(&self) -> impl Iterator<Item = &SourceDocument> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Opens the document on first call and returns its page count.
    pub async fn resolve_page_count(&self, id: &Id) -> Result<u32> {
        let document = self.get(id)?.resolve().await?;
        Ok(document.page_count())
    }

    pub async fn get_page(&self, id: &Id, page_number: u32) -> Result<RenderableHandle> {
        let entry = self.get(id)?;
        let document = entry.resolve().await?;

        let page_count = document.page_count();
        if page_number == 0 || page_number > page_count {
            return Err(DossierError::OutOfRange {
                page: page_number,
                page_count,
            });
        }

        let content = document.page(page_number).await?;
        tracing::debug!(document = %id, page = page_number, "page resolved");
        Ok(RenderableHandle {
            document_id: id.clone(),
            page_number,
            content,
        })
    }
}

/// Turns an upload file name into a display name by dropping a trailing
/// `.pdf` extension, whatever its case.
pub fn derive_display_name(file_name: &str) -> String {
    let lower = file_name.to_ascii_lowercase();
    match lower.strip_suffix(".pdf") {
        Some(stem) if !stem.is_empty() => file_name[..stem.len()].to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakePage, FakeSource};

    #[test]
    fn lists_documents_in_insertion_order() {
        let mut catalog = DocumentCatalog::new();
        let a = catalog.add_document("A", FakeSource::with_pages(1));
        let b = catalog.add_document("B", FakeSource::with_pages(1));
        let c = catalog.add_document("C", FakeSource::with_pages(1));

        let ids: Vec<&Id> = catalog.list().map(|d| d.id()).collect();
        assert_eq!(ids, vec![&a, &b, &c]);
    }

    #[test]
    fn ids_are_distinct_for_documents_added_together() {
        let mut catalog = DocumentCatalog::new();
        let a = catalog.add_document("same", FakeSource::with_pages(1));
        let b = catalog.add_document("same", FakeSource::with_pages(1));
        assert_ne!(a, b);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn page_count_is_unknown_until_resolved() {
        let mut catalog = DocumentCatalog::new();
        let id = catalog.add_document("Diario", FakeSource::with_pages(4));
        assert_eq!(catalog.get(&id).unwrap().page_count(), None);
    }

    #[tokio::test]
    async fn resolve_page_count_caches_the_result() {
        let mut catalog = DocumentCatalog::new();
        let source = FakeSource::with_pages(12);
        let opens = source.open_counter();
        let id = catalog.add_document("Diario", source);

        assert_eq!(catalog.resolve_page_count(&id).await.unwrap(), 12);
        assert_eq!(catalog.resolve_page_count(&id).await.unwrap(), 12);
        assert_eq!(catalog.get(&id).unwrap().page_count(), Some(12));
        assert_eq!(opens.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_resolution_opens_once() {
        let mut catalog = DocumentCatalog::new();
        let source = FakeSource::with_pages(7).yielding(5);
        let opens = source.open_counter();
        let id = catalog.add_document("Diario", source);

        let (a, b) = tokio::join!(catalog.resolve_page_count(&id), catalog.resolve_page_count(&id));
        assert_eq!(a.unwrap(), 7);
        assert_eq!(b.unwrap(), 7);
        assert_eq!(opens.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn parse_failure_is_surfaced_and_not_retried() {
        let mut catalog = DocumentCatalog::new();
        let source = FakeSource::failing("not a pdf");
        let opens = source.open_counter();
        let id = catalog.add_document("Roto", source);

        let first = catalog.resolve_page_count(&id).await;
        assert!(matches!(first, Err(DossierError::SourceUnavailable(ref e)) if e.0 == "not a pdf"));
        let second = catalog.resolve_page_count(&id).await;
        assert!(matches!(second, Err(DossierError::SourceUnavailable(_))));
        assert_eq!(opens.load(std::sync::atomic::Ordering::SeqCst), 1);

        let entry = catalog.get(&id).unwrap();
        assert_eq!(entry.page_count(), None);
        assert_eq!(entry.failure().map(|e| e.0.as_str()), Some("not a pdf"));
    }

    #[tokio::test]
    async fn get_page_on_unknown_document_is_not_found() {
        let catalog = DocumentCatalog::new();
        let result = catalog.get_page(&Id::from("doc-unknown"), 1).await;
        assert!(matches!(
            result,
            Err(DossierError::NotFound {
                kind: EntityKind::Document,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn get_page_checks_bounds() {
        let mut catalog = DocumentCatalog::new();
        let id = catalog.add_document("Diario", FakeSource::with_pages(3));

        for page in [0, 4] {
            let result = catalog.get_page(&id, page).await;
            assert!(matches!(
                result,
                Err(DossierError::OutOfRange { page_count: 3, .. })
            ));
        }

        let handle = catalog.get_page(&id, 3).await.unwrap();
        assert_eq!(handle.page_number(), 3);
        assert_eq!(handle.document_id(), &id);
        assert_eq!(handle.downcast_ref::<FakePage>(), Some(&FakePage(3)));
    }

    #[tokio::test]
    async fn page_render_failures_propagate() {
        let mut catalog = DocumentCatalog::new();
        let id = catalog.add_document("Diario", FakeSource::with_pages(3).failing_page(2));

        assert!(catalog.get_page(&id, 1).await.is_ok());
        assert!(matches!(
            catalog.get_page(&id, 2).await,
            Err(DossierError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn display_name_drops_pdf_extension() {
        assert_eq!(derive_display_name("El País.pdf"), "El País");
        assert_eq!(derive_display_name("MARCA.PDF"), "MARCA");
        assert_eq!(derive_display_name("notes.txt"), "notes.txt");
        assert_eq!(derive_display_name(".pdf"), ".pdf");
    }
}
