//! # Dossier Model
//!
//! A [`Dossier`] is a named, ordered list of pages that always opens with a
//! cover. The cover is stored apart from the content pages, so "the first
//! page is the cover and no other page is" holds by construction: nothing can
//! remove, move or duplicate it.
//!
//! Consumers walk the pages through [`Dossier::pages`], which yields the
//! [`DossierPage`] sum type (cover first, then content pages in user order).
//!
//! Content pages reference a source document by id only. Whether that
//! document exists is not checked here; a dangling reference shows up later
//! as "document unavailable" when the page is rendered.
//!
//! Structural mutations (`remove_page`, `reorder`, `remove_marker`) treat
//! unknown ids as no-ops. They are driven by direct manipulation where stale
//! ids are routine.

use crate::error::{DossierError, Result};
use crate::id::{Id, IdGenerator, COVER_PREFIX, DOSSIER_PREFIX, MARKER_PREFIX, PAGE_PREFIX};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub id: Id,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverPage {
    pub id: Id,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPage {
    pub id: Id,
    pub document_id: Id,
    /// 1-indexed page within the referenced document.
    pub page_number: u32,
    pub markers: Vec<Marker>,
}

/// One entry of a dossier, as seen in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DossierPage<'a> {
    Cover(&'a CoverPage),
    #[serde(rename = "page")]
    Content(&'a ContentPage),
}

impl<'a> DossierPage<'a> {
    pub fn id(&self) -> &'a Id {
        match self {
            DossierPage::Cover(cover) => &cover.id,
            DossierPage::Content(page) => &page.id,
        }
    }

    pub fn is_cover(&self) -> bool {
        matches!(self, DossierPage::Cover(_))
    }
}

#[derive(Debug, Clone)]
pub struct Dossier {
    id: Id,
    name: String,
    created_at: DateTime<Utc>,
    cover: CoverPage,
    content: Vec<ContentPage>,
    ids: IdGenerator,
}

impl Dossier {
    /// Creates a dossier holding only its cover page.
    pub fn create(name: &str) -> Result<Self> {
        Self::create_with(name, IdGenerator::default())
    }

    pub fn create_with(name: &str, ids: IdGenerator) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DossierError::InvalidName);
        }

        Ok(Self {
            id: ids.new_id(DOSSIER_PREFIX),
            name: name.to_string(),
            created_at: Utc::now(),
            cover: CoverPage {
                id: ids.new_id(COVER_PREFIX),
                title: name.to_string(),
            },
            content: Vec::new(),
            ids,
        })
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn cover(&self) -> &CoverPage {
        &self.cover
    }

    /// All pages in presentation order, cover first.
    pub fn pages(&self) -> impl Iterator<Item = DossierPage<'_>> {
        std::iter::once(DossierPage::Cover(&self.cover))
            .chain(self.content.iter().map(DossierPage::Content))
    }

    pub fn content_pages(&self) -> &[ContentPage] {
        &self.content
    }

    /// Number of pages excluding the cover.
    pub fn content_count(&self) -> usize {
        self.content.len()
    }

    pub fn page(&self, page_id: &Id) -> Option<DossierPage<'_>> {
        self.pages().find(|page| page.id() == page_id)
    }

    pub fn content_page(&self, page_id: &Id) -> Option<&ContentPage> {
        self.content.iter().find(|page| &page.id == page_id)
    }

    fn content_page_mut(&mut self, page_id: &Id) -> Option<&mut ContentPage> {
        self.content.iter_mut().find(|page| &page.id == page_id)
    }

    /// Appends a content page. The reference is not validated.
    pub fn add_content_page(&mut self, document_id: Id, page_number: u32) -> Id {
        let id = self.ids.new_id(PAGE_PREFIX);
        self.content.push(ContentPage {
            id: id.clone(),
            document_id,
            page_number,
            markers: Vec::new(),
        });
        id
    }

    /// Removes a content page. Returns whether anything was removed; the
    /// cover id and unknown ids leave the dossier untouched.
    pub fn remove_page(&mut self, page_id: &Id) -> bool {
        let before = self.content.len();
        self.content.retain(|page| &page.id != page_id);
        self.content.len() != before
    }

    /// Rebuilds the content pages from `order`.
    ///
    /// This is a full replacement, not a permutation merge: ids that match no
    /// content page are skipped, repeated ids only count once, and content
    /// pages missing from `order` are dropped from the dossier.
    pub fn reorder(&mut self, order: &[Id]) {
        let mut by_id: HashMap<Id, ContentPage> = self
            .content
            .drain(..)
            .map(|page| (page.id.clone(), page))
            .collect();

        self.content = order.iter().filter_map(|id| by_id.remove(id)).collect();
    }

    /// Attaches a trimmed marker to a content page. Blank text, the cover and
    /// unknown pages yield `None` and change nothing.
    pub fn add_marker(&mut self, page_id: &Id, text: &str) -> Option<Id> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let ids = self.ids;
        let page = self.content_page_mut(page_id)?;
        let id = ids.new_id(MARKER_PREFIX);
        page.markers.push(Marker {
            id: id.clone(),
            text: text.to_string(),
        });
        Some(id)
    }

    pub fn remove_marker(&mut self, page_id: &Id, marker_id: &Id) -> bool {
        let Some(page) = self.content_page_mut(page_id) else {
            return false;
        };
        let before = page.markers.len();
        page.markers.retain(|marker| &marker.id != marker_id);
        page.markers.len() != before
    }
}

#[derive(Serialize)]
struct DossierView<'a> {
    id: &'a Id,
    name: &'a str,
    created_at: DateTime<Utc>,
    pages: Vec<DossierPage<'a>>,
}

impl Serialize for Dossier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        DossierView {
            id: &self.id,
            name: &self.name,
            created_at: self.created_at,
            pages: self.pages().collect(),
        }
        .serialize(serializer)
    }
}
