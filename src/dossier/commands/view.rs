use crate::catalog::DocumentCatalog;
use crate::commands::{CmdMessage, CmdResult, DossierView, PageRender, ViewEntry};
use crate::error::{DossierError, Result};
use crate::id::Id;
use crate::index::index_pages;
use crate::model::DossierPage;
use crate::registry::DossierRegistry;

pub const UNAVAILABLE: &str = "Document unavailable";

/// Resolves every page of a dossier against the catalog.
///
/// Never fails because of a page: a missing document or a failing source
/// turns that page into [`PageRender::Unavailable`] and adds a warning.
pub async fn run(
    registry: &DossierRegistry,
    catalog: &DocumentCatalog,
    dossier_id: &Id,
    cover_subtitle: &str,
) -> Result<CmdResult> {
    let dossier = registry.get(dossier_id)?;
    let mut result = CmdResult::default();
    let mut entries = Vec::with_capacity(dossier.content_count() + 1);

    for indexed in index_pages(dossier) {
        let entry = match indexed.page {
            DossierPage::Cover(cover) => ViewEntry::Cover {
                title: cover.title.clone(),
                subtitle: cover_subtitle.to_string(),
            },
            DossierPage::Content(page) => {
                let document_name = catalog
                    .get(&page.document_id)
                    .ok()
                    .map(|doc| doc.display_name().to_string());

                let render = if document_name.is_none() {
                    PageRender::Unavailable(UNAVAILABLE.to_string())
                } else {
                    match catalog.get_page(&page.document_id, page.page_number).await {
                        Ok(handle) => PageRender::Available(handle),
                        Err(err) => {
                            result.add_message(CmdMessage::warning(format!(
                                "Page {} unavailable: {}",
                                indexed.position, err
                            )));
                            PageRender::Unavailable(unavailable_reason(&err))
                        }
                    }
                };

                ViewEntry::Content {
                    position: indexed.position,
                    page_id: page.id.clone(),
                    document_id: page.document_id.clone(),
                    document_name,
                    page_number: page.page_number,
                    markers: page.markers.clone(),
                    render,
                }
            }
        };
        entries.push(entry);
    }

    Ok(result.with_dossier_view(DossierView {
        id: dossier.id().clone(),
        name: dossier.name().to_string(),
        entries,
    }))
}

fn unavailable_reason(err: &DossierError) -> String {
    match err {
        DossierError::NotFound { .. } => UNAVAILABLE.to_string(),
        other => other.to_string(),
    }
}
