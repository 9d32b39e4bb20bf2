use crate::catalog::{DocumentCatalog, PageSource};
use crate::commands::{CmdMessage, CmdResult, PagePreview, PageRender};
use crate::error::Result;
use crate::id::Id;

pub fn add<P: PageSource + 'static>(
    catalog: &mut DocumentCatalog,
    display_name: &str,
    source: P,
) -> Result<CmdResult> {
    let id = catalog.add_document(display_name, source);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document loaded: {}",
        display_name
    )));
    Ok(result.with_affected_ids(vec![id]))
}

pub async fn resolve(catalog: &DocumentCatalog, id: &Id) -> Result<CmdResult> {
    let page_count = catalog.resolve_page_count(id).await?;
    let document = catalog.get(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{}: {} pages",
        document.display_name(),
        page_count
    )));
    Ok(result.with_affected_ids(vec![id.clone()]))
}

/// Produces a preview for every page of a document.
///
/// Failing to open the document fails the command. A single page that
/// cannot be produced is reported and shown as unavailable.
pub async fn browse(catalog: &DocumentCatalog, id: &Id) -> Result<CmdResult> {
    let page_count = catalog.resolve_page_count(id).await?;
    let mut result = CmdResult::default();
    let mut previews = Vec::with_capacity(page_count as usize);

    for page_number in 1..=page_count {
        let render = match catalog.get_page(id, page_number).await {
            Ok(handle) => PageRender::Available(handle),
            Err(err) => {
                result.add_message(CmdMessage::warning(format!(
                    "Page {} could not be rendered: {}",
                    page_number, err
                )));
                PageRender::Unavailable(err.to_string())
            }
        };
        previews.push(PagePreview {
            page_number,
            render,
        });
    }

    Ok(result.with_document_pages(previews))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::DossierError;
    use crate::test_utils::FakeSource;

    #[test]
    fn add_returns_the_new_id() {
        let mut catalog = DocumentCatalog::new();
        let result = add(&mut catalog, "El Diario", FakeSource::with_pages(2)).unwrap();
        let id = result.first_id().unwrap();
        assert_eq!(catalog.get(id).unwrap().display_name(), "El Diario");
    }

    #[tokio::test]
    async fn resolve_reports_page_count() {
        let mut catalog = DocumentCatalog::new();
        let id = catalog.add_document("El Diario", FakeSource::with_pages(9));
        let result = resolve(&catalog, &id).await.unwrap();
        assert_eq!(result.messages[0].content, "El Diario: 9 pages");
    }

    #[tokio::test]
    async fn browse_previews_every_page() {
        let mut catalog = DocumentCatalog::new();
        let id = catalog.add_document("El Diario", FakeSource::with_pages(3).failing_page(2));

        let result = browse(&catalog, &id).await.unwrap();
        let availability: Vec<bool> = result
            .document_pages
            .iter()
            .map(|p| p.render.is_available())
            .collect();
        assert_eq!(availability, vec![true, false, true]);
        assert!(result.has_level(MessageLevel::Warning));
    }

    #[tokio::test]
    async fn browse_surfaces_open_failures() {
        let mut catalog = DocumentCatalog::new();
        let id = catalog.add_document("Roto", FakeSource::failing("bad header"));
        assert!(matches!(
            browse(&catalog, &id).await,
            Err(DossierError::SourceUnavailable(_))
        ));
    }
}
