use crate::catalog::DocumentCatalog;
use crate::commands::helpers::document_label;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::id::Id;
use crate::registry::DossierRegistry;

/// Appends a page of `document_id` to the dossier.
///
/// The document reference is not checked: a page of a missing document is
/// still added and only shows up as unavailable when viewed.
pub fn run(
    registry: &mut DossierRegistry,
    catalog: &DocumentCatalog,
    dossier_id: &Id,
    document_id: Id,
    page_number: u32,
) -> Result<CmdResult> {
    let label = document_label(catalog, &document_id);
    let dossier = registry.get_mut(dossier_id)?;
    let page_id = dossier.add_content_page(document_id, page_number);
    tracing::debug!(dossier = %dossier_id, page = %page_id, "content page added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} · page {} to {} (position {})",
        label,
        page_number,
        dossier.name(),
        dossier.content_count()
    )));
    Ok(result.with_affected_ids(vec![page_id]))
}
