use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::id::Id;
use crate::registry::DossierRegistry;

/// Removes content pages. The cover and ids no longer in the dossier are
/// skipped without failing.
pub fn run(registry: &mut DossierRegistry, dossier_id: &Id, page_ids: &[Id]) -> Result<CmdResult> {
    let dossier = registry.get_mut(dossier_id)?;
    let mut result = CmdResult::default();
    let mut removed = Vec::new();

    for page_id in page_ids {
        if dossier.remove_page(page_id) {
            tracing::debug!(dossier = %dossier_id, page = %page_id, "page removed");
            removed.push(page_id.clone());
        } else if &dossier.cover().id == page_id {
            result.add_message(CmdMessage::info("The cover page cannot be removed"));
        } else {
            tracing::warn!(dossier = %dossier_id, page = %page_id, "remove ignored, no such page");
        }
    }

    if !removed.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "Removed {} page(s) from {}",
            removed.len(),
            dossier.name()
        )));
    }
    Ok(result.with_affected_ids(removed))
}
