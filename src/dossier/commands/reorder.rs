use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::id::Id;
use crate::registry::DossierRegistry;

/// Replaces the content page order with `order`.
///
/// Pages left out of `order` are removed from the dossier. Callers that only
/// want to move pages must pass the complete order.
pub fn run(registry: &mut DossierRegistry, dossier_id: &Id, order: &[Id]) -> Result<CmdResult> {
    let dossier = registry.get_mut(dossier_id)?;
    let before = dossier.content_count();
    dossier.reorder(order);
    let after = dossier.content_count();

    let mut result = CmdResult::default();
    if after < before {
        tracing::warn!(
            dossier = %dossier_id,
            dropped = before - after,
            "reorder dropped pages missing from the new order"
        );
        result.add_message(CmdMessage::warning(format!(
            "{} page(s) not in the new order were removed from {}",
            before - after,
            dossier.name()
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Reordered {} ({} pages)",
        dossier.name(),
        after
    )));

    let ids = dossier.content_pages().iter().map(|p| p.id.clone()).collect();
    Ok(result.with_affected_ids(ids))
}
