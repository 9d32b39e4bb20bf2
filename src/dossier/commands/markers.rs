use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::id::Id;
use crate::registry::DossierRegistry;

pub fn add(
    registry: &mut DossierRegistry,
    dossier_id: &Id,
    page_id: &Id,
    text: &str,
) -> Result<CmdResult> {
    let dossier = registry.get_mut(dossier_id)?;
    let mut result = CmdResult::default();

    match dossier.add_marker(page_id, text) {
        Some(marker_id) => {
            tracing::debug!(page = %page_id, marker = %marker_id, "marker added");
            result.add_message(CmdMessage::success(format!("Marker added: {}", text.trim())));
            result.affected_ids.push(marker_id);
        }
        None if text.trim().is_empty() => {
            result.add_message(CmdMessage::info("Empty marker ignored"));
        }
        None => {
            tracing::warn!(page = %page_id, "marker ignored, not a content page");
            result.add_message(CmdMessage::info(
                "Markers can only be attached to content pages",
            ));
        }
    }
    Ok(result)
}

pub fn remove(
    registry: &mut DossierRegistry,
    dossier_id: &Id,
    page_id: &Id,
    marker_id: &Id,
) -> Result<CmdResult> {
    let dossier = registry.get_mut(dossier_id)?;
    let mut result = CmdResult::default();

    if dossier.remove_marker(page_id, marker_id) {
        tracing::debug!(page = %page_id, marker = %marker_id, "marker removed");
        result.add_message(CmdMessage::success("Marker removed"));
        result.affected_ids.push(marker_id.clone());
    } else {
        tracing::warn!(page = %page_id, marker = %marker_id, "remove ignored, no such marker");
    }
    Ok(result)
}
