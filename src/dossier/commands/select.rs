use crate::catalog::DocumentCatalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::id::Id;
use crate::registry::DossierRegistry;

/// Moves the dossier cursor. Unknown ids are stored anyway and reported.
pub fn dossier(registry: &mut DossierRegistry, id: Id) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match registry.get(&id) {
        Ok(dossier) => result.add_message(CmdMessage::info(format!(
            "Selected dossier: {}",
            dossier.name()
        ))),
        Err(_) => {
            tracing::warn!(dossier = %id, "selected a dossier that does not exist");
            result.add_message(CmdMessage::warning(format!(
                "Dossier {} does not exist; nothing is selected",
                id
            )));
        }
    }
    registry.select(id.clone());
    Ok(result.with_affected_ids(vec![id]))
}

/// Moves the document cursor held in `selected`.
pub fn document(
    catalog: &DocumentCatalog,
    selected: &mut Option<Id>,
    id: Id,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match catalog.get(&id) {
        Ok(document) => result.add_message(CmdMessage::info(format!(
            "Selected document: {}",
            document.display_name()
        ))),
        Err(_) => result.add_message(CmdMessage::warning(format!(
            "Document {} does not exist; nothing is selected",
            id
        ))),
    }
    *selected = Some(id.clone());
    Ok(result.with_affected_ids(vec![id]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::test_utils::FakeSource;

    #[test]
    fn selects_existing_dossier() {
        let mut registry = DossierRegistry::default();
        let id = registry.create("Política").unwrap();
        let result = dossier(&mut registry, id.clone()).unwrap();
        assert_eq!(registry.current_selection(), Some(&id));
        assert!(!result.has_level(MessageLevel::Warning));
    }

    #[test]
    fn dangling_dossier_selection_is_kept_and_warned() {
        let mut registry = DossierRegistry::default();
        let ghost = Id::from("dossier-ghost");
        let result = dossier(&mut registry, ghost.clone()).unwrap();
        assert_eq!(registry.current_selection(), Some(&ghost));
        assert!(registry.selected().is_none());
        assert!(result.has_level(MessageLevel::Warning));
    }

    #[test]
    fn selects_documents_even_when_dangling() {
        let mut catalog = DocumentCatalog::new();
        let id = catalog.add_document("Diario", FakeSource::with_pages(1));
        let mut selected = None;

        document(&catalog, &mut selected, id.clone()).unwrap();
        assert_eq!(selected.as_ref(), Some(&id));

        let result = document(&catalog, &mut selected, Id::from("doc-gone")).unwrap();
        assert_eq!(selected, Some(Id::from("doc-gone")));
        assert!(result.has_level(MessageLevel::Warning));
    }
}
