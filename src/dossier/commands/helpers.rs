use crate::catalog::{DocumentCatalog, SourceDocument};
use crate::commands::{DocumentSummary, DossierSummary};
use crate::id::Id;
use crate::model::Dossier;
use crate::registry::DossierRegistry;

pub fn dossier_summary(position: usize, dossier: &Dossier, selected: Option<&Id>) -> DossierSummary {
    DossierSummary {
        position,
        id: dossier.id().clone(),
        name: dossier.name().to_string(),
        content_count: dossier.content_count(),
        created_at: dossier.created_at(),
        is_selected: selected == Some(dossier.id()),
    }
}

pub fn document_summary(
    position: usize,
    document: &SourceDocument,
    selected: Option<&Id>,
) -> DocumentSummary {
    DocumentSummary {
        position,
        id: document.id().clone(),
        name: document.display_name().to_string(),
        page_count: document.page_count(),
        failure: document.failure().map(|e| e.to_string()),
        is_selected: selected == Some(document.id()),
    }
}

pub fn summarize_dossiers(registry: &DossierRegistry) -> Vec<DossierSummary> {
    let selected = registry.current_selection();
    registry
        .list()
        .enumerate()
        .map(|(i, dossier)| dossier_summary(i + 1, dossier, selected))
        .collect()
}

pub fn summarize_documents(catalog: &DocumentCatalog, selected: Option<&Id>) -> Vec<DocumentSummary> {
    catalog
        .list()
        .enumerate()
        .map(|(i, document)| document_summary(i + 1, document, selected))
        .collect()
}

/// A printable name for a document reference, tolerant of dangling ids.
pub fn document_label(catalog: &DocumentCatalog, document_id: &Id) -> String {
    catalog
        .get(document_id)
        .map(|doc| doc.display_name().to_string())
        .unwrap_or_else(|_| "Unknown document".to_string())
}
