use crate::catalog::DocumentCatalog;
use crate::commands::helpers::{summarize_documents, summarize_dossiers};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::id::Id;
use crate::registry::DossierRegistry;

pub fn dossiers(registry: &DossierRegistry) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_listed_dossiers(summarize_dossiers(registry));
    if result.listed_dossiers.is_empty() {
        result.add_message(CmdMessage::info("No dossiers yet."));
    }
    Ok(result)
}

pub fn documents(catalog: &DocumentCatalog, selected: Option<&Id>) -> Result<CmdResult> {
    let mut result =
        CmdResult::default().with_listed_documents(summarize_documents(catalog, selected));
    if result.listed_documents.is_empty() {
        result.add_message(CmdMessage::info(
            "Load your documents to start building dossiers.",
        ));
    }
    Ok(result)
}
