//! # API Facade
//!
//! [`DossierApi`] is the single entry point for every dossier operation,
//! whatever drives it (the bundled shell, a GUI, a web front end).
//!
//! It owns the session state explicitly: one [`DocumentCatalog`], one
//! [`DossierRegistry`] and the document cursor. Nothing is global; a session
//! is constructed once and dropped with its owner.
//!
//! Like the rest of the core, the facade:
//! - dispatches to `commands/*`, which hold the logic;
//! - normalizes inputs (current selection → dossier id, positions → page ids);
//! - returns structured `Result<CmdResult>` values and never prints.
//!
//! Every call is synchronous except the ones that may have to open a
//! document: resolving page counts, fetching pages, browsing and viewing.

use crate::catalog::{DocumentCatalog, PageSource, RenderableHandle};
use crate::commands;
use crate::config::DossierConfig;
use crate::error::{DossierError, Result};
use crate::id::{Id, IdGenerator};
use crate::index::{parse_positions, resolve_positions};
use crate::registry::DossierRegistry;
use std::path::PathBuf;

pub struct DossierApi {
    catalog: DocumentCatalog,
    registry: DossierRegistry,
    selected_document: Option<Id>,
    config: DossierConfig,
    config_dir: Option<PathBuf>,
}

impl DossierApi {
    /// Starts a session: empty catalog, seed dossiers from `config`, nothing
    /// selected.
    pub fn new(config: DossierConfig) -> Self {
        let ids = IdGenerator::new(config.id_strategy);
        Self {
            catalog: DocumentCatalog::with_ids(ids),
            registry: DossierRegistry::seeded(config.default_dossiers.as_slice(), ids),
            selected_document: None,
            config,
            config_dir: None,
        }
    }

    /// Persists configuration changes to `config_dir`.
    pub fn with_config_dir(mut self, config_dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(config_dir.into());
        self
    }

    pub fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &DossierRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &DossierConfig {
        &self.config
    }

    // Documents

    pub fn add_document<P: PageSource + 'static>(
        &mut self,
        display_name: &str,
        source: P,
    ) -> Result<commands::CmdResult> {
        commands::documents::add(&mut self.catalog, display_name, source)
    }

    pub fn list_documents(&self) -> Result<commands::CmdResult> {
        commands::list::documents(&self.catalog, self.selected_document.as_ref())
    }

    pub fn select_document(&mut self, id: Id) -> Result<commands::CmdResult> {
        commands::select::document(&self.catalog, &mut self.selected_document, id)
    }

    pub fn selected_document(&self) -> Option<&Id> {
        self.selected_document.as_ref()
    }

    pub async fn resolve_page_count(&self, id: &Id) -> Result<u32> {
        self.catalog.resolve_page_count(id).await
    }

    pub async fn describe_document(&self, id: &Id) -> Result<commands::CmdResult> {
        commands::documents::resolve(&self.catalog, id).await
    }

    pub async fn get_page(&self, id: &Id, page_number: u32) -> Result<RenderableHandle> {
        self.catalog.get_page(id, page_number).await
    }

    pub async fn browse_document(&self, id: &Id) -> Result<commands::CmdResult> {
        commands::documents::browse(&self.catalog, id).await
    }

    // Dossiers

    pub fn list_dossiers(&self) -> Result<commands::CmdResult> {
        commands::list::dossiers(&self.registry)
    }

    /// Creates a dossier and makes it the current one.
    pub fn create_dossier(&mut self, name: &str) -> Result<commands::CmdResult> {
        let result = commands::create::run(&mut self.registry, name)?;
        if let Some(id) = result.first_id() {
            self.registry.select(id.clone());
        }
        Ok(result)
    }

    pub fn select_dossier(&mut self, id: Id) -> Result<commands::CmdResult> {
        commands::select::dossier(&mut self.registry, id)
    }

    /// The current dossier id, only if it still names a dossier.
    pub fn selected_dossier(&self) -> Option<&Id> {
        self.registry.selected().map(|dossier| dossier.id())
    }

    /// Appends a page to the current dossier.
    pub fn add_page(&mut self, document_id: Id, page_number: u32) -> Result<commands::CmdResult> {
        let dossier_id = self.require_selection()?;
        self.add_page_to(&dossier_id, document_id, page_number)
    }

    pub fn add_page_to(
        &mut self,
        dossier_id: &Id,
        document_id: Id,
        page_number: u32,
    ) -> Result<commands::CmdResult> {
        commands::add_page::run(
            &mut self.registry,
            &self.catalog,
            dossier_id,
            document_id,
            page_number,
        )
    }

    pub fn remove_pages(&mut self, dossier_id: &Id, page_ids: &[Id]) -> Result<commands::CmdResult> {
        commands::remove_page::run(&mut self.registry, dossier_id, page_ids)
    }

    pub fn reorder_pages(&mut self, dossier_id: &Id, order: &[Id]) -> Result<commands::CmdResult> {
        commands::reorder::run(&mut self.registry, dossier_id, order)
    }

    pub fn add_marker(
        &mut self,
        dossier_id: &Id,
        page_id: &Id,
        text: &str,
    ) -> Result<commands::CmdResult> {
        commands::markers::add(&mut self.registry, dossier_id, page_id, text)
    }

    pub fn remove_marker(
        &mut self,
        dossier_id: &Id,
        page_id: &Id,
        marker_id: &Id,
    ) -> Result<commands::CmdResult> {
        commands::markers::remove(&mut self.registry, dossier_id, page_id, marker_id)
    }

    pub async fn view_dossier(&self, dossier_id: &Id) -> Result<commands::CmdResult> {
        commands::view::run(
            &self.registry,
            &self.catalog,
            dossier_id,
            &self.config.cover_subtitle,
        )
        .await
    }

    /// Translates user-typed positions (`c`, `2`, `1-3`) into page ids of
    /// the given dossier.
    pub fn page_ids_at<I: AsRef<str>>(&self, dossier_id: &Id, inputs: &[I]) -> Result<Vec<Id>> {
        let dossier = self.registry.get(dossier_id)?;
        let positions = parse_positions(inputs, dossier.content_count())?;
        Ok(resolve_positions(dossier, &positions)?
            .into_iter()
            .map(|(_, id)| id)
            .collect())
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&mut self.config, self.config_dir.as_deref(), action)
    }

    /// The current dossier, or [`DossierError::NoSelection`] when nothing is
    /// selected or the selection no longer exists.
    pub fn require_selection(&self) -> Result<Id> {
        self.selected_dossier()
            .cloned()
            .ok_or(DossierError::NoSelection)
    }
}

impl Default for DossierApi {
    fn default() -> Self {
        Self::new(DossierConfig::default())
    }
}

pub use commands::config::ConfigAction;
pub use commands::{
    CmdMessage, CmdResult, DocumentSummary, DossierSummary, DossierView, MessageLevel,
    PagePreview, PageRender, ViewEntry,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeSource;

    #[test]
    fn starts_with_seed_dossiers_and_no_selection() {
        let api = DossierApi::default();
        let result = api.list_dossiers().unwrap();
        let names: Vec<&str> = result.listed_dossiers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Política", "Deportes", "Economía"]);
        assert!(api.selected_dossier().is_none());
    }

    #[test]
    fn add_page_without_selection_fails() {
        let mut api = DossierApi::default();
        let doc = api
            .add_document("Diario", FakeSource::with_pages(2))
            .unwrap()
            .first_id()
            .cloned()
            .unwrap();
        assert!(matches!(
            api.add_page(doc, 1),
            Err(DossierError::NoSelection)
        ));
    }

    #[test]
    fn dangling_selection_counts_as_no_selection() {
        let mut api = DossierApi::default();
        api.select_dossier(Id::from("dossier-ghost")).unwrap();
        assert!(api.selected_dossier().is_none());
        assert!(matches!(
            api.add_page(Id::from("doc-1"), 1),
            Err(DossierError::NoSelection)
        ));
    }

    #[test]
    fn create_dossier_selects_it() {
        let mut api = DossierApi::default();
        let id = api.create_dossier("Cultura").unwrap().first_id().cloned().unwrap();
        assert_eq!(api.selected_dossier(), Some(&id));

        api.add_page(Id::from("doc-1"), 3).unwrap();
        assert_eq!(api.registry().get(&id).unwrap().content_count(), 1);
    }

    #[test]
    fn positions_resolve_to_page_ids() {
        let mut api = DossierApi::default();
        let dossier_id = api.create_dossier("Cultura").unwrap().first_id().cloned().unwrap();
        let first = api.add_page(Id::from("doc-1"), 1).unwrap().first_id().cloned().unwrap();
        let second = api.add_page(Id::from("doc-1"), 2).unwrap().first_id().cloned().unwrap();

        let ids = api.page_ids_at(&dossier_id, &["2", "1"]).unwrap();
        assert_eq!(ids, vec![second, first]);

        assert!(api.page_ids_at(&dossier_id, &["7"]).is_err());
        assert!(matches!(
            api.page_ids_at(&dossier_id, &["1-99999999999999"]),
            Err(DossierError::InvalidIndex(_))
        ));
    }

    #[tokio::test]
    async fn subtitle_set_through_config_shows_on_covers() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut api = DossierApi::default().with_config_dir(temp_dir.path());
        api.config(ConfigAction::Set(
            "cover-subtitle".to_string(),
            "Resumen".to_string(),
        ))
        .unwrap();

        let dossier_id = api.registry().nth(1).unwrap().id().clone();
        let view = api.view_dossier(&dossier_id).await.unwrap().dossier_view.unwrap();
        assert!(matches!(
            &view.entries[0],
            ViewEntry::Cover { subtitle, .. } if subtitle == "Resumen"
        ));
        assert_eq!(
            DossierConfig::load(temp_dir.path()).unwrap().cover_subtitle,
            "Resumen"
        );
    }

    #[tokio::test]
    async fn view_dossier_uses_configured_subtitle() {
        let config = DossierConfig {
            cover_subtitle: "Resumen".to_string(),
            ..DossierConfig::default()
        };
        let api = DossierApi::new(config);
        let dossier_id = api.registry().nth(1).unwrap().id().clone();

        let result = api.view_dossier(&dossier_id).await.unwrap();
        let view = result.dossier_view.unwrap();
        assert!(matches!(
            &view.entries[0],
            ViewEntry::Cover { subtitle, .. } if subtitle == "Resumen"
        ));
    }
}
