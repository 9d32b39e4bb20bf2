//! # Dossier Registry
//!
//! Owns every [`Dossier`], keyed by id and listed in creation order, plus the
//! "current dossier" cursor used by the interaction layer.
//!
//! The cursor is not validated when set. A selection that names a dossier
//! that does not exist simply resolves to nothing on lookup.

use crate::error::{DossierError, EntityKind, Result};
use crate::id::{Id, IdGenerator};
use crate::model::Dossier;
use indexmap::IndexMap;

/// Names of the dossiers every session starts with.
pub const DEFAULT_DOSSIERS: [&str; 3] = ["Política", "Deportes", "Economía"];

#[derive(Debug, Default)]
pub struct DossierRegistry {
    dossiers: IndexMap<Id, Dossier>,
    selected: Option<Id>,
    ids: IdGenerator,
}

impl DossierRegistry {
    /// An empty registry. Use [`DossierRegistry::seeded`] for the startup set.
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            dossiers: IndexMap::new(),
            selected: None,
            ids,
        }
    }

    /// A registry pre-populated with one dossier per name, none selected.
    /// Blank names are skipped.
    pub fn seeded<S: AsRef<str>>(names: &[S], ids: IdGenerator) -> Self {
        let mut registry = Self::new(ids);
        for name in names {
            if let Err(err) = registry.create(name.as_ref()) {
                tracing::warn!(name = name.as_ref(), error = %err, "skipping seed dossier");
            }
        }
        registry
    }

    pub fn create(&mut self, name: &str) -> Result<Id> {
        let dossier = Dossier::create_with(name, self.ids)?;
        let id = dossier.id().clone();
        tracing::debug!(dossier = %id, name = dossier.name(), "dossier created");
        self.dossiers.insert(id.clone(), dossier);
        Ok(id)
    }

    pub fn get(&self, id: &Id) -> Result<&Dossier> {
        self.dossiers
            .get(id)
            .ok_or_else(|| DossierError::not_found(EntityKind::Dossier, id))
    }

    pub fn get_mut(&mut self, id: &Id) -> Result<&mut Dossier> {
        self.dossiers
            .get_mut(id)
            .ok_or_else(|| DossierError::not_found(EntityKind::Dossier, id))
    }

    /// Dossiers in creation order.
    pub fn list(&self) -> impl Iterator<Item = &Dossier> {
        self.dossiers.values()
    }

    /// Looks a dossier up by its 1-based position in [`DossierRegistry::list`].
    pub fn nth(&self, position: usize) -> Option<&Dossier> {
        position
            .checked_sub(1)
            .and_then(|i| self.dossiers.get_index(i))
            .map(|(_, dossier)| dossier)
    }

    pub fn len(&self) -> usize {
        self.dossiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dossiers.is_empty()
    }

    pub fn select(&mut self, id: Id) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn current_selection(&self) -> Option<&Id> {
        self.selected.as_ref()
    }

    /// The selected dossier, if the selection still points at one.
    pub fn selected(&self) -> Option<&Dossier> {
        self.selected.as_ref().and_then(|id| self.dossiers.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Dossier> {
        match &self.selected {
            Some(id) => self.dossiers.get_mut(id),
            None => None,
        }
    }
}
