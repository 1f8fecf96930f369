//! Aggregate catalog surface and its build/freeze lifecycle
//!
//! `Catalogs` bundles the three registries the engine consults. A session
//! goes through two phases: a single-threaded build phase where built-in
//! content and extension packs register themselves, then `freeze`, after
//! which the shared handle is immutable and safe to read from anywhere.

use std::path::Path;
use std::sync::Arc;

use crate::abilities::{Ability, AbilityCatalog};
use crate::classes::{ClassCatalog, ClassDefinition, ConflictRegistry};
use crate::content::builtin;
use crate::content::loader::{self, PackSummary};
use crate::core::error::Result;
use crate::core::types::ClassId;

/// The class, conflict and ability registries as one unit
#[derive(Debug, Default)]
pub struct Catalogs {
    pub classes: ClassCatalog,
    pub conflicts: ConflictRegistry,
    pub abilities: AbilityCatalog,
}

impl Catalogs {
    /// Empty build-phase surface
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build-phase surface preloaded with the built-in wizarding catalog
    pub fn with_builtins() -> Self {
        let mut catalogs = Self::empty();
        builtin::install(&mut catalogs);
        tracing::info!(
            "Built-in catalog installed: {} classes, {} ability grants",
            catalogs.classes.len(),
            catalogs.abilities.grant_count()
        );
        catalogs
    }

    // The four registration points extensions go through. They exist on
    // the facade so packs and code extensions share one surface.

    pub fn register_class(&mut self, def: ClassDefinition) {
        self.classes.register(def);
    }

    pub fn register_mutually_exclusive(&mut self, a: ClassId, b: ClassId) {
        self.conflicts.register_mutually_exclusive(a, b);
    }

    pub fn register_conflicting_abilities(&mut self, a: ClassId, b: ClassId) {
        self.conflicts.register_conflicting_abilities(a, b);
    }

    pub fn register_ability(&mut self, class: ClassId, ability: Ability) {
        self.abilities.register(class, ability);
    }

    /// Load one extension pack file
    pub fn load_extension_file(&mut self, path: &Path) -> Result<PackSummary> {
        loader::load_pack_file(self, path)
    }

    /// Load every pack under a directory
    pub fn load_extension_dir(&mut self, dir: &Path) -> Result<Vec<PackSummary>> {
        loader::load_pack_dir(self, dir)
    }

    /// End the build phase
    ///
    /// The returned handle is cheap to clone and share. No registration
    /// surface remains on it, so held agent state can never be
    /// invalidated by late catalog edits.
    pub fn freeze(self) -> Arc<Catalogs> {
        Arc::new(self)
    }
}
