//! Class catalog
//!
//! The `ClassCatalog` is the id-keyed registry of every known class
//! definition, with a category index for grouped queries. It is populated
//! during the build phase (built-in content plus extension packs) and read
//! for the rest of the session.

use ahash::AHashMap;

use crate::classes::category::Category;
use crate::classes::definition::ClassDefinition;
use crate::core::types::ClassId;

/// Registry of class definitions
#[derive(Debug, Default)]
pub struct ClassCatalog {
    /// Definitions indexed by id
    classes: AHashMap<ClassId, ClassDefinition>,
    /// Map from category to member ids for filtering
    by_category: AHashMap<Category, Vec<ClassId>>,
}

impl ClassCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class definition
    ///
    /// Re-registering an existing id replaces the definition and logs a
    /// warning. The reserved `none` id is never registered.
    pub fn register(&mut self, def: ClassDefinition) {
        if def.id.is_none_class() {
            tracing::warn!("Ignoring attempt to register the reserved 'none' class id");
            return;
        }

        if let Some(old) = self.classes.get(&def.id) {
            tracing::warn!("Class {} re-registered, replacing definition", def.id);
            if old.category != def.category {
                if let Some(ids) = self.by_category.get_mut(&old.category) {
                    ids.retain(|c| c != &def.id);
                }
            }
        }

        let members = self.by_category.entry(def.category).or_default();
        if !members.contains(&def.id) {
            members.push(def.id.clone());
        }

        self.classes.insert(def.id.clone(), def);
    }

    /// Get a class definition by id
    pub fn get(&self, id: &ClassId) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    /// Category of a registered class
    pub fn category_of(&self, id: &ClassId) -> Option<Category> {
        self.classes.get(id).map(|def| def.category)
    }

    pub fn contains(&self, id: &ClassId) -> bool {
        self.classes.contains_key(id)
    }

    /// Resolve a class name to its id
    ///
    /// Unknown names (including "none" itself) resolve to the `none`
    /// sentinel rather than an error; callers check `is_none_class`.
    pub fn parse(&self, name: &str) -> ClassId {
        let id = ClassId::new(name);
        if self.classes.contains_key(&id) {
            id
        } else {
            ClassId::none()
        }
    }

    /// All registered classes in a category, sorted by id
    pub fn get_by_category(&self, category: Category) -> Vec<&ClassDefinition> {
        let mut defs: Vec<&ClassDefinition> = self
            .by_category
            .get(&category)
            .map(|ids| ids.iter().filter_map(|id| self.classes.get(id)).collect())
            .unwrap_or_default();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
