//! Per-agent class holdings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::classes::{Category, ClassCatalog};
use crate::core::types::{ClassId, Timestamp};

/// Bookkeeping recorded when a class is granted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    /// Unix-millisecond stamp of the grant
    #[serde(default)]
    pub acquired_at: Timestamp,
    /// What performed the grant (a command, a quest id, an admin tool)
    #[serde(default)]
    pub acquired_by: String,
    /// Free-form payload attached by gameplay systems
    #[serde(default)]
    pub custom_data: HashMap<String, String>,
}

impl ClassMetadata {
    pub fn new(acquired_at: Timestamp, acquired_by: impl Into<String>) -> Self {
        Self {
            acquired_at,
            acquired_by: acquired_by.into(),
            custom_data: HashMap::new(),
        }
    }
}

/// Mutable class holdings for one agent
///
/// Invariants maintained by the mutation methods: `held` has no
/// duplicates, `metadata` keys equal the held set exactly, and an
/// override always points at a held class.
///
/// The persisted shape is `held`, `primary_override` and `metadata`; the
/// `primary` cache is derived and recomputed after loading and after
/// every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentClassState {
    #[serde(default)]
    held: Vec<ClassId>,
    #[serde(default)]
    primary_override: Option<ClassId>,
    #[serde(default)]
    metadata: HashMap<ClassId, ClassMetadata>,
    /// Derived primary, see `derive_primary`. Not persisted.
    #[serde(skip)]
    primary: ClassId,
}

impl AgentClassState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Held classes in acquisition order
    pub fn held(&self) -> &[ClassId] {
        &self.held
    }

    pub fn holds(&self, class: &ClassId) -> bool {
        self.held.contains(class)
    }

    pub fn metadata(&self, class: &ClassId) -> Option<&ClassMetadata> {
        self.metadata.get(class)
    }

    /// Mutable metadata access for gameplay systems attaching custom data
    pub fn metadata_mut(&mut self, class: &ClassId) -> Option<&mut ClassMetadata> {
        self.metadata.get_mut(class)
    }

    pub fn primary_override(&self) -> Option<&ClassId> {
        self.primary_override.as_ref()
    }

    /// Effective primary: the override when set, the derived cache otherwise
    pub fn primary(&self) -> &ClassId {
        self.primary_override.as_ref().unwrap_or(&self.primary)
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Insert a class with its metadata. Caller has already passed the
    /// conflict guards; a duplicate insert is a no-op.
    pub(crate) fn insert(&mut self, catalog: &ClassCatalog, class: ClassId, meta: ClassMetadata) {
        if self.holds(&class) {
            return;
        }
        self.metadata.insert(class.clone(), meta);
        self.held.push(class);
        self.refresh_primary(catalog);
    }

    /// Remove a class and its metadata. Clears the override when it
    /// pointed at the removed class. Returns false when not held.
    pub(crate) fn remove(&mut self, catalog: &ClassCatalog, class: &ClassId) -> bool {
        if !self.holds(class) {
            return false;
        }
        self.held.retain(|c| c != class);
        self.metadata.remove(class);
        if self.primary_override.as_ref() == Some(class) {
            self.primary_override = None;
        }
        self.refresh_primary(catalog);
        true
    }

    /// Set or clear the override. Caller validates that a set target is
    /// held.
    pub(crate) fn set_override(&mut self, class: Option<ClassId>) {
        self.primary_override = class;
    }

    pub(crate) fn refresh_primary(&mut self, catalog: &ClassCatalog) {
        self.primary = derive_primary(catalog, &self.held);
    }

    /// Repair invariants after decoding externally supplied state
    ///
    /// Duplicates, ids the catalog does not know and the `none` sentinel
    /// are dropped from `held`, metadata is aligned to the held set
    /// (missing entries default), a stale override is cleared and the
    /// primary cache is rebuilt.
    pub(crate) fn normalize(&mut self, catalog: &ClassCatalog) {
        let mut seen: Vec<ClassId> = Vec::new();
        self.held.retain(|class| {
            if class.is_none_class() || !catalog.contains(class) || seen.contains(class) {
                tracing::warn!("Dropping invalid held entry {} during decode", class);
                false
            } else {
                seen.push(class.clone());
                true
            }
        });

        self.metadata.retain(|class, _| seen.contains(class));
        for class in &self.held {
            self.metadata.entry(class.clone()).or_default();
        }

        if let Some(pinned) = &self.primary_override {
            if !self.held.contains(pinned) {
                tracing::warn!("Dropping stale primary override {}", pinned);
                self.primary_override = None;
            }
        }

        self.refresh_primary(catalog);
    }
}

/// Derive the representative class for a holding
///
/// Categories are walked in `Category::priority_order`; within the first
/// category that has held members, the lexicographically smallest class
/// id wins. An empty holding derives the `none` sentinel. Held ids the
/// catalog does not know are skipped.
pub fn derive_primary(catalog: &ClassCatalog, held: &[ClassId]) -> ClassId {
    for category in Category::priority_order() {
        let mut best: Option<&ClassId> = None;
        for class in held {
            if catalog.category_of(class) != Some(category) {
                continue;
            }
            match best {
                None => best = Some(class),
                Some(current) if class < current => best = Some(class),
                Some(_) => {}
            }
        }
        if let Some(class) = best {
            return class.clone();
        }
    }
    ClassId::none()
}
