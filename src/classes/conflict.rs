//! Conflict rules between classes
//!
//! Two kinds of relation exist. `MutuallyExclusive` is hard: the pair can
//! never be held together. `ConflictingAbilities` is soft: the pair is
//! allowed but flagged, and their overlapping grants are settled later by
//! the ability resolver. Both relations are symmetric and stored as
//! adjacency sets in each direction.
//!
//! Exclusivity also derives from categories: two distinct classes sharing
//! a singleton category are mutually exclusive without any registration.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::classes::catalog::ClassCatalog;
use crate::core::types::ClassId;

/// How two classes relate when considered for the same holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Same class twice
    Duplicate,
    /// The pair can never be held together
    MutuallyExclusive,
    /// Both may be held; overlapping grants resolve by priority
    ConflictingAbilities,
    Compatible,
}

/// Registry of conflict relations between classes
#[derive(Debug, Default)]
pub struct ConflictRegistry {
    exclusive: AHashMap<ClassId, AHashSet<ClassId>>,
    soft: AHashMap<ClassId, AHashSet<ClassId>>,
}

impl ConflictRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that two classes can never be held together
    ///
    /// Insertion is symmetric and idempotent. A self-pair is ignored with
    /// a warning.
    pub fn register_mutually_exclusive(&mut self, a: ClassId, b: ClassId) {
        if a == b {
            tracing::warn!("Ignoring self-referential exclusivity for {}", a);
            return;
        }
        self.exclusive.entry(a.clone()).or_default().insert(b.clone());
        self.exclusive.entry(b).or_default().insert(a);
    }

    /// Declare that two classes grant overlapping abilities
    ///
    /// The pair stays holdable; the relation only marks that their grants
    /// collide. Symmetric and idempotent, self-pairs ignored.
    pub fn register_conflicting_abilities(&mut self, a: ClassId, b: ClassId) {
        if a == b {
            tracing::warn!("Ignoring self-referential ability conflict for {}", a);
            return;
        }
        self.soft.entry(a.clone()).or_default().insert(b.clone());
        self.soft.entry(b).or_default().insert(a);
    }

    /// True when the pair was explicitly registered as mutually exclusive
    ///
    /// Category-derived exclusivity does not count here; use `classify`
    /// for the full picture.
    pub fn is_explicitly_exclusive(&self, a: &ClassId, b: &ClassId) -> bool {
        self.exclusive.get(a).map_or(false, |set| set.contains(b))
    }

    /// Classify the relation between two class ids
    ///
    /// Explicit registrations are checked before category-derived
    /// exclusivity, so a registered pair always reports its registered
    /// kind.
    pub fn classify(&self, catalog: &ClassCatalog, a: &ClassId, b: &ClassId) -> ConflictKind {
        if a == b {
            return ConflictKind::Duplicate;
        }
        if self.is_explicitly_exclusive(a, b) {
            return ConflictKind::MutuallyExclusive;
        }
        if self.soft.get(a).map_or(false, |set| set.contains(b)) {
            return ConflictKind::ConflictingAbilities;
        }
        if let (Some(ca), Some(cb)) = (catalog.category_of(a), catalog.category_of(b)) {
            if ca == cb && ca.is_singleton() {
                return ConflictKind::MutuallyExclusive;
            }
        }
        ConflictKind::Compatible
    }

    /// Whether a candidate class may join a holding
    ///
    /// False for the `none` sentinel, duplicates and any hard conflict.
    /// A soft conflict never blocks.
    pub fn can_add(&self, catalog: &ClassCatalog, candidate: &ClassId, held: &[ClassId]) -> bool {
        if candidate.is_none_class() {
            return false;
        }
        held.iter().all(|member| {
            matches!(
                self.classify(catalog, candidate, member),
                ConflictKind::Compatible | ConflictKind::ConflictingAbilities
            )
        })
    }

    /// Held members that block a candidate, for diagnostics
    ///
    /// Lists every member classifying as `Duplicate` or
    /// `MutuallyExclusive` against the candidate. Soft conflicts are not
    /// included because they do not block.
    pub fn conflicting_members(
        &self,
        catalog: &ClassCatalog,
        candidate: &ClassId,
        held: &[ClassId],
    ) -> Vec<ClassId> {
        held.iter()
            .filter(|member| {
                matches!(
                    self.classify(catalog, candidate, member),
                    ConflictKind::Duplicate | ConflictKind::MutuallyExclusive
                )
            })
            .cloned()
            .collect()
    }

    /// Explicitly registered exclusive partners of a class, sorted
    pub fn exclusive_partners(&self, id: &ClassId) -> Vec<ClassId> {
        let mut partners: Vec<ClassId> = self
            .exclusive
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        partners.sort();
        partners
    }

    /// Registered soft-conflict partners of a class, sorted
    pub fn soft_partners(&self, id: &ClassId) -> Vec<ClassId> {
        let mut partners: Vec<ClassId> = self
            .soft
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        partners.sort();
        partners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::category::Category;
    use crate::classes::definition::ClassDefinition;

    fn id(name: &str) -> ClassId {
        ClassId::from(name)
    }

    fn test_catalog() -> ClassCatalog {
        let mut catalog = ClassCatalog::new();
        catalog.register(ClassDefinition::new("wizard", "Wizard", Category::Base));
        catalog.register(ClassDefinition::new("muggle", "Muggle", Category::Base));
        catalog.register(ClassDefinition::new("auror", "Auror", Category::Role));
        catalog.register(ClassDefinition::new("dark_wizard", "Dark Wizard", Category::Role));
        catalog.register(ClassDefinition::new(
            "death_eater",
            "Death Eater",
            Category::Organization,
        ));
        catalog.register(ClassDefinition::new(
            "order_member",
            "Order Member",
            Category::Organization,
        ));
        catalog
    }

    #[test]
    fn test_exclusivity_is_symmetric() {
        let catalog = test_catalog();
        let mut registry = ConflictRegistry::new();
        registry.register_mutually_exclusive(id("wizard"), id("muggle"));

        assert!(!registry.can_add(&catalog, &id("muggle"), &[id("wizard")]));
        assert!(!registry.can_add(&catalog, &id("wizard"), &[id("muggle")]));
        assert!(registry.is_explicitly_exclusive(&id("wizard"), &id("muggle")));
        assert!(registry.is_explicitly_exclusive(&id("muggle"), &id("wizard")));
    }

    #[test]
    fn test_self_pair_ignored() {
        let catalog = test_catalog();
        let mut registry = ConflictRegistry::new();
        registry.register_mutually_exclusive(id("wizard"), id("wizard"));

        assert_eq!(
            registry.classify(&catalog, &id("wizard"), &id("wizard")),
            ConflictKind::Duplicate
        );
        assert!(registry.exclusive_partners(&id("wizard")).is_empty());
    }

    #[test]
    fn test_duplicate_never_addable() {
        let catalog = test_catalog();
        let registry = ConflictRegistry::new();
        assert!(!registry.can_add(&catalog, &id("wizard"), &[id("wizard")]));
    }

    #[test]
    fn test_sentinel_never_addable() {
        let catalog = test_catalog();
        let registry = ConflictRegistry::new();
        assert!(!registry.can_add(&catalog, &ClassId::none(), &[]));
    }

    #[test]
    fn test_singleton_category_derives_exclusivity() {
        let catalog = test_catalog();
        let registry = ConflictRegistry::new();

        // No registration between the two organizations
        assert_eq!(
            registry.classify(&catalog, &id("death_eater"), &id("order_member")),
            ConflictKind::MutuallyExclusive
        );
        assert!(!registry.can_add(&catalog, &id("order_member"), &[id("death_eater")]));
        assert!(!registry.is_explicitly_exclusive(&id("death_eater"), &id("order_member")));
    }

    #[test]
    fn test_non_singleton_category_is_compatible() {
        let catalog = test_catalog();
        let registry = ConflictRegistry::new();
        assert_eq!(
            registry.classify(&catalog, &id("auror"), &id("dark_wizard")),
            ConflictKind::Compatible
        );
    }

    #[test]
    fn test_soft_conflict_is_advisory() {
        let catalog = test_catalog();
        let mut registry = ConflictRegistry::new();
        registry.register_conflicting_abilities(id("auror"), id("dark_wizard"));

        assert_eq!(
            registry.classify(&catalog, &id("auror"), &id("dark_wizard")),
            ConflictKind::ConflictingAbilities
        );
        assert!(registry.can_add(&catalog, &id("dark_wizard"), &[id("auror")]));
        assert!(registry.can_add(&catalog, &id("auror"), &[id("dark_wizard")]));
    }

    #[test]
    fn test_conflicting_members_lists_blockers_only() {
        let catalog = test_catalog();
        let mut registry = ConflictRegistry::new();
        registry.register_mutually_exclusive(id("auror"), id("death_eater"));
        registry.register_conflicting_abilities(id("auror"), id("dark_wizard"));

        let held = [id("auror"), id("dark_wizard")];
        let blockers = registry.conflicting_members(&catalog, &id("death_eater"), &held);
        assert_eq!(blockers, vec![id("auror")]);

        // Soft conflicts never appear in the blocker list
        let held = [id("dark_wizard")];
        assert!(registry
            .conflicting_members(&catalog, &id("auror"), &held)
            .is_empty());
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut registry = ConflictRegistry::new();
        registry.register_mutually_exclusive(id("wizard"), id("muggle"));
        registry.register_mutually_exclusive(id("muggle"), id("wizard"));
        registry.register_mutually_exclusive(id("wizard"), id("muggle"));

        assert_eq!(registry.exclusive_partners(&id("wizard")), vec![id("muggle")]);
        assert_eq!(registry.exclusive_partners(&id("muggle")), vec![id("wizard")]);
    }

    #[test]
    fn test_unknown_classes_compatible_without_registration() {
        // Ids the catalog does not know have no category, so only explicit
        // registrations can relate them
        let catalog = test_catalog();
        let mut registry = ConflictRegistry::new();
        assert_eq!(
            registry.classify(&catalog, &id("ghost"), &id("poltergeist")),
            ConflictKind::Compatible
        );
        registry.register_mutually_exclusive(id("ghost"), id("poltergeist"));
        assert_eq!(
            registry.classify(&catalog, &id("ghost"), &id("poltergeist")),
            ConflictKind::MutuallyExclusive
        );
    }
}
