//! Class-to-ability grant catalog

use ahash::AHashMap;

use crate::abilities::ability::Ability;
use crate::core::types::ClassId;

/// Registry of which abilities each class grants
///
/// A class maps to the list of abilities it contributes. The same ability
/// id may appear under several classes at different priorities; that
/// collision is settled by the resolver, not here.
#[derive(Debug, Default)]
pub struct AbilityCatalog {
    grants: AHashMap<ClassId, Vec<Ability>>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant an ability through a class
    ///
    /// Re-registering the same ability id under the same class replaces
    /// the earlier instance, so packs can re-tune priorities.
    pub fn register(&mut self, class: ClassId, ability: Ability) {
        let grants = self.grants.entry(class).or_default();
        if let Some(existing) = grants.iter_mut().find(|a| a.id == ability.id) {
            tracing::debug!(
                "Replacing grant {} (priority {} -> {})",
                ability.id,
                existing.priority,
                ability.priority
            );
            *existing = ability;
        } else {
            grants.push(ability);
        }
    }

    /// Raw grant list for one class, unresolved
    pub fn abilities_for_class(&self, class: &ClassId) -> &[Ability] {
        self.grants.get(class).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Classes that grant at least one ability, sorted
    pub fn granting_classes(&self) -> Vec<ClassId> {
        let mut classes: Vec<ClassId> = self
            .grants
            .iter()
            .filter(|(_, abilities)| !abilities.is_empty())
            .map(|(class, _)| class.clone())
            .collect();
        classes.sort();
        classes
    }

    /// Total number of grant entries across all classes
    pub fn grant_count(&self) -> usize {
        self.grants.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grant_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::ability::AbilityKind;

    #[test]
    fn test_register_and_list() {
        let mut catalog = AbilityCatalog::new();
        catalog.register(
            ClassId::from("wizard"),
            Ability::new("spellcasting", "Spellcasting", AbilityKind::Permission, 10),
        );
        catalog.register(
            ClassId::from("wizard"),
            Ability::new("apparition", "Apparition", AbilityKind::Permission, 10),
        );

        assert_eq!(catalog.abilities_for_class(&ClassId::from("wizard")).len(), 2);
        assert!(catalog.abilities_for_class(&ClassId::from("muggle")).is_empty());
        assert_eq!(catalog.grant_count(), 2);
    }

    #[test]
    fn test_reregistration_replaces_instance() {
        let mut catalog = AbilityCatalog::new();
        catalog.register(
            ClassId::from("auror"),
            Ability::new("apparition", "Apparition", AbilityKind::Permission, 10),
        );
        catalog.register(
            ClassId::from("auror"),
            Ability::new("apparition", "Apparition", AbilityKind::Permission, 20),
        );

        let grants = catalog.abilities_for_class(&ClassId::from("auror"));
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].priority, 20);
    }

    #[test]
    fn test_granting_classes_sorted() {
        let mut catalog = AbilityCatalog::new();
        catalog.register(
            ClassId::from("wizard"),
            Ability::new("spellcasting", "Spellcasting", AbilityKind::Permission, 10),
        );
        catalog.register(
            ClassId::from("auror"),
            Ability::new("track_dark_magic", "Track Dark Magic", AbilityKind::Active, 10),
        );

        assert_eq!(
            catalog.granting_classes(),
            vec![ClassId::from("auror"), ClassId::from("wizard")]
        );
    }
}
