//! Priority-based ability resolution
//!
//! Pure functions over a frozen `AbilityCatalog` and a held-class list.
//! Conflict rules are never consulted here: by the time a holding exists
//! it is already legal, and any classes granting the same ability id
//! simply compete on priority.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::abilities::ability::{Ability, AbilityKind};
use crate::abilities::catalog::AbilityCatalog;
use crate::core::types::{AbilityId, ClassId};

/// An ability that survived resolution, tagged with the granting class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbility {
    pub granted_by: ClassId,
    pub ability: Ability,
}

/// Collision order: higher priority wins; on equal priority the
/// lexicographically smallest granting class id wins.
fn outranks(candidate: &ActiveAbility, current: &ActiveAbility) -> bool {
    match candidate.ability.priority.cmp(&current.ability.priority) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => candidate.granted_by < current.granted_by,
        std::cmp::Ordering::Less => false,
    }
}

/// Resolve the effective ability set for a held-class combination
///
/// Every held class contributes its grants; instances sharing an ability
/// id collapse to a single winner (see `outranks`). The outcome never
/// depends on the order of `held` or on map iteration order. The result
/// is sorted by ability id.
pub fn resolve(catalog: &AbilityCatalog, held: &[ClassId]) -> Vec<ActiveAbility> {
    let mut winners: AHashMap<AbilityId, ActiveAbility> = AHashMap::new();

    for class in held {
        for ability in catalog.abilities_for_class(class) {
            let candidate = ActiveAbility {
                granted_by: class.clone(),
                ability: ability.clone(),
            };
            let wins = match winners.get(&ability.id) {
                None => true,
                Some(current) => outranks(&candidate, current),
            };
            if wins {
                winners.insert(ability.id.clone(), candidate);
            }
        }
    }

    let mut resolved: Vec<ActiveAbility> = winners.into_values().collect();
    resolved.sort_by(|a, b| a.ability.id.cmp(&b.ability.id));
    resolved
}

/// The winning instance of one ability id, if any held class grants it
pub fn get_ability(
    catalog: &AbilityCatalog,
    held: &[ClassId],
    id: &AbilityId,
) -> Option<ActiveAbility> {
    let mut winner: Option<ActiveAbility> = None;
    for class in held {
        for ability in catalog.abilities_for_class(class) {
            if ability.id != *id {
                continue;
            }
            let candidate = ActiveAbility {
                granted_by: class.clone(),
                ability: ability.clone(),
            };
            let wins = match &winner {
                None => true,
                Some(current) => outranks(&candidate, current),
            };
            if wins {
                winner = Some(candidate);
            }
        }
    }
    winner
}

/// Whether the holding grants an ability id at all
pub fn has_ability(catalog: &AbilityCatalog, held: &[ClassId], id: &AbilityId) -> bool {
    get_ability(catalog, held, id).is_some()
}

/// Resolved abilities filtered to one kind, sorted by ability id
pub fn abilities_by_kind(
    catalog: &AbilityCatalog,
    held: &[ClassId],
    kind: AbilityKind,
) -> Vec<ActiveAbility> {
    let mut resolved = resolve(catalog, held);
    resolved.retain(|a| a.ability.kind == kind);
    resolved
}
