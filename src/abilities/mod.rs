//! Abilities granted by classes and their collision resolution

pub mod ability;
pub mod catalog;
pub mod resolver;

pub use ability::{Ability, AbilityKind};
pub use catalog::AbilityCatalog;
pub use resolver::{abilities_by_kind, get_ability, has_ability, resolve, ActiveAbility};
