//! Guarded mutation surface over per-agent class state
//!
//! The manager is the only writer of `AgentClassState`. Every grant runs
//! through the catalog and conflict guards first; a refused grant comes
//! back as a `GrantDenied` value carrying the classification and the
//! offending classes, and nothing is mutated. Business-rule violations
//! never panic.

use ahash::AHashMap;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::abilities::resolver::{self, ActiveAbility};
use crate::agent::state::{AgentClassState, ClassMetadata};
use crate::agent::sync::ClassSnapshot;
use crate::classes::{Category, ConflictKind};
use crate::content::Catalogs;
use crate::core::error::{ArcanumError, Result};
use crate::core::types::{now_millis, AgentId, ClassId};

fn join_ids(ids: &[ClassId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a grant was refused
///
/// The exclusivity variants carry every held class that blocks the
/// candidate, in acquisition order, so callers can surface the complete
/// conflict rather than the first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrantDenied {
    #[error("the reserved 'none' class cannot be granted")]
    NoneClass,

    #[error("class {0} is not registered in the catalog")]
    UnknownClass(ClassId),

    #[error("class {0} is already held")]
    Duplicate(ClassId),

    #[error("class {candidate} is mutually exclusive with held {}", join_ids(.conflicting))]
    MutuallyExclusive {
        candidate: ClassId,
        conflicting: Vec<ClassId>,
    },

    #[error("category {category:?} already holds {}, {candidate} cannot join it", join_ids(.conflicting))]
    SingletonCategory {
        candidate: ClassId,
        category: Category,
        conflicting: Vec<ClassId>,
    },
}

/// Owner of every connected agent's class state
pub struct ClassStateManager {
    catalogs: Arc<Catalogs>,
    states: AHashMap<AgentId, AgentClassState>,
}

impl ClassStateManager {
    pub fn new(catalogs: Arc<Catalogs>) -> Self {
        Self {
            catalogs,
            states: AHashMap::new(),
        }
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Classify a prospective grant without mutating anything
    ///
    /// `None` means the grant would be accepted. Candidates must be
    /// registered in the class catalog. Explicit exclusivity reports
    /// `MutuallyExclusive`; exclusivity that only derives from a shared
    /// singleton category reports `SingletonCategory`. Either way the
    /// denial lists every held class that blocks the candidate.
    pub fn check_grant(&self, agent: AgentId, class: &ClassId) -> Option<GrantDenied> {
        if class.is_none_class() {
            return Some(GrantDenied::NoneClass);
        }
        if !self.catalogs.classes.contains(class) {
            return Some(GrantDenied::UnknownClass(class.clone()));
        }

        let held = self.held_classes(agent);
        for member in held {
            match self
                .catalogs
                .conflicts
                .classify(&self.catalogs.classes, class, member)
            {
                ConflictKind::Duplicate => {
                    return Some(GrantDenied::Duplicate(class.clone()));
                }
                ConflictKind::MutuallyExclusive => {
                    let conflicting = self.catalogs.conflicts.conflicting_members(
                        &self.catalogs.classes,
                        class,
                        held,
                    );
                    let explicit = self
                        .catalogs
                        .conflicts
                        .is_explicitly_exclusive(class, member);
                    return Some(match self.catalogs.classes.category_of(member) {
                        Some(category) if !explicit && category.is_singleton() => {
                            GrantDenied::SingletonCategory {
                                candidate: class.clone(),
                                category,
                                conflicting,
                            }
                        }
                        _ => GrantDenied::MutuallyExclusive {
                            candidate: class.clone(),
                            conflicting,
                        },
                    });
                }
                ConflictKind::ConflictingAbilities | ConflictKind::Compatible => {}
            }
        }
        None
    }

    /// Grant a class to an agent
    ///
    /// On acceptance the class joins the holding with metadata stamped
    /// from the wall clock and `source` (trimmed). On refusal nothing
    /// changes and the reason comes back as a value.
    pub fn add_class(
        &mut self,
        agent: AgentId,
        class: ClassId,
        source: &str,
    ) -> std::result::Result<(), GrantDenied> {
        if let Some(denied) = self.check_grant(agent, &class) {
            tracing::debug!("Grant of {} to {:?} refused: {}", class, agent, denied);
            return Err(denied);
        }

        let meta = ClassMetadata {
            acquired_at: now_millis(),
            acquired_by: source.trim().to_string(),
            custom_data: HashMap::new(),
        };
        let state = self.states.entry(agent).or_default();
        state.insert(&self.catalogs.classes, class.clone(), meta);
        tracing::debug!("Granted {} to {:?}", class, agent);
        Ok(())
    }

    /// Revoke a class from an agent
    ///
    /// Revoking a class that is not held is a quiet no-op returning
    /// false. An override pointing at the removed class is cleared.
    pub fn remove_class(&mut self, agent: AgentId, class: &ClassId) -> bool {
        let removed = match self.states.get_mut(&agent) {
            Some(state) => state.remove(&self.catalogs.classes, class),
            None => false,
        };
        if removed {
            tracing::debug!("Revoked {} from {:?}", class, agent);
        }
        removed
    }

    /// Pin or clear the displayed primary class
    ///
    /// A pinned class must currently be held; clearing always succeeds.
    pub fn set_primary_override(&mut self, agent: AgentId, class: Option<ClassId>) -> Result<()> {
        match class {
            Some(class) => {
                let holds = self
                    .states
                    .get(&agent)
                    .map_or(false, |state| state.holds(&class));
                if !holds {
                    return Err(ArcanumError::ClassNotHeld { agent, class });
                }
                if let Some(state) = self.states.get_mut(&agent) {
                    state.set_override(Some(class));
                }
                Ok(())
            }
            None => {
                if let Some(state) = self.states.get_mut(&agent) {
                    state.set_override(None);
                }
                Ok(())
            }
        }
    }

    /// Effective primary class; the sentinel for unknown or empty agents
    pub fn primary_class(&self, agent: AgentId) -> ClassId {
        self.states
            .get(&agent)
            .map(|state| state.primary().clone())
            .unwrap_or_default()
    }

    /// Held classes in acquisition order; empty for unknown agents
    pub fn held_classes(&self, agent: AgentId) -> &[ClassId] {
        self.states
            .get(&agent)
            .map(|state| state.held())
            .unwrap_or(&[])
    }

    pub fn metadata(&self, agent: AgentId, class: &ClassId) -> Option<&ClassMetadata> {
        self.states.get(&agent).and_then(|state| state.metadata(class))
    }

    /// Mutable metadata access, the write path for `custom_data`
    pub fn metadata_mut(&mut self, agent: AgentId, class: &ClassId) -> Option<&mut ClassMetadata> {
        self.states
            .get_mut(&agent)
            .and_then(|state| state.metadata_mut(class))
    }

    /// Resolved ability set for the agent's current holding
    pub fn abilities(&self, agent: AgentId) -> Vec<ActiveAbility> {
        resolver::resolve(&self.catalogs.abilities, self.held_classes(agent))
    }

    /// Owned copy safe to hand to other threads or the sync layer
    pub fn snapshot(&self, agent: AgentId) -> ClassSnapshot {
        ClassSnapshot {
            agent,
            held: self.held_classes(agent).to_vec(),
            primary: self.primary_class(agent),
            abilities: self.abilities(agent),
        }
    }

    /// Adopt state decoded from a store, repairing its invariants first
    pub fn insert_loaded(&mut self, agent: AgentId, mut state: AgentClassState) {
        state.normalize(&self.catalogs.classes);
        self.states.insert(agent, state);
    }

    /// Drop an agent's in-memory state, returning it for persistence
    pub fn evict(&mut self, agent: AgentId) -> Option<AgentClassState> {
        self.states.remove(&agent)
    }

    pub fn state(&self, agent: AgentId) -> Option<&AgentClassState> {
        self.states.get(&agent)
    }

    pub fn agent_count(&self) -> usize {
        self.states.len()
    }
}
