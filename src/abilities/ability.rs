//! Ability value types

use crate::core::types::AbilityId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What kind of effect an ability represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    /// Always on while held
    Passive,
    /// Invoked by the player
    Active,
    /// Gates access to an action or area
    Permission,
    /// Adjusts a stat while held
    StatModifier,
}

impl AbilityKind {
    /// Parse the snake_case name used by console commands. Pack files
    /// deserialize kinds through serde instead.
    pub fn parse(name: &str) -> Option<AbilityKind> {
        match name {
            "passive" => Some(AbilityKind::Passive),
            "active" => Some(AbilityKind::Active),
            "permission" => Some(AbilityKind::Permission),
            "stat_modifier" => Some(AbilityKind::StatModifier),
            _ => None,
        }
    }
}

/// Immutable ability granted by a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: AbilityKind,
    /// Collision precedence. When several held classes grant the same
    /// ability id, the highest priority instance wins.
    #[serde(default)]
    pub priority: i32,
    /// Free-form key/value payload consumed by gameplay systems.
    /// Keys are unique; ordering carries no meaning.
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Ability {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: AbilityKind,
        priority: i32,
    ) -> Self {
        Self {
            id: AbilityId::new(id),
            name: name.into(),
            description: String::new(),
            kind,
            priority,
            properties: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|v| v.as_str())
    }
}
