//! Core identifier and time types used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the sentinel class id meaning "no class"
pub const NONE_CLASS: &str = "none";

/// Stable symbolic identifier for a player class
///
/// Class ids are snake_case names in an open set; extension packs register
/// new ones at load time. The `none` sentinel is the neutral fallback that
/// lookups resolve to when a name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub String);

impl ClassId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The sentinel id returned when no real class applies
    pub fn none() -> Self {
        Self(NONE_CLASS.to_string())
    }

    pub fn is_none_class(&self) -> bool {
        self.0 == NONE_CLASS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClassId {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Stable symbolic identifier for an ability
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbilityId(pub String);

impl AbilityId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AbilityId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Unique identifier for connected agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix-epoch milliseconds, used for metadata stamps
pub type Timestamp = u64;

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
