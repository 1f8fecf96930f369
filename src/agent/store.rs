//! Persistence boundary for agent class state

use ahash::AHashMap;
use std::path::PathBuf;

use crate::agent::state::AgentClassState;
use crate::core::error::Result;
use crate::core::types::AgentId;

/// Where per-agent class state lives between sessions
///
/// Implementations must treat malformed stored data as absent: a decode
/// failure is logged and `load` returns `None`, so the caller falls back
/// to a fresh default. Load never errors toward the caller.
pub trait ClassStateStore {
    /// Fetch the stored state for an agent, if any
    fn load(&self, agent: AgentId) -> Option<AgentClassState>;

    /// Persist the current state for an agent
    fn save(&mut self, agent: AgentId, state: &AgentClassState) -> Result<()>;
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: AHashMap<AgentId, AgentClassState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ClassStateStore for MemoryStore {
    fn load(&self, agent: AgentId) -> Option<AgentClassState> {
        self.entries.get(&agent).cloned()
    }

    fn save(&mut self, agent: AgentId, state: &AgentClassState) -> Result<()> {
        self.entries.insert(agent, state.clone());
        Ok(())
    }
}

/// One pretty-printed JSON file per agent under a state directory
///
/// The directory is created on first save. File names are the agent uuid.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, agent: AgentId) -> PathBuf {
        self.dir.join(format!("{}.json", agent.0))
    }
}

impl ClassStateStore for JsonFileStore {
    fn load(&self, agent: AgentId) -> Option<AgentClassState> {
        let path = self.path_for(agent);
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Discarding malformed state file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, agent: AgentId, state: &AgentClassState) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(self.path_for(agent), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{Category, ClassCatalog, ClassDefinition};
    use crate::core::types::ClassId;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("arcanum-store-{}", uuid::Uuid::new_v4()))
    }

    fn sample_state() -> AgentClassState {
        let mut catalog = ClassCatalog::new();
        catalog.register(ClassDefinition::new("wizard", "Wizard", Category::Base));
        let mut state = AgentClassState::new();
        state.insert(&catalog, ClassId::from("wizard"), Default::default());
        state
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let agent = AgentId::new();
        assert!(store.load(agent).is_none());

        store.save(agent, &sample_state()).unwrap();
        let loaded = store.load(agent).unwrap();
        assert!(loaded.holds(&ClassId::from("wizard")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = temp_dir();
        let mut store = JsonFileStore::new(&dir);
        let agent = AgentId::new();

        assert!(store.load(agent).is_none());
        store.save(agent, &sample_state()).unwrap();

        let loaded = store.load(agent).unwrap();
        assert!(loaded.holds(&ClassId::from("wizard")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_treated_as_absent() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let mut store = JsonFileStore::new(&dir);
        let agent = AgentId::new();

        std::fs::write(store.path_for(agent), "{ not json").unwrap();
        assert!(store.load(agent).is_none());

        // A save afterwards repairs the file
        store.save(agent, &sample_state()).unwrap();
        assert!(store.load(agent).is_some());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_fields_decode_to_defaults() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let mut store = JsonFileStore::new(&dir);
        let agent = AgentId::new();

        std::fs::write(store.path_for(agent), r#"{"held": ["wizard"]}"#).unwrap();
        let loaded = store.load(agent).unwrap();
        assert!(loaded.holds(&ClassId::from("wizard")));
        assert!(loaded.primary_override().is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
