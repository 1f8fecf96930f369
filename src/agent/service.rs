//! Session lifecycle glue
//!
//! `ClassService` wires the manager to a store and a sync channel. It is
//! the integration point a server embeds: connect/disconnect hooks plus
//! grant/revoke/override wrappers that persist and mirror on success.

use std::sync::Arc;

use crate::agent::manager::{ClassStateManager, GrantDenied};
use crate::agent::store::ClassStateStore;
use crate::agent::sync::SyncChannel;
use crate::content::Catalogs;
use crate::core::error::Result;
use crate::core::types::{AgentId, ClassId};

pub struct ClassService {
    manager: ClassStateManager,
    store: Box<dyn ClassStateStore>,
    sync: Box<dyn SyncChannel>,
    autosave: bool,
}

impl ClassService {
    pub fn new(
        catalogs: Arc<Catalogs>,
        store: Box<dyn ClassStateStore>,
        sync: Box<dyn SyncChannel>,
    ) -> Self {
        Self {
            manager: ClassStateManager::new(catalogs),
            store,
            sync,
            autosave: true,
        }
    }

    /// Disable or enable the per-mutation save. Disconnect always saves.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Read access to state and catalogs; mutations go through the
    /// service so they persist and mirror
    pub fn manager(&self) -> &ClassStateManager {
        &self.manager
    }

    /// Restore stored state (if any) and push an initial snapshot
    pub fn on_agent_connected(&mut self, agent: AgentId) {
        if let Some(state) = self.store.load(agent) {
            self.manager.insert_loaded(agent, state);
            tracing::info!("Restored class state for {:?}", agent);
        }
        let snapshot = self.manager.snapshot(agent);
        self.sync.push(&snapshot);
    }

    /// Save and drop the agent's in-memory state
    ///
    /// The save happens before eviction, so a failed save leaves the
    /// state in memory instead of losing it.
    pub fn on_agent_disconnected(&mut self, agent: AgentId) -> Result<()> {
        if let Some(state) = self.manager.state(agent) {
            self.store.save(agent, state)?;
            tracing::info!("Saved class state for {:?}", agent);
        }
        self.manager.evict(agent);
        Ok(())
    }

    /// Grant a class; on success the new state is saved and mirrored
    pub fn grant(
        &mut self,
        agent: AgentId,
        class: ClassId,
        source: &str,
    ) -> std::result::Result<(), GrantDenied> {
        self.manager.add_class(agent, class, source)?;
        self.after_mutation(agent);
        Ok(())
    }

    /// Revoke a class; a real removal is saved and mirrored
    pub fn revoke(&mut self, agent: AgentId, class: &ClassId) -> bool {
        let removed = self.manager.remove_class(agent, class);
        if removed {
            self.after_mutation(agent);
        }
        removed
    }

    /// Pin or clear the primary override; applied changes are saved and
    /// mirrored
    pub fn set_primary_override(&mut self, agent: AgentId, class: Option<ClassId>) -> Result<()> {
        self.manager.set_primary_override(agent, class)?;
        self.after_mutation(agent);
        Ok(())
    }

    /// Save failures after an applied mutation are logged, not
    /// propagated; the in-memory change stands and disconnect retries
    /// the save.
    fn after_mutation(&mut self, agent: AgentId) {
        if self.autosave {
            if let Some(state) = self.manager.state(agent) {
                if let Err(e) = self.store.save(agent, state) {
                    tracing::warn!("Autosave failed for {:?}: {}", agent, e);
                }
            }
        }
        let snapshot = self.manager.snapshot(agent);
        self.sync.push(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::store::MemoryStore;
    use crate::agent::sync::BufferedSync;
    use crate::content::builtin;

    fn id(name: &str) -> ClassId {
        ClassId::from(name)
    }

    fn service_with_mirror() -> (ClassService, BufferedSync) {
        let mirror = BufferedSync::new();
        let service = ClassService::new(
            Catalogs::with_builtins().freeze(),
            Box::new(MemoryStore::new()),
            Box::new(mirror.clone()),
        );
        (service, mirror)
    }

    #[test]
    fn test_connect_pushes_initial_snapshot() {
        let (mut service, mirror) = service_with_mirror();
        let agent = AgentId::new();

        service.on_agent_connected(agent);

        let pushed = mirror.drain();
        assert_eq!(pushed.len(), 1);
        assert!(pushed[0].primary.is_none_class());
        assert!(pushed[0].held.is_empty());
    }

    #[test]
    fn test_grant_mirrors_fresh_snapshot() {
        let (mut service, mirror) = service_with_mirror();
        let agent = AgentId::new();
        service.on_agent_connected(agent);
        mirror.drain();

        service.grant(agent, id(builtin::WIZARD), "test").unwrap();

        let pushed = mirror.drain();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].primary, id(builtin::WIZARD));
        assert_eq!(pushed[0].held, vec![id(builtin::WIZARD)]);
    }

    #[test]
    fn test_denied_grant_pushes_nothing() {
        let (mut service, mirror) = service_with_mirror();
        let agent = AgentId::new();
        service.on_agent_connected(agent);
        service.grant(agent, id(builtin::WIZARD), "test").unwrap();
        mirror.drain();

        assert!(service.grant(agent, id(builtin::MUGGLE), "test").is_err());
        assert!(mirror.is_empty());
    }

    #[test]
    fn test_revoke_of_unheld_pushes_nothing() {
        let (mut service, mirror) = service_with_mirror();
        let agent = AgentId::new();
        service.on_agent_connected(agent);
        mirror.drain();

        assert!(!service.revoke(agent, &id(builtin::WIZARD)));
        assert!(mirror.is_empty());
    }

    #[test]
    fn test_disconnect_then_reconnect_restores() {
        let (mut service, _mirror) = service_with_mirror();
        let agent = AgentId::new();

        service.on_agent_connected(agent);
        service.grant(agent, id(builtin::WIZARD), "test").unwrap();
        service.grant(agent, id(builtin::AUROR), "test").unwrap();
        service.on_agent_disconnected(agent).unwrap();
        assert_eq!(service.manager().agent_count(), 0);

        service.on_agent_connected(agent);
        let held = service.manager().held_classes(agent);
        assert_eq!(held, &[id(builtin::WIZARD), id(builtin::AUROR)]);
        assert_eq!(service.manager().primary_class(agent), id(builtin::WIZARD));
    }
}
