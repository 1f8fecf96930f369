//! Network synchronization boundary

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::abilities::ActiveAbility;
use crate::core::types::{AgentId, ClassId};

/// Wire-ready view of one agent's class state
///
/// Snapshots are owned copies; the producing thread keeps no reference
/// into them, so a transport may carry them anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    pub agent: AgentId,
    pub held: Vec<ClassId>,
    pub primary: ClassId,
    pub abilities: Vec<ActiveAbility>,
}

/// Outbound channel mirroring class changes to interested clients
pub trait SyncChannel {
    /// Queue one snapshot for delivery
    fn push(&mut self, snapshot: &ClassSnapshot);
}

/// Discards every snapshot
#[derive(Debug, Default)]
pub struct NullSync;

impl SyncChannel for NullSync {
    fn push(&mut self, _snapshot: &ClassSnapshot) {}
}

/// Logs each snapshot, standing in for the packet layer during development
#[derive(Debug, Default)]
pub struct LogSync;

impl SyncChannel for LogSync {
    fn push(&mut self, snapshot: &ClassSnapshot) {
        tracing::debug!(
            "Sync {:?}: primary {}, {} classes, {} abilities",
            snapshot.agent,
            snapshot.primary,
            snapshot.held.len(),
            snapshot.abilities.len()
        );
    }
}

/// Buffers snapshots for a transport to drain later
///
/// Clones share the buffer, so the producer can own one handle while the
/// transport (or a test) drains through another.
#[derive(Debug, Default, Clone)]
pub struct BufferedSync {
    queue: Arc<Mutex<Vec<ClassSnapshot>>>,
}

impl BufferedSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything queued so far
    pub fn drain(&self) -> Vec<ClassSnapshot> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SyncChannel for BufferedSync {
    fn push(&mut self, snapshot: &ClassSnapshot) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(snapshot.clone());
        }
    }
}
