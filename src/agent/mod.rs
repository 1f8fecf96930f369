//! Per-agent class state, guarded mutations and session lifecycle

pub mod manager;
pub mod service;
pub mod state;
pub mod store;
pub mod sync;

pub use manager::{ClassStateManager, GrantDenied};
pub use service::ClassService;
pub use state::{derive_primary, AgentClassState, ClassMetadata};
pub use store::{ClassStateStore, JsonFileStore, MemoryStore};
pub use sync::{BufferedSync, ClassSnapshot, LogSync, NullSync, SyncChannel};
