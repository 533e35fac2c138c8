//! Save/load persistence
//!
//! Features:
//! - Pluggable key-value storage (LocalStorage on web)
//! - JSON save blob with per-field fallback on load
//! - Periodic autosave timer

pub mod autosave;
pub mod save;
pub mod storage;

pub use autosave::AutosaveTimer;
pub use save::{LoadReport, load_state, serialize_state};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
