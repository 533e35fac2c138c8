//! Doggo Merge - a dog-breed merge game for Telegram Mini Apps
//!
//! Core modules:
//! - `game`: Deterministic game state (board, wallet, discoveries, merge rules)
//! - `engine`: Stateful engine driving selection, RNG and persistence
//! - `persistence`: Key-value storage, save format, autosave
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser bindings (LocalStorage, Telegram host, JS API)

pub mod collection;
pub mod engine;
pub mod feedback;
pub mod game;
pub mod identity;
pub mod persistence;
pub mod platform;
pub mod tuning;

pub use engine::{EngineOptions, GameEngine, Outcome, SelectOutcome, Snapshot};
pub use feedback::{Feedback, FeedbackSink};
pub use game::{Board, Breed, Catalog, DiscoverySet, GameError, GameState, Piece, Wallet};
pub use identity::HostIdentity;
pub use persistence::{KeyValueStore, MemoryStore, StorageError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Board dimensions (4x4)
    pub const GRID_ROWS: usize = 4;
    pub const GRID_COLS: usize = 4;

    /// Highest level a piece can reach
    pub const MAX_LEVEL: u8 = 5;

    /// Price of an egg (spawns a level-1 piece)
    pub const EGG_PRICE: u64 = 10;
    /// Bones granted per level of the merged piece
    pub const REWARD_PER_LEVEL: u64 = 10;
    /// Flat bonus for hatching a breed for the first time
    pub const DISCOVERY_BONUS: u64 = 5;
    /// Price of deleting a piece from the board
    pub const REMOVAL_PRICE: u64 = 5;

    /// Starting wallet
    pub const STARTING_BONES: u64 = 100;
    pub const STARTING_GEMS: u64 = 0;

    /// Background save interval (ms)
    pub const AUTOSAVE_INTERVAL_MS: f64 = 10_000.0;

    /// LocalStorage key; changing it is a save schema bump
    pub const STORAGE_KEY: &str = "doggo_save";
}
