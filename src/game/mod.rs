//! Deterministic game state module
//!
//! All merge-game rules live here. This module must stay pure:
//! - No storage or platform access
//! - Randomness is decided by the caller (breed is passed in)
//! - Slot allocation is always lowest index first

pub mod board;
pub mod catalog;
pub mod discovery;
pub mod error;
pub mod rules;
pub mod state;

pub use board::Board;
pub use catalog::{Breed, Catalog};
pub use discovery::{DiscoverySet, discovery_key, parse_discovery_key};
pub use error::GameError;
pub use rules::{Merged, Removed, Spawned, check_merge, merge, remove, spawn};
pub use state::{GameState, Piece, Wallet};
