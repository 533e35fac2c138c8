//! Game state and core types
//!
//! Everything here is persisted except the engine's selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::discovery::DiscoverySet;
use super::error::GameError;
use crate::tuning::Tuning;

/// A dog on the board. Never mutated; merging replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    breed: String,
    level: u8,
}

impl Piece {
    pub fn new(breed: &str, level: u8) -> Self {
        Self {
            breed: breed.to_string(),
            level,
        }
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// The piece a merge of two of these produces
    pub fn promoted(&self) -> Self {
        Self {
            breed: self.breed.clone(),
            level: self.level.saturating_add(1),
        }
    }
}

/// Currency counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub bones: u64,
    /// Secondary currency, persisted but not spent by any rule yet
    pub gems: u64,
}

impl Wallet {
    pub fn new(bones: u64, gems: u64) -> Self {
        Self { bones, gems }
    }

    /// Check that `amount` bones are available without spending them
    pub fn ensure_bones(&self, amount: u64) -> Result<(), GameError> {
        if self.bones < amount {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: self.bones,
            });
        }
        Ok(())
    }

    pub fn spend_bones(&mut self, amount: u64) -> Result<(), GameError> {
        self.ensure_bones(amount)?;
        self.bones -= amount;
        Ok(())
    }

    pub fn earn_bones(&mut self, amount: u64) {
        self.bones = self.bones.saturating_add(amount);
    }
}

/// Complete persisted game state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    #[serde(flatten)]
    pub wallet: Wallet,
    pub board: Board,
    pub discovered: DiscoverySet,
    /// Booster name -> count (absent means zero)
    pub inventory: BTreeMap<String, u32>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl GameState {
    /// Fresh state for a first run
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wallet: Wallet::new(tuning.starting_bones, tuning.starting_gems),
            board: Board::new(tuning.board_len()),
            discovered: DiscoverySet::new(),
            inventory: BTreeMap::new(),
            user_id: None,
        }
    }

    pub fn inventory_count(&self, name: &str) -> u32 {
        self.inventory.get(name).copied().unwrap_or(0)
    }

    pub fn add_to_inventory(&mut self, name: &str, count: u32) -> u32 {
        let entry = self.inventory.entry(name.to_string()).or_insert(0);
        *entry = entry.saturating_add(count);
        *entry
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}
