//! Data-driven game balance
//!
//! Every number the rules depend on lives here. Defaults match `consts`;
//! a host may ship its own JSON, with missing fields falling back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Largest board a tuning file may ask for
pub const MAX_BOARD_SLOTS: usize = 1024;

/// Invalid balance data
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("board must have at least one slot (got {rows}x{cols})")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("board of {rows}x{cols} exceeds {MAX_BOARD_SLOTS} slots")]
    BoardTooLarge { rows: usize, cols: usize },
    #[error("max level must be at least 1")]
    ZeroMaxLevel,
    #[error("breed catalog is empty")]
    EmptyCatalog,
    #[error("tuning json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game balance and persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub rows: usize,
    pub cols: usize,
    pub max_level: u8,

    // === Economy ===
    pub egg_price: u64,
    pub reward_per_level: u64,
    pub discovery_bonus: u64,
    pub removal_price: u64,
    pub starting_bones: u64,
    pub starting_gems: u64,

    // === Persistence ===
    pub autosave_interval_ms: f64,
    pub storage_key: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            max_level: MAX_LEVEL,

            egg_price: EGG_PRICE,
            reward_per_level: REWARD_PER_LEVEL,
            discovery_bonus: DISCOVERY_BONUS,
            removal_price: REMOVAL_PRICE,
            starting_bones: STARTING_BONES,
            starting_gems: STARTING_GEMS,

            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, defaulting any missing field
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Number of board slots (saturates; `validate` rejects oversized boards)
    pub fn board_len(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Bones granted for producing a piece of `level` by merging
    pub fn merge_reward(&self, level: u8) -> u64 {
        self.reward_per_level.saturating_mul(u64::from(level))
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let (rows, cols) = (self.rows, self.cols);
        match rows.checked_mul(cols) {
            Some(0) => return Err(TuningError::EmptyBoard { rows, cols }),
            Some(len) if len <= MAX_BOARD_SLOTS => {}
            _ => return Err(TuningError::BoardTooLarge { rows, cols }),
        }
        if self.max_level == 0 {
            return Err(TuningError::ZeroMaxLevel);
        }
        Ok(())
    }
}
