//! Rule violations
//!
//! Every variant is recoverable: the operation is refused and state is left as it was.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("not enough bones: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("no free slot on the board")]
    NoFreeSlot,
    #[error("slot {index} is empty")]
    SlotEmpty { index: usize },
    #[error("cannot merge a slot with itself")]
    SameSlot,
    #[error("cannot merge different breeds")]
    BreedMismatch,
    #[error("levels must match to merge")]
    LevelMismatch,
    #[error("piece is already at max level")]
    MaxLevelReached,
    #[error("unknown breed: {0}")]
    UnknownBreed(String),
}

impl GameError {
    /// Stable name for the feedback channel / JS side
    pub fn as_str(&self) -> &'static str {
        match self {
            GameError::InsufficientFunds { .. } => "insufficient_funds",
            GameError::NoFreeSlot => "no_free_slot",
            GameError::SlotEmpty { .. } => "slot_empty",
            GameError::SameSlot => "same_slot",
            GameError::BreedMismatch => "breed_mismatch",
            GameError::LevelMismatch => "level_mismatch",
            GameError::MaxLevelReached => "max_level_reached",
            GameError::UnknownBreed(_) => "unknown_breed",
        }
    }
}
