//! Fixed-length board of slots

use serde::{Deserialize, Serialize};

use super::state::Piece;

/// Ordered slots, each empty or holding a piece. Length never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    slots: Vec<Option<Piece>>,
}

impl Board {
    /// Create an empty board with `len` slots
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub(crate) fn from_slots(slots: Vec<Option<Piece>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Piece at `index` (None if empty or out of range)
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn slots(&self) -> &[Option<Piece>] {
        &self.slots
    }

    /// Lowest empty index. The single slot-allocation rule for spawn and merge.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    pub fn has_empty(&self) -> bool {
        self.first_empty().is_some()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Write a piece into `index`, returning what was there
    pub(crate) fn put(&mut self, index: usize, piece: Piece) -> Option<Piece> {
        self.slots.get_mut(index).and_then(|s| s.replace(piece))
    }

    /// Empty `index`, returning what was there
    pub(crate) fn take(&mut self, index: usize) -> Option<Piece> {
        self.slots.get_mut(index).and_then(|s| s.take())
    }
}
