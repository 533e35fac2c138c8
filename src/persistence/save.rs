//! Save blob format
//!
//! A JSON object with `bones`, `gems`, `board`, `discovered`, `inventory`
//! and `userId`. Loading is lenient: each field is parsed on its own and
//! falls back to its default when missing or malformed, so a damaged save
//! only loses the damaged part.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::game::{Board, Catalog, DiscoverySet, GameState, Piece};
use crate::tuning::Tuning;

/// Outcome of reading a save
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub state: GameState,
    /// No save existed; everything is default
    pub fresh: bool,
    /// Fields that were present but unusable, or required and absent
    pub defaulted: Vec<&'static str>,
    /// Board slots dropped because they named an unknown breed or bad level
    pub dropped_slots: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty() && self.dropped_slots == 0
    }
}

/// Serialize the full persisted state (selection is never part of it)
pub fn serialize_state(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Rebuild state from a stored blob. Never fails.
pub fn load_state(raw: Option<&str>, tuning: &Tuning, catalog: &Catalog) -> LoadReport {
    let mut report = LoadReport {
        state: GameState::new(tuning),
        fresh: raw.is_none(),
        defaulted: Vec::new(),
        dropped_slots: 0,
    };
    let Some(raw) = raw else {
        return report;
    };

    let obj = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(obj)) => obj,
        Ok(_) => {
            log::warn!("Save is not a JSON object, using defaults");
            report.defaulted = ALL_FIELDS.to_vec();
            return report;
        }
        Err(e) => {
            log::warn!("Save is unreadable ({}), using defaults", e);
            report.defaulted = ALL_FIELDS.to_vec();
            return report;
        }
    };

    let state = &mut report.state;
    let defaulted = &mut report.defaulted;

    if let Some(bones) = field::<u64>(&obj, "bones", defaulted) {
        state.wallet.bones = bones;
    }
    if let Some(gems) = field::<u64>(&obj, "gems", defaulted) {
        state.wallet.gems = gems;
    }
    if let Some(discovered) = field::<DiscoverySet>(&obj, "discovered", defaulted) {
        state.discovered = discovered;
    }
    // Older saves predate these two, so leaving them out is not damage
    if let Some(inventory) = optional_field::<BTreeMap<String, u32>>(&obj, "inventory", defaulted) {
        state.inventory = inventory;
    }
    state.user_id = optional_field::<String>(&obj, "userId", defaulted);

    match load_board(&obj, tuning, catalog) {
        Some((board, dropped)) => {
            state.board = board;
            report.dropped_slots = dropped;
        }
        None => defaulted.push("board"),
    }

    if !report.defaulted.is_empty() {
        log::warn!("Save fields reset to defaults: {:?}", report.defaulted);
    }
    report
}

const ALL_FIELDS: [&str; 6] = ["bones", "gems", "board", "discovered", "inventory", "userId"];

/// Parse one field, recording its name when it has to fall back
fn field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &'static str,
    defaulted: &mut Vec<&'static str>,
) -> Option<T> {
    let parsed = obj
        .get(name)
        .and_then(|v| serde_json::from_value::<T>(v.clone()).ok());
    if parsed.is_none() {
        defaulted.push(name);
    }
    parsed
}

/// Like `field`, but a missing (or null) value is not recorded
fn optional_field<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    name: &'static str,
    defaulted: &mut Vec<&'static str>,
) -> Option<T> {
    match obj.get(name) {
        None | Some(Value::Null) => None,
        Some(_) => field(obj, name, defaulted),
    }
}

/// Board from `board` (or the older `grid` key). The whole board is rejected
/// if it is not an array of the expected length; single bad slots are emptied.
fn load_board(
    obj: &Map<String, Value>,
    tuning: &Tuning,
    catalog: &Catalog,
) -> Option<(Board, usize)> {
    let raw = obj.get("board").or_else(|| obj.get("grid"))?.as_array()?;
    if raw.len() != tuning.board_len() {
        log::warn!(
            "Saved board has {} slots, expected {}",
            raw.len(),
            tuning.board_len()
        );
        return None;
    }

    let mut dropped = 0;
    let slots: Vec<Option<Piece>> = raw
        .iter()
        .map(|slot| {
            if slot.is_null() {
                return None;
            }
            let piece = serde_json::from_value::<Piece>(slot.clone())
                .ok()
                .filter(|p| catalog.contains(p.breed()))
                .filter(|p| (1..=tuning.max_level).contains(&p.level()));
            if piece.is_none() {
                dropped += 1;
            }
            piece
        })
        .collect();
    Some((Board::from_slots(slots), dropped))
}
