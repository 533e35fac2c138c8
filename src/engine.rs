//! Game engine
//!
//! Owns the game state plus everything around it that the pure rules don't:
//! the armed selection, the breed RNG, storage and feedback. Every successful
//! mutation is written back to storage right away.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::collection::{self, CollectionEntry, CollectionProgress};
use crate::feedback::{Feedback, FeedbackSink, LogFeedback};
use crate::game::{self, Catalog, GameError, GameState, Merged, Removed, Spawned};
use crate::identity::{HostIdentity, resolve_user_id};
use crate::persistence::{AutosaveTimer, KeyValueStore, StorageError, load_state, serialize_state};
use crate::tuning::{Tuning, TuningError};

/// Startup configuration, read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub tuning: Tuning,
    pub catalog: Catalog,
    pub host: HostIdentity,
    /// Seed for breed rolls and guest ids
    pub seed: u64,
}

/// What a slot tap did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Tapped an empty slot; selection cleared
    Cleared,
    /// Slot is now armed
    Armed(usize),
    /// Tapped the armed slot again
    Deselected,
    /// Tapped a second piece; a merge was attempted
    Merge(Result<Merged, GameError>),
}

/// Result of the most recent player action, for UI layers that only see
/// snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Spawned { index: usize, breed: String, bonus: u64 },
    Merged { index: usize, level: u8, reward: u64 },
    Removed { index: usize, cost: u64 },
    Rejected { reason: &'static str, message: String },
}

impl From<&GameError> for Outcome {
    fn from(e: &GameError) -> Self {
        Outcome::Rejected {
            reason: e.as_str(),
            message: e.to_string(),
        }
    }
}

/// Everything the presentation layer needs to redraw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub state: GameState,
    pub selected: Option<usize>,
    pub last_outcome: Option<Outcome>,
    pub collection: CollectionProgress,
    pub egg_price: u64,
    pub removal_price: u64,
}

pub struct GameEngine<S: KeyValueStore> {
    state: GameState,
    selected: Option<usize>,
    last_outcome: Option<Outcome>,
    tuning: Tuning,
    catalog: Catalog,
    host: HostIdentity,
    rng: Pcg32,
    store: S,
    feedback: Box<dyn FeedbackSink>,
    autosave: AutosaveTimer,
}

impl<S: KeyValueStore> GameEngine<S> {
    /// Restore from `store` (or start fresh). Storage problems never stop this.
    pub fn open(store: S, options: EngineOptions) -> Result<Self, TuningError> {
        let EngineOptions {
            tuning,
            catalog,
            host,
            seed,
        } = options;
        tuning.validate()?;
        if catalog.is_empty() {
            return Err(TuningError::EmptyCatalog);
        }

        let raw = match store.get(&tuning.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Could not read save ({}), starting fresh", e);
                None
            }
        };
        let report = load_state(raw.as_deref(), &tuning, &catalog);
        if report.fresh {
            log::info!("No save found, starting a new game");
        } else {
            log::info!(
                "Loaded save: {} bones, {} pieces, {} discoveries",
                report.state.wallet.bones,
                report.state.board.occupied_count(),
                report.state.discovered.len()
            );
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = report.state;
        let (user_id, id_changed) = resolve_user_id(&host, state.user_id.as_deref(), &mut rng);
        state.user_id = Some(user_id);

        let mut engine = Self {
            state,
            selected: None,
            last_outcome: None,
            autosave: AutosaveTimer::new(tuning.autosave_interval_ms),
            tuning,
            catalog,
            host,
            rng,
            store,
            feedback: Box::new(LogFeedback),
        };

        // Write back anything load had to invent or repair
        if id_changed || !report.defaulted.is_empty() || report.dropped_slots > 0 {
            engine.persist();
        }
        Ok(engine)
    }

    pub fn set_feedback(&mut self, sink: Box<dyn FeedbackSink>) {
        self.feedback = sink;
    }

    /// Buy an egg. `breed` is rolled from the catalog when not given.
    pub fn spawn_piece(&mut self, breed: Option<&str>) -> Result<Spawned, GameError> {
        let breed = match breed {
            Some(id) => id.to_string(),
            None => self
                .catalog
                .random(&mut self.rng)
                .map(|b| b.id.clone())
                .ok_or_else(|| GameError::UnknownBreed(String::new()))?,
        };

        match game::spawn(&mut self.state, &self.tuning, &self.catalog, &breed) {
            Ok(spawned) => {
                log::debug!("Hatched {} into slot {}", breed, spawned.index);
                self.selected = None;
                self.last_outcome = Some(Outcome::Spawned {
                    index: spawned.index,
                    breed: breed.clone(),
                    bonus: spawned.bonus,
                });
                self.feedback.signal(Feedback::EggHatched {
                    index: spawned.index,
                    breed: breed.clone(),
                });
                if spawned.new_discovery {
                    self.feedback.signal(Feedback::NewDiscovery { breed, level: 1 });
                }
                self.persist();
                Ok(spawned)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Handle a tap on `index`: arm, disarm, or merge with the armed slot
    pub fn select_slot(&mut self, index: usize) -> SelectOutcome {
        if !self.state.board.is_occupied(index) {
            self.selected = None;
            self.last_outcome = None;
            return SelectOutcome::Cleared;
        }
        match self.selected {
            None => {
                self.selected = Some(index);
                self.last_outcome = None;
                SelectOutcome::Armed(index)
            }
            Some(armed) if armed == index => {
                self.selected = None;
                self.last_outcome = None;
                SelectOutcome::Deselected
            }
            Some(armed) => {
                let result = self.attempt_merge(armed, index);
                self.selected = None;
                SelectOutcome::Merge(result)
            }
        }
    }

    /// Merge the pieces in `a` and `b`. State is untouched on failure.
    pub fn attempt_merge(&mut self, a: usize, b: usize) -> Result<Merged, GameError> {
        match game::merge(&mut self.state, &self.tuning, a, b) {
            Ok(merged) => {
                log::debug!(
                    "Merged {} + {} into slot {} (level {})",
                    a,
                    b,
                    merged.result_index,
                    merged.new_level()
                );
                self.selected = None;
                self.last_outcome = Some(Outcome::Merged {
                    index: merged.result_index,
                    level: merged.new_level(),
                    reward: merged.reward,
                });
                self.feedback.signal(Feedback::MergeSucceeded {
                    index: merged.result_index,
                    level: merged.new_level(),
                    reward: merged.reward,
                });
                if merged.new_discovery {
                    self.feedback.signal(Feedback::NewDiscovery {
                        breed: merged.piece.breed().to_string(),
                        level: merged.new_level(),
                    });
                }
                self.persist();
                Ok(merged)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Pay to delete the piece at `index`
    pub fn remove_piece(&mut self, index: usize) -> Result<Removed, GameError> {
        match game::remove(&mut self.state, &self.tuning, index) {
            Ok(removed) => {
                log::debug!("Removed piece from slot {}", index);
                if self.selected == Some(index) {
                    self.selected = None;
                }
                self.last_outcome = Some(Outcome::Removed {
                    index,
                    cost: removed.cost,
                });
                self.feedback.signal(Feedback::PieceRemoved { index });
                self.persist();
                Ok(removed)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Grant boosters; returns the new count
    pub fn add_to_inventory(&mut self, name: &str, count: u32) -> u32 {
        let total = self.state.add_to_inventory(name, count);
        self.persist();
        total
    }

    /// Start over, keeping the player's id
    pub fn reset(&mut self) {
        let user_id = self.state.user_id.take();
        self.state = GameState::new(&self.tuning);
        self.state.user_id = user_id;
        self.selected = None;
        self.last_outcome = None;
        log::info!("Progress reset");
        self.persist();
    }

    /// Write the current state to storage
    pub fn save(&mut self) -> Result<(), StorageError> {
        let blob = serialize_state(&self.state).map_err(|e| StorageError::Write(e.to_string()))?;
        self.store.set(&self.tuning.storage_key, &blob)
    }

    /// Periodic safety-net save. Returns true if a save was attempted.
    pub fn tick_autosave(&mut self, now_ms: f64) -> bool {
        if !self.autosave.due(now_ms) {
            return false;
        }
        self.persist();
        true
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn host(&self) -> &HostIdentity {
        &self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection(&self) -> Vec<CollectionEntry> {
        collection::collection(&self.catalog, &self.state.discovered, self.tuning.max_level)
    }

    pub fn progress(&self) -> CollectionProgress {
        collection::progress(&self.catalog, &self.state.discovered, self.tuning.max_level)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            selected: self.selected,
            last_outcome: self.last_outcome.clone(),
            collection: self.progress(),
            egg_price: self.tuning.egg_price,
            removal_price: self.tuning.removal_price,
        }
    }

    /// Fire-and-forget save
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("Save failed: {}", e);
        }
    }

    fn reject(&mut self, e: GameError) -> GameError {
        log::debug!("Rejected: {}", e);
        self.last_outcome = Some(Outcome::from(&e));
        self.feedback.signal(Feedback::Rejected(e.clone()));
        e
    }
}
