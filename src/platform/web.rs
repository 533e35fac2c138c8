//! JS-facing game handle
//!
//! The page calls these methods on input events and redraws from the JSON
//! snapshot each one returns.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::storage::LocalStore;
use super::{now_ms, telegram};
use crate::engine::{EngineOptions, GameEngine, SelectOutcome};
use crate::feedback::QueuedFeedback;

type SharedEngine = Rc<RefCell<GameEngine<LocalStore>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Doggo Merge starting...");
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    engine: SharedEngine,
    feedback: Rc<RefCell<QueuedFeedback>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Load the save, pick up the Telegram identity and start the autosave timer
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsValue> {
        telegram::expand();
        let options = EngineOptions {
            host: telegram::host_identity(),
            seed: now_ms() as u64,
            ..Default::default()
        };
        let mut engine = GameEngine::open(LocalStore, options).map_err(to_js)?;

        let feedback = Rc::new(RefCell::new(QueuedFeedback::new()));
        engine.set_feedback(Box::new(feedback.clone()));

        let engine = Rc::new(RefCell::new(engine));
        start_autosave(engine.clone())?;
        log::info!("Game ready");
        Ok(WebGame { engine, feedback })
    }

    /// Buy an egg with a random breed
    pub fn spawn(&mut self) -> Result<String, JsValue> {
        if let Err(e) = self.engine.borrow_mut().spawn_piece(None) {
            log::info!("Egg not hatched: {}", e);
        }
        self.snapshot()
    }

    /// Buy an egg of a specific breed
    pub fn spawn_breed(&mut self, breed: &str) -> Result<String, JsValue> {
        if let Err(e) = self.engine.borrow_mut().spawn_piece(Some(breed)) {
            log::info!("Egg not hatched: {}", e);
        }
        self.snapshot()
    }

    /// Tap on a slot
    pub fn select(&mut self, index: usize) -> Result<String, JsValue> {
        let outcome = self.engine.borrow_mut().select_slot(index);
        if let SelectOutcome::Merge(Ok(merged)) = outcome {
            log::debug!("Merged into slot {}", merged.result_index);
        }
        self.snapshot()
    }

    /// Pay to delete a piece. Refusals show up in the snapshot's `last_outcome`.
    pub fn remove(&mut self, index: usize) -> Result<String, JsValue> {
        if let Err(e) = self.engine.borrow_mut().remove_piece(index) {
            log::info!("Piece not removed: {}", e);
        }
        self.snapshot()
    }

    pub fn clear_selection(&mut self) -> Result<String, JsValue> {
        self.engine.borrow_mut().clear_selection();
        self.snapshot()
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        self.engine.borrow_mut().reset();
        self.snapshot()
    }

    /// Force a save now
    pub fn save(&mut self) -> Result<(), JsValue> {
        self.engine.borrow_mut().save().map_err(to_js)
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.borrow().snapshot()).map_err(to_js)
    }

    pub fn collection(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.borrow().collection()).map_err(to_js)
    }

    /// Names of outcomes since the last call (for sounds and toasts)
    pub fn drain_feedback(&mut self) -> Vec<String> {
        self.feedback
            .borrow_mut()
            .drain()
            .iter()
            .map(|f| f.name().to_string())
            .collect()
    }

    /// Referral parameter the app was opened with
    pub fn start_param(&self) -> Option<String> {
        self.engine.borrow().host().start_param.clone()
    }
}

/// Check the autosave timer on an interval; the timer decides when to write
fn start_autosave(engine: SharedEngine) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let interval = engine.borrow().tuning().autosave_interval_ms;
    if interval <= 0.0 {
        return Ok(());
    }
    engine.borrow_mut().tick_autosave(now_ms());

    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Ok(mut engine) = engine.try_borrow_mut() {
            if engine.tick_autosave(now_ms()) {
                log::debug!("Autosaved");
            }
        }
    });
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        interval as i32,
    )?;
    closure.forget();
    Ok(())
}
