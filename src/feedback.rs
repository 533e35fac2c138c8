//! Outcome signals for the feedback channel (sounds, toasts, alerts)
//!
//! The engine reports what happened; the sink decides how to show it.
//! Nothing a sink does can change game state.

use std::cell::RefCell;
use std::rc::Rc;

use crate::game::GameError;

/// Named outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// An egg hatched into `index`
    EggHatched { index: usize, breed: String },
    /// A (breed, level) pair was produced for the first time
    NewDiscovery { breed: String, level: u8 },
    /// Two pieces merged into `index`
    MergeSucceeded { index: usize, level: u8, reward: u64 },
    /// A piece was deleted from `index`
    PieceRemoved { index: usize },
    /// An operation was refused
    Rejected(GameError),
}

impl Feedback {
    /// Stable name for the JS side
    pub fn name(&self) -> &'static str {
        match self {
            Feedback::EggHatched { .. } => "egg_hatched",
            Feedback::NewDiscovery { .. } => "new_discovery",
            Feedback::MergeSucceeded { .. } => "merge_succeeded",
            Feedback::PieceRemoved { .. } => "piece_removed",
            Feedback::Rejected(e) => e.as_str(),
        }
    }
}

pub trait FeedbackSink {
    fn signal(&mut self, feedback: Feedback);
}

/// Shared sink, so the host can keep a handle while the engine owns a clone
impl<T: FeedbackSink> FeedbackSink for Rc<RefCell<T>> {
    fn signal(&mut self, feedback: Feedback) {
        self.borrow_mut().signal(feedback);
    }
}

/// Default sink: log only
#[derive(Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn signal(&mut self, feedback: Feedback) {
        match &feedback {
            Feedback::Rejected(e) => log::info!("Refused: {}", e),
            other => log::debug!("Feedback: {}", other.name()),
        }
    }
}

/// Keeps every signal, for hosts that poll (and for tests)
#[derive(Debug, Default)]
pub struct QueuedFeedback {
    pending: Vec<Feedback>,
}

impl QueuedFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all signals received since the last drain
    pub fn drain(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.pending)
    }
}

impl FeedbackSink for QueuedFeedback {
    fn signal(&mut self, feedback: Feedback) {
        self.pending.push(feedback);
    }
}
