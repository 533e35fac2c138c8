//! Periodic background save
//!
//! The host calls `due` with its clock (ms); a save is due once per interval.

#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl AutosaveTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// True when a save should happen now. The first call only starts the clock.
    pub fn due(&mut self, now_ms: f64) -> bool {
        if self.interval_ms <= 0.0 {
            return false;
        }
        match self.last_ms {
            None => {
                self.last_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms - last >= self.interval_ms => {
                self.last_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }

    /// Restart the interval (after an explicit save)
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
