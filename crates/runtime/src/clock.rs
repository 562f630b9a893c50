use foundation::time::Time;

/// Logical timebase for the view runtime.
///
/// The core never reads a wall clock. The embedder advances this clock from
/// its own event loop, so every timer in the system is deterministic and
/// replayable.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Clock {
    now_s: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Time {
        Time(self.now_s)
    }

    /// Advance by `dt_s` seconds. Non-positive and non-finite deltas are
    /// ignored; time never runs backwards.
    pub fn advance(&mut self, dt_s: f64) -> Time {
        if dt_s.is_finite() && dt_s > 0.0 {
            self.now_s += dt_s;
        }
        self.now()
    }
}
