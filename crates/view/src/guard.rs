use foundation::time::Time;
use runtime::deadline::Deadline;

/// Window during which renderer move events are treated as echoes of our
/// own camera write. Long enough to absorb the renderer's asynchronous
/// move-completion events, short enough not to swallow genuine input.
pub const GUARD_WINDOW_S: f64 = 0.2;

/// Distinguishes externally-imposed camera moves from user-originated ones.
///
/// Armed immediately before every programmatic camera write. Any move event
/// the renderer raises while the guard is active is an echo of that write
/// and must be discarded by the upward-reporting path; a position change
/// must never trigger its own re-emission.
#[derive(Debug, Default, Clone)]
pub struct FeedbackGuard {
    window: Deadline,
}

impl FeedbackGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the next `GUARD_WINDOW_S` seconds of renderer moves as
    /// self-inflicted.
    pub fn arm(&mut self, now: Time) {
        self.window.arm(now, GUARD_WINDOW_S);
    }

    pub fn is_active(&self, now: Time) -> bool {
        self.window.is_pending(now)
    }

    pub fn cancel(&mut self) {
        self.window.cancel();
    }
}
