use foundation::geo::Position;
use foundation::time::Time;
use runtime::deadline::Deadline;

/// Quiet period with no further proposals before an emission fires.
pub const QUIET_WINDOW_S: f64 = 0.5;

/// Coalesces bursts of camera-move proposals into a single emission.
///
/// Key properties:
/// - At most one emission per quiet period, regardless of burst size.
/// - The emitted value is the most recent proposal.
/// - `cancel` drops the pending value outright; nothing fires afterwards.
#[derive(Debug, Default, Clone)]
pub struct DebouncedEmitter {
    pending: Option<Position>,
    quiet: Deadline,
}

impl DebouncedEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a proposal and restart the quiet period.
    pub fn schedule(&mut self, now: Time, position: Position) {
        self.pending = Some(position);
        self.quiet.arm(now, QUIET_WINDOW_S);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Emit the settled value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Time) -> Option<Position> {
        if self.quiet.fire(now) {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.quiet.cancel();
    }
}
