use foundation::time::Time;

/// One-shot logical timer.
///
/// Key properties:
/// - Armed with an absolute expiry computed from `now + delay`.
/// - `fire` reports expiry at most once, then disarms.
/// - Cancellation is synchronous; a cancelled deadline never fires.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Deadline {
    expires_at: Option<Time>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the deadline `delay_s` seconds from `now`.
    pub fn arm(&mut self, now: Time, delay_s: f64) {
        self.expires_at = Some(now.offset(delay_s));
    }

    pub fn is_armed(&self) -> bool {
        self.expires_at.is_some()
    }

    /// True while armed and the expiry has not been reached.
    pub fn is_pending(&self, now: Time) -> bool {
        matches!(self.expires_at, Some(t) if now.0 < t.0)
    }

    /// Consume the deadline if it has expired.
    pub fn fire(&mut self, now: Time) -> bool {
        match self.expires_at {
            Some(t) if now.0 >= t.0 => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.expires_at = None;
    }
}
