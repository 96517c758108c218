use std::time::Duration;
use std::time::Instant;

/// Quiet period before a viewport resize triggers a relayout
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);
/// Quiet period before changed settings are persisted
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(300);

/// A cancellable trailing-edge timer driven by an injected clock.
///
/// Every [`Debouncer::schedule`] pushes the deadline back to `now + delay`;
/// [`Debouncer::fire`] reports `true` once, the first time it is polled at or
/// after the deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(RESIZE_DEBOUNCE);
        assert!(!debouncer.fire(start));

        debouncer.schedule(start);
        assert!(debouncer.is_pending());
        assert!(!debouncer.fire(start + Duration::from_millis(149)));
        assert!(debouncer.fire(start + Duration::from_millis(150)));
        assert!(!debouncer.fire(start + Duration::from_millis(500)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_rescheduling_restarts_the_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SAVE_DEBOUNCE);

        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(200));
        assert!(!debouncer.fire(start + Duration::from_millis(300)));
        assert!(debouncer.fire(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_cancel_discards_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(RESIZE_DEBOUNCE);

        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire(start + Duration::from_secs(1)));
    }
}
