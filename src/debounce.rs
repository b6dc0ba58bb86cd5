use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due_at: Instant,
}

/// Holds back a changing value until it has stayed unchanged for `delay`.
///
/// Time is passed in explicitly, so the owner decides when to poll (usually
/// from a scheduler wake-up). Every `push` replaces the pending value and
/// restarts the wait.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    /// Last value that survived a full quiet interval.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due_at: now + self.delay,
        });
    }

    /// Promotes the pending value once its interval has elapsed. Returns the
    /// newly settled value, or `None` when nothing settled at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        match self.pending.take() {
            Some(pending) if pending.due_at <= now => {
                self.settled = pending.value;
                Some(&self.settled)
            }
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drops the pending value without settling it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Forces `value` as settled and discards anything pending.
    pub fn reset(&mut self, value: T) {
        self.pending = None;
        self.settled = value;
    }
}
