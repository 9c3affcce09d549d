//! Delayed mirror of a rapidly changing value.

use std::time::Duration;

use tokio::time::Instant;

/// Collapses rapid writes into one delayed emission.
///
/// Every [`write`](Debounced::write) restarts the timer; the pending value
/// replaces any earlier one, it is never queued alongside it. The settled
/// value only changes once the delay elapses with no further writes.
#[derive(Debug)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<T>,
    deadline: Option<Instant>,
    delay: Duration,
}

impl<T: PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            deadline: None,
            delay,
        }
    }

    /// Last value that survived a full stability window.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new input value and restarts the stability timer. Writing
    /// the already-settled value cancels any pending emission instead.
    pub fn write(&mut self, value: T) {
        if value == self.settled {
            self.pending = None;
            self.deadline = None;
            return;
        }
        self.pending = Some(value);
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Commits the pending value if its stability window has elapsed by
    /// `now`. Returns the newly settled value.
    pub fn poll_settle(&mut self, now: Instant) -> Option<&T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if let Some(value) = self.pending.take() {
                    self.settled = value;
                }
                Some(&self.settled)
            }
            _ => None,
        }
    }

    /// Waits out the stability window of the pending value and commits it.
    /// Returns `None` immediately when nothing is pending.
    pub async fn settle(&mut self) -> Option<&T> {
        let deadline = self.deadline?;
        tokio::time::sleep_until(deadline).await;
        // The deadline cannot have moved: `write` needs `&mut self`.
        self.poll_settle(deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(800);

    #[tokio::test(start_paused = true)]
    async fn rapid_writes_emit_only_the_last_value() {
        let mut search = Debounced::new(String::new(), DELAY);

        search.write("a".to_string());
        tokio::time::advance(Duration::from_millis(100)).await;
        search.write("ab".to_string());
        tokio::time::advance(Duration::from_millis(100)).await;
        search.write("abc".to_string());

        assert_eq!(search.settled(), "");
        assert_eq!(search.settle().await, Some(&"abc".to_string()));
        assert_eq!(search.settled(), "abc");
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_writes_emit_every_value() {
        let mut search = Debounced::new(String::new(), DELAY);

        search.write("a".to_string());
        assert_eq!(search.settle().await, Some(&"a".to_string()));

        search.write("b".to_string());
        assert_eq!(search.settle().await, Some(&"b".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn settle_without_pending_returns_immediately() {
        let mut search = Debounced::new("x".to_string(), DELAY);
        assert_eq!(search.settle().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn writing_back_the_settled_value_cancels_the_pending_emission() {
        let mut search = Debounced::new(String::new(), DELAY);

        search.write("a".to_string());
        search.write(String::new());

        assert!(!search.is_pending());
        assert_eq!(search.settle().await, None);
        assert_eq!(search.settled(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn poll_settle_before_deadline_is_a_no_op() {
        let mut search = Debounced::new(String::new(), DELAY);
        search.write("a".to_string());

        assert_eq!(search.poll_settle(Instant::now()), None);
        assert!(search.is_pending());
    }
}
