use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default quiet period for rapid repeated input.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Discards superseded pending work: each call to [`Debouncer::settle`]
/// supersedes the previous one, and only the most recent call resolves to
/// `true` after the quiet period. Recomputation being idempotent, this is a
/// liveness concern only.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register one input event. The input is claimed immediately; the
    /// returned future waits out the quiet period and reports whether this
    /// input is still the latest one.
    pub fn settle(&self) -> impl Future<Output = bool> {
        let claimed = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            generation.load(Ordering::SeqCst) == claimed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn lone_input_settles() {
        let debouncer = Debouncer::default();
        assert!(debouncer.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_input_is_discarded() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let first = debouncer.settle();
        let second = debouncer.settle();
        let third = debouncer.settle();
        assert!(!first.await);
        assert!(!second.await);
        assert!(third.await);
    }

    #[tokio::test(start_paused = true)]
    async fn later_input_settles_after_earlier_one_resolved() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        assert!(debouncer.settle().await);
        assert!(debouncer.settle().await);
    }
}
