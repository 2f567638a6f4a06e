use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Restartable delayed task: each `schedule` call cancels the previous
/// pending run and arms a new timer, so a burst of calls produces exactly
/// one run of the last action, one delay after the last call.
///
/// Once the delay elapses the action is detached onto its own task; a
/// restart or teardown never cancels a write that is already in flight.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let sleep = tokio::time::sleep(delay);
        self.pending = Some(tokio::spawn(async move {
            sleep.await;
            tokio::spawn(action);
        }));
    }

    /// Cancels the pending run, if any. In-flight actions are unaffected.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn bump(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_schedules_runs_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        for _ in 0..10 {
            debouncer.schedule(Duration::from_millis(1500), bump(&runs));
            tokio::time::advance(Duration::from_millis(10)).await;
        }
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_pending_run() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        debouncer.schedule(Duration::from_millis(1500), bump(&runs));
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_resets_the_timer() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new();

        debouncer.schedule(Duration::from_millis(1500), bump(&runs));
        tokio::time::advance(Duration::from_millis(1400)).await;
        debouncer.schedule(Duration::from_millis(1500), bump(&runs));

        // 1400 + 200 is past the first deadline but not the second.
        tokio::time::advance(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
