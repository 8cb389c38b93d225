//! Coalescing (debounced) dispatch of the latest value.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Receiver of coalesced values.
#[async_trait]
pub trait Dispatch<T: Send + 'static>: Send + Sync {
    async fn dispatch(&self, value: T);
}

/// Debounces writes: every [`schedule`](Self::schedule) replaces the pending
/// value and restarts the timer, and only the value still pending when the
/// timer elapses is dispatched.
///
/// There is at most one pending timer. Dispatches are serialized, so a firing
/// never overlaps a previous dispatch that is still in flight; it waits for it
/// instead.
///
/// Scheduling spawns onto the current Tokio runtime.
pub struct CoalescingScheduler<T: Send + 'static> {
    delay: Duration,
    shared: Arc<Shared<T>>,
}

struct Shared<T: Send + 'static> {
    sink: Arc<dyn Dispatch<T>>,
    slot: Mutex<Slot<T>>,
    in_flight: tokio::sync::Mutex<()>,
}

struct Slot<T> {
    value: Option<T>,
    ticket: u64,
    timer: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> CoalescingScheduler<T> {
    pub fn new(delay: Duration, sink: Arc<dyn Dispatch<T>>) -> Self {
        Self {
            delay,
            shared: Arc::new(Shared {
                sink,
                slot: Mutex::new(Slot {
                    value: None,
                    ticket: 0,
                    timer: None,
                }),
                in_flight: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces the pending value and restarts the quiet-period timer.
    pub fn schedule(&self, value: T) {
        let shared = Arc::clone(&self.shared);
        let delay = self.delay;

        let mut slot = self.shared.lock_slot();
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.value = Some(value);
        slot.ticket = slot.ticket.wrapping_add(1);
        let ticket = slot.ticket;
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.fire(Some(ticket)).await;
        }));
        tracing::debug!("Commit #{} scheduled in {:?}", ticket, delay);
    }

    /// Drops the pending value without dispatching it. A dispatch already in
    /// flight is left to finish.
    pub fn cancel(&self) {
        let mut slot = self.shared.lock_slot();
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        if slot.value.take().is_some() {
            tracing::debug!("Pending commit #{} cancelled", slot.ticket);
        }
    }

    /// Dispatches the pending value now, if any, and waits until no dispatch
    /// is in flight.
    pub async fn flush(&self) {
        self.shared.fire(None).await;
    }

    pub fn is_pending(&self) -> bool {
        self.shared.lock_slot().value.is_some()
    }
}

impl<T: Send + 'static> Shared<T> {
    fn lock_slot(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Takes the pending value and dispatches it. A timer firing passes its
    /// ticket and backs off if it has been superseded.
    async fn fire(&self, ticket: Option<u64>) {
        let value = {
            let mut slot = self.lock_slot();
            match ticket {
                Some(t) if slot.ticket != t => return,
                Some(_) => slot.timer = None,
                None => {
                    if let Some(timer) = slot.timer.take() {
                        timer.abort();
                    }
                }
            }
            slot.value.take()
        };

        let _guard = self.in_flight.lock().await;
        if let Some(value) = value {
            self.sink.dispatch(value).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        values: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl Dispatch<u32> for Recorder {
        async fn dispatch(&self, value: u32) {
            self.values.lock().unwrap().push(value);
        }
    }

    #[derive(Default)]
    struct SlowRecorder {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Dispatch<u32> for SlowRecorder {
        async fn dispatch(&self, value: u32) {
            self.events.lock().unwrap().push(format!("start {}", value));
            tokio::time::sleep(Duration::from_secs(5)).await;
            self.events.lock().unwrap().push(format!("end {}", value));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_dispatches_last_value_once() {
        let recorder = Arc::new(Recorder::default());
        let scheduler = CoalescingScheduler::new(Duration::from_secs(2), recorder.clone());

        for value in 1..=5 {
            scheduler.schedule(value);
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        assert!(recorder.values.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(*recorder.values.lock().unwrap(), vec![5]);
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_quiet_windows_dispatch_separately() {
        let recorder = Arc::new(Recorder::default());
        let scheduler = CoalescingScheduler::new(Duration::from_secs(2), recorder.clone());

        scheduler.schedule(1);
        tokio::time::sleep(Duration::from_secs(3)).await;
        scheduler.schedule(2);
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(*recorder.values.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatches_do_not_overlap() {
        let recorder = Arc::new(SlowRecorder::default());
        let scheduler = CoalescingScheduler::new(Duration::from_secs(2), recorder.clone());

        scheduler.schedule(1);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        // First dispatch is in flight until t=7s; this one fires at t=4.5s
        scheduler.schedule(2);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["start 1", "end 1", "start 2", "end 2"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_dispatches_immediately() {
        let recorder = Arc::new(Recorder::default());
        let scheduler = CoalescingScheduler::new(Duration::from_secs(2), recorder.clone());

        scheduler.schedule(7);
        scheduler.flush().await;
        assert_eq!(*recorder.values.lock().unwrap(), vec![7]);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(*recorder.values.lock().unwrap(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_without_pending_is_noop() {
        let recorder = Arc::new(Recorder::default());
        let scheduler = CoalescingScheduler::new(Duration::from_secs(2), recorder.clone());
        scheduler.flush().await;
        assert!(recorder.values.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let recorder = Arc::new(Recorder::default());
        let scheduler = CoalescingScheduler::new(Duration::from_secs(2), recorder.clone());

        scheduler.schedule(3);
        scheduler.cancel();
        assert!(!scheduler.is_pending());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(recorder.values.lock().unwrap().is_empty());
    }
}
