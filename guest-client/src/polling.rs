//! Polling list refresh
//!
//! The request and order queues approximate live updates with a
//! fixed-interval refetch (5 s requests, 10 s orders) plus an immediate
//! out-of-band refetch on window focus and network reconnect. No backoff,
//! no jitter; the poller stops when the owning screen's cancellation token
//! fires, and no tick runs after cancellation.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::ClientConfig;

/// Handle for forcing an immediate out-of-band refetch
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Request an immediate refetch. Coalesces when one is already queued.
    pub fn trigger(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Fixed-interval poller for one list screen
pub struct ListPoller;

impl ListPoller {
    /// Spawn the polling loop.
    ///
    /// `task` runs once immediately (screen mount), then on every interval
    /// tick, and on every [`RefreshHandle::trigger`]. A trigger resets the
    /// interval so the next timed tick is a full interval away. The loop
    /// exits when `cancel` fires.
    pub fn spawn<F, Fut>(
        interval: Duration,
        cancel: CancellationToken,
        mut task: F,
    ) -> RefreshHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (tx, mut rx) = mpsc::channel::<()>(1);
        let handle = RefreshHandle { tx };

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!("list poller stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        task().await;
                    }
                    Some(_) = rx.recv() => {
                        task().await;
                        ticker.reset();
                    }
                }
            }
        });

        handle
    }

    /// Spawn a poller for the request queue at the configured cadence
    pub fn spawn_requests<F, Fut>(
        config: &ClientConfig,
        cancel: CancellationToken,
        task: F,
    ) -> RefreshHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        Self::spawn(config.request_poll_interval, cancel, task)
    }

    /// Spawn a poller for the order queue at the configured cadence
    pub fn spawn_orders<F, Fut>(
        config: &ClientConfig,
        cancel: CancellationToken,
        task: F,
    ) -> RefreshHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        Self::spawn(config.order_poll_interval, cancel, task)
    }
}

/// Named query groups mapped to their refresh handles.
///
/// Action-triggered invalidation: processing a request invalidates both
/// "requests" and "orders", since a processed request becomes an order.
#[derive(Clone, Default)]
pub struct QueryInvalidator {
    groups: Arc<RwLock<HashMap<String, RefreshHandle>>>,
}

impl QueryInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group's refresh handle (screen mount)
    pub fn register(&self, group: impl Into<String>, handle: RefreshHandle) {
        self.groups.write().insert(group.into(), handle);
    }

    /// Drop a group's handle (screen unmount)
    pub fn unregister(&self, group: &str) {
        self.groups.write().remove(group);
    }

    /// Trigger an immediate refetch of each named group; unknown names are
    /// ignored (the screen may not be mounted)
    pub fn invalidate(&self, groups: &[&str]) {
        let registered = self.groups.read();
        for name in groups {
            if let Some(handle) = registered.get(*name) {
                handle.trigger();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: Arc<AtomicUsize>) -> impl FnMut() -> std::future::Ready<()> {
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test]
    async fn test_polls_on_cadence_and_stops_on_cancel() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let _handle = ListPoller::spawn(
            Duration::from_millis(50),
            cancel.clone(),
            counting_task(counter.clone()),
        );

        // Immediate tick plus at least two interval ticks
        tokio::time::sleep(Duration::from_millis(180)).await;
        let polled = counter.load(Ordering::SeqCst);
        assert!(polled >= 3, "expected >= 3 polls, got {}", polled);

        cancel.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_cancel = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_cancel);
    }

    #[tokio::test]
    async fn test_queue_spawners_use_configured_intervals() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let config = ClientConfig::default()
            .with_poll_intervals(Duration::from_millis(40), Duration::from_secs(60));

        let _requests = ListPoller::spawn_requests(
            &config,
            cancel.clone(),
            counting_task(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(150)).await;
        let polled = counter.load(Ordering::SeqCst);
        assert!(polled >= 3, "expected >= 3 polls, got {}", polled);

        cancel.cancel();
    }

    #[tokio::test]
    async fn test_trigger_fires_immediate_refetch() {
        let counter = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = ListPoller::spawn(
            Duration::from_secs(60),
            cancel.clone(),
            counting_task(counter.clone()),
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1); // mount tick only

        handle.trigger(); // focus regained
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        cancel.cancel();
    }

    #[tokio::test]
    async fn test_invalidator_triggers_registered_groups() {
        let requests = Arc::new(AtomicUsize::new(0));
        let orders = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();

        let invalidator = QueryInvalidator::new();
        invalidator.register(
            "requests",
            ListPoller::spawn(
                Duration::from_secs(60),
                cancel.clone(),
                counting_task(requests.clone()),
            ),
        );
        invalidator.register(
            "orders",
            ListPoller::spawn(
                Duration::from_secs(60),
                cancel.clone(),
                counting_task(orders.clone()),
            ),
        );
        tokio::time::sleep(Duration::from_millis(30)).await;

        // Processing a request refreshes both queues
        invalidator.invalidate(&["requests", "orders", "unknown"]);
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(requests.load(Ordering::SeqCst), 2);
        assert_eq!(orders.load(Ordering::SeqCst), 2);

        cancel.cancel();
    }
}
