//! User-facing notification sink
//!
//! Remote failures surface as a short title plus a longer description. The
//! embedding shell renders them as toasts; headless use and tests fall back
//! to the tracing sink.

/// Notification sink for user-visible failures
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, description: &str);
}

/// Default sink: routes notifications to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, title: &str, description: &str) {
        tracing::warn!(title, description, "user notification");
    }
}
