//! Transient toast notifications.
//!
//! At most one toast is visible. Each call to [`NotificationCenter::notify`]
//! evicts the current toast and starts a fresh lifecycle:
//! `Entering` → `Shown` → `Leaving` → removed. Timers belonging to an evicted
//! toast still fire, but they only ever touch the toast id they were started
//! for, so they are no-ops once a newer toast is on screen.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::models::{Notification, NotificationKind};

/// Identifier of a single toast instance.
pub type ToastId = u64;

/// Lifecycle phase of the visible toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted but not yet transitioned in
    Entering,
    Shown,
    /// Fading out
    Leaving,
}

/// The toast currently in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub notification: Notification,
    pub phase: ToastPhase,
}

/// Delays driving the toast lifecycle, all measured from creation except `fade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub enter_delay: Duration,
    pub visible_for: Duration,
    pub fade: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            enter_delay: Duration::from_millis(100),
            visible_for: Duration::from_millis(3000),
            fade: Duration::from_millis(300),
        }
    }
}

struct Inner {
    next_id: AtomicU64,
    current: watch::Sender<Option<Toast>>,
    timings: ToastTimings,
}

/// Shared handle to the single toast slot.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_timings(ToastTimings::default())
    }

    pub fn with_timings(timings: ToastTimings) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(1),
                current,
                timings,
            }),
        }
    }

    /// Replaces any visible toast with a new one and schedules its lifecycle.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> ToastId {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification::new(message, kind);
        tracing::debug!(id, kind = %kind, message = %notification.message, "Showing notification");

        self.inner.current.send_replace(Some(Toast {
            id,
            notification,
            phase: ToastPhase::Entering,
        }));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(run_lifecycle(self.clone(), id));
            }
            Err(_) => {
                tracing::warn!(id, "No async runtime; notification stays until replaced");
            }
        }

        id
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.notify(message, NotificationKind::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.notify(message, NotificationKind::Error)
    }

    /// The toast currently in the document, if any.
    pub fn current(&self) -> Option<Toast> {
        self.inner.current.borrow().clone()
    }

    /// Receiver that observes every toast insertion, phase change and removal.
    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> {
        self.inner.current.subscribe()
    }

    /// Removes whatever toast is visible.
    pub fn dismiss(&self) {
        self.inner.current.send_if_modified(|current| current.take().is_some());
    }

    fn advance(&self, id: ToastId, phase: ToastPhase) -> bool {
        self.inner.current.send_if_modified(|current| match current {
            Some(toast) if toast.id == id => {
                toast.phase = phase;
                true
            }
            _ => false,
        })
    }

    fn remove(&self, id: ToastId) -> bool {
        self.inner.current.send_if_modified(|current| {
            if current.as_ref().is_some_and(|toast| toast.id == id) {
                *current = None;
                true
            } else {
                false
            }
        })
    }
}

async fn run_lifecycle(center: NotificationCenter, id: ToastId) {
    let timings = center.inner.timings;

    tokio::time::sleep(timings.enter_delay).await;
    center.advance(id, ToastPhase::Shown);

    tokio::time::sleep(timings.visible_for.saturating_sub(timings.enter_delay)).await;
    center.advance(id, ToastPhase::Leaving);

    tokio::time::sleep(timings.fade).await;
    if center.remove(id) {
        tracing::debug!(id, "Notification removed");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    use super::*;

    fn phase(center: &NotificationCenter) -> Option<ToastPhase> {
        center.current().map(|toast| toast.phase)
    }

    #[tokio::test(start_paused = true)]
    async fn toast_walks_through_its_lifecycle() {
        let center = NotificationCenter::new();
        center.info("Logging in...");
        assert_eq!(phase(&center), Some(ToastPhase::Entering));

        sleep(Duration::from_millis(150)).await;
        assert_eq!(phase(&center), Some(ToastPhase::Shown));

        sleep(Duration::from_millis(2900)).await;
        assert_eq!(phase(&center), Some(ToastPhase::Leaving));

        sleep(Duration::from_millis(300)).await;
        assert_eq!(center.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_toast_evicts_older_one_and_outlives_its_timers() {
        let center = NotificationCenter::new();
        center.info("Logging in...");

        sleep(Duration::from_millis(2000)).await;
        let second = center.success("Login successful!");
        let toast = center.current().unwrap();
        assert_eq!(toast.id, second);
        assert_eq!(toast.notification.kind, NotificationKind::Success);

        // The first toast's removal time (3.3s) passes; the second stays.
        sleep(Duration::from_millis(1500)).await;
        let toast = center.current().unwrap();
        assert_eq!(toast.id, second);
        assert_eq!(toast.phase, ToastPhase::Shown);

        // Second toast removed 3.3s after its own creation.
        sleep(Duration::from_millis(1900)).await;
        assert_eq!(center.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_the_latest_toast() {
        let center = NotificationCenter::new();
        let mut receiver = center.subscribe();

        center.error("Please fill in all fields");
        receiver.changed().await.unwrap();
        let seen = receiver.borrow_and_update().clone().unwrap();
        assert_eq!(seen.notification.message, "Please fill in all fields");
        assert_eq!(seen.notification.kind, NotificationKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_clears_visible_toast() {
        let center = NotificationCenter::new();
        center.info("hello");
        center.dismiss();
        assert_eq!(center.current(), None);

        // Pending timers of the dismissed toast do nothing.
        sleep(Duration::from_secs(5)).await;
        assert_eq!(center.current(), None);
    }

    #[test]
    fn notify_without_runtime_keeps_toast() {
        let center = NotificationCenter::new();
        center.info("offline");
        assert_eq!(phase(&center), Some(ToastPhase::Entering));
    }
}
