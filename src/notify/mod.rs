//! Completion notifiers
//!
//! The timer controller only knows the `Notifier` trait. Concrete notifiers
//! decide what "telling the user" means: a log line, a message on an
//! in-process channel, or an external command.

pub mod command;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

pub use command::CommandNotifier;

/// Observer invoked once when a countdown reaches zero
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &CompletionEvent);
}

/// Payload delivered to notifiers when a countdown completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub title: String,
    pub message: String,
    pub minutes: u64,
    pub completed_at: DateTime<Utc>,
}

impl CompletionEvent {
    pub fn new(minutes: u64) -> Self {
        let message = if minutes == 1 {
            "1 minute has passed. Take a break!".to_string()
        } else {
            format!("{} minutes have passed. Take a break!", minutes)
        };

        Self {
            title: "Time Up!".to_string(),
            message,
            minutes,
            completed_at: Utc::now(),
        }
    }
}

/// Writes the completion to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &CompletionEvent) {
        info!("{} {}", event.title, event.message);
    }
}

/// Publishes completions on a broadcast channel for in-process listeners
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<CompletionEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CompletionEvent> {
        self.tx.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, event: &CompletionEvent) {
        // No subscribers is not an error, nobody is listening yet
        if self.tx.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.tx.send(event.clone()) {
            warn!("Failed to broadcast completion event: {}", e);
        }
    }
}

/// Fans a single completion out to several notifiers
#[derive(Default)]
pub struct Notifiers {
    inner: Vec<Arc<dyn Notifier>>,
}

impl Notifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.inner.push(notifier);
        self
    }

    pub fn count(&self) -> usize {
        self.inner.len()
    }
}

impl Notifier for Notifiers {
    fn notify(&self, event: &CompletionEvent) {
        for notifier in &self.inner {
            notifier.notify(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl Notifier for Counter {
        fn notify(&self, _event: &CompletionEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_completion_message() {
        assert_eq!(CompletionEvent::new(1).message, "1 minute has passed. Take a break!");
        assert_eq!(CompletionEvent::new(25).message, "25 minutes have passed. Take a break!");
        assert_eq!(CompletionEvent::new(25).title, "Time Up!");
    }

    #[test]
    fn test_fan_out_reaches_every_notifier() {
        let a = Arc::new(Counter(AtomicUsize::new(0)));
        let b = Arc::new(Counter(AtomicUsize::new(0)));
        let notifiers = Notifiers::new()
            .with(a.clone())
            .with(b.clone())
            .with(Arc::new(LogNotifier));

        assert_eq!(notifiers.count(), 3);
        notifiers.notify(&CompletionEvent::new(5));

        assert_eq!(a.0.load(Ordering::SeqCst), 1);
        assert_eq!(b.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_broadcast_delivers_event() {
        let notifier = BroadcastNotifier::new(4);
        let mut rx = notifier.subscribe();

        notifier.notify(&CompletionEvent::new(3));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.minutes, 3);
    }

    #[test]
    fn test_broadcast_without_subscribers_is_silent() {
        let notifier = BroadcastNotifier::new(4);
        notifier.notify(&CompletionEvent::new(3));
    }
}
