//! # Notifier Port
//!
//! Sink for transient user-facing messages ("toasts"). Fire-and-forget: the
//! store never waits for, or learns about, delivery.

use tokio::sync::mpsc;
use tracing::warn;

/// Receives user-facing error messages.
pub trait Notifier: Send + Sync {
    /// Shows an error message to the user.
    fn error(&self, message: &str);
}

/// A message delivered through a [`ChannelNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Error(String),
}

impl Notification {
    /// Text of the notification.
    pub fn message(&self) -> &str {
        match self {
            Notification::Error(message) => message,
        }
    }
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(notification = %message, "User notification");
    }
}

/// Notifier that forwards messages to a UI event loop over a channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiver the UI drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelNotifier { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn error(&self, message: &str) {
        // Nobody listening any more is not the cart's problem
        if self.tx.send(Notification::Error(message.to_string())).is_err() {
            warn!(notification = %message, "Notification dropped, receiver closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.error("first");
        notifier.error("second");

        assert_eq!(rx.try_recv().unwrap().message(), "first");
        assert_eq!(rx.try_recv().unwrap(), Notification::Error("second".into()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_receiver_does_not_panic() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.error("nobody hears this");
        TracingNotifier.error("logged only");
    }
}
