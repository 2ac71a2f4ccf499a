//! Notifications: How the consumer learns that new content is visible.
//!
//! The engine calls a [`Notifier`] after every committed batch and after
//! every synchronous reset ([`Engine::set_full_text`], [`Engine::clear`]).
//! Notifiers run on whichever thread performed the mutation, with no buffer
//! lock held, so they must be cheap: mark a widget for refresh, wake an event
//! loop, or forward to a channel.
//!
//! Consumers that prefer polling can ignore notifications entirely and check
//! [`Engine::take_dirty`] from their own frame loop.
//!
//! [`Engine::set_full_text`]: crate::Engine::set_full_text
//! [`Engine::clear`]: crate::Engine::clear
//! [`Engine::take_dirty`]: crate::Engine::take_dirty

use crossbeam_channel::{Sender, TrySendError};

/// What changed in the committed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A batch of pending fragments was appended on a flush tick.
    Committed {
        /// Bytes appended by this batch.
        bytes: usize,
        /// Bytes dropped from the front by truncation.
        truncated: usize,
    },

    /// The content was replaced wholesale.
    Replaced {
        /// Length of the sanitized replacement text.
        bytes: usize,
        /// Bytes dropped from the front by truncation.
        truncated: usize,
    },

    /// The content was cleared.
    Cleared,
}

/// Receives [`Notification`]s from the engine.
pub trait Notifier: Send + Sync {
    /// Called once per visible change.
    fn notify(&self, notification: Notification);
}

impl<F> Notifier for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        self(notification);
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Forwards notifications into a crossbeam channel.
///
/// Uses `try_send`: if the consumer falls behind on a bounded channel,
/// extra notifications are dropped rather than stalling the flush loop.
/// The consumer always re-reads the full snapshot, so a dropped
/// notification only coalesces refreshes.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: Sender<Notification>,
}

impl ChannelNotifier {
    /// Wrap a sender.
    pub const fn new(sender: Sender<Notification>) -> Self {
        Self { sender }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        match self.sender.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::trace!(?notification, "consumer channel full, coalescing");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::trace!(?notification, "consumer channel disconnected");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_closure_notifier() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let notifier = move |_: Notification| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        };
        notifier.notify(Notification::Cleared);
        notifier.notify(Notification::Cleared);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_channel_notifier_coalesces_when_full() {
        let (tx, rx) = bounded(1);
        let notifier = ChannelNotifier::new(tx);
        notifier.notify(Notification::Cleared);
        notifier.notify(Notification::Committed { bytes: 3, truncated: 0 });
        assert_eq!(rx.try_recv(), Ok(Notification::Cleared));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_notifier_survives_disconnect() {
        let (tx, rx) = bounded(1);
        drop(rx);
        ChannelNotifier::new(tx).notify(Notification::Cleared);
    }
}
