//! Pending buffer: Fragments received since the last commit.
//!
//! Two paths feed this buffer: the aggregator draining the ingestion
//! channel, and producers appending directly when the channel is full.
//! The aggregator drains it on every tick.

use super::lock;
use std::sync::{Mutex, MutexGuard};

/// Mutex-guarded accumulator for uncommitted text.
#[derive(Debug, Default)]
pub struct PendingBuffer {
    text: Mutex<String>,
}

impl PendingBuffer {
    /// Create an empty pending buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sanitized fragment.
    pub fn push(&self, fragment: &str) {
        lock(&self.text).push_str(fragment);
    }

    /// Drain the accumulated text, leaving the buffer empty.
    ///
    /// Returns `None` if nothing was pending.
    pub fn take(&self) -> Option<String> {
        let mut text = lock(&self.text);
        if text.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut *text))
        }
    }

    /// Discard all pending text.
    pub fn clear(&self) {
        lock(&self.text).clear();
    }

    /// Number of pending bytes.
    pub fn len(&self) -> usize {
        lock(&self.text).len()
    }

    /// Check if nothing is pending.
    pub fn is_empty(&self) -> bool {
        lock(&self.text).is_empty()
    }

    /// Hold the pending lock.
    ///
    /// Operations spanning both buffers take this guard first, then the
    /// committed lock.
    pub(crate) fn guard(&self) -> MutexGuard<'_, String> {
        lock(&self.text)
    }
}
