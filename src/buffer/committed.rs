//! Committed buffer: The authoritative, size-bounded content.
//!
//! Readers only ever see this buffer through [`CommittedBuffer::snapshot`].
//! Every mutation re-applies the truncation policy, so the length bound
//! holds whenever the lock is released.

use super::lock;
use crate::text::truncate_to_line_boundary;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Outcome of a mutation of the committed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitResult {
    /// Bytes written by the mutation (before truncation).
    pub bytes: usize,
    /// Bytes dropped from the front by truncation.
    pub truncated: usize,
    /// Content length after the mutation.
    pub len: usize,
}

/// Mutex-guarded content bounded to `max_bytes`, with a dirty flag.
#[derive(Debug)]
pub struct CommittedBuffer {
    text: Mutex<String>,
    max_bytes: usize,
    /// Set on every mutation, cleared by the consumer.
    dirty: AtomicBool,
}

impl CommittedBuffer {
    /// Create an empty buffer bounded to `max_bytes`.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            text: Mutex::new(String::new()),
            max_bytes,
            dirty: AtomicBool::new(false),
        }
    }

    /// The retained-size ceiling.
    #[inline]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Append a batch and truncate.
    pub fn append(&self, batch: &str) -> CommitResult {
        let mut text = lock(&self.text);
        text.push_str(batch);
        let truncated = truncate_to_line_boundary(&mut text, self.max_bytes);
        self.mark_dirty();
        CommitResult {
            bytes: batch.len(),
            truncated,
            len: text.len(),
        }
    }

    /// Replace the whole content and truncate.
    pub fn replace(&self, content: &str) -> CommitResult {
        let mut text = lock(&self.text);
        text.clear();
        text.push_str(content);
        let truncated = truncate_to_line_boundary(&mut text, self.max_bytes);
        self.mark_dirty();
        CommitResult {
            bytes: content.len(),
            truncated,
            len: text.len(),
        }
    }

    /// Empty the buffer.
    pub fn clear(&self) {
        lock(&self.text).clear();
        self.mark_dirty();
    }

    /// Copy of the current content.
    pub fn snapshot(&self) -> String {
        lock(&self.text).clone()
    }

    /// Current content length in bytes.
    pub fn len(&self) -> usize {
        lock(&self.text).len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        lock(&self.text).is_empty()
    }

    /// Flag the content as changed since the consumer last looked.
    #[inline]
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Check if the content changed since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Return the dirty flag and clear it.
    #[inline]
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}
