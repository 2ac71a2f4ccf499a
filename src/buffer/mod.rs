//! Buffer module: The two text stores behind the sink.
//!
//! This module contains:
//! - [`PendingBuffer`]: Fragments received since the last commit
//! - [`CommittedBuffer`]: The size-bounded content readers see
//!
//! Operations that touch both always lock pending first, then committed.

mod committed;
mod pending;

pub use committed::{CommitResult, CommittedBuffer};
pub use pending::PendingBuffer;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if another thread panicked while
/// holding it. Every buffer mutation leaves the text valid, so a poisoned
/// lock still guards usable content.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
