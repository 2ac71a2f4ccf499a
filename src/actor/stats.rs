//! Sink statistics: Lock-free counters updated on the hot paths.

use std::sync::atomic::{AtomicU64, Ordering};

/// Route a fragment took into the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FragmentPath {
    /// Handed off through the ingestion channel.
    Channel,
    /// Appended directly because the channel was full.
    Fallback,
    /// Buffered after the aggregator exited.
    Stopped,
}

/// Snapshot of engine counters for debugging/profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Fragments passed to `append`.
    pub fragments: u64,
    /// Fragments handed off through the ingestion channel.
    pub channel_deliveries: u64,
    /// Fragments appended directly because the channel was full.
    pub fallback_appends: u64,
    /// Fragments buffered after the aggregator stopped; never committed.
    pub stopped_appends: u64,
    /// Non-empty batches committed by the flush loop.
    pub commits: u64,
    /// Bytes moved into the committed buffer by the flush loop.
    pub bytes_committed: u64,
    /// Bytes dropped by truncation (commits and replacements).
    pub bytes_truncated: u64,
}

/// Shared counters behind [`SinkStats`].
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    fragments: AtomicU64,
    channel_deliveries: AtomicU64,
    fallback_appends: AtomicU64,
    stopped_appends: AtomicU64,
    commits: AtomicU64,
    bytes_committed: AtomicU64,
    bytes_truncated: AtomicU64,
}

fn widen(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

impl StatsCounters {
    pub(crate) fn record_fragment(&self, path: FragmentPath) {
        self.fragments.fetch_add(1, Ordering::Relaxed);
        let counter = match path {
            FragmentPath::Channel => &self.channel_deliveries,
            FragmentPath::Fallback => &self.fallback_appends,
            FragmentPath::Stopped => &self.stopped_appends,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self, bytes: usize, truncated: usize) {
        self.commits.fetch_add(1, Ordering::Relaxed);
        self.bytes_committed.fetch_add(widen(bytes), Ordering::Relaxed);
        self.record_truncation(truncated);
    }

    pub(crate) fn record_truncation(&self, truncated: usize) {
        if truncated > 0 {
            self.bytes_truncated.fetch_add(widen(truncated), Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> SinkStats {
        SinkStats {
            fragments: self.fragments.load(Ordering::Relaxed),
            channel_deliveries: self.channel_deliveries.load(Ordering::Relaxed),
            fallback_appends: self.fallback_appends.load(Ordering::Relaxed),
            stopped_appends: self.stopped_appends.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            bytes_committed: self.bytes_committed.load(Ordering::Relaxed),
            bytes_truncated: self.bytes_truncated.load(Ordering::Relaxed),
        }
    }
}
