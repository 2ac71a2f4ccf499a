//! Engine: The log sink handle shared by producers and the consumer.
//!
//! The Engine is the entry point for applications using the sink. It owns
//! the ingestion channel, spawns the aggregator at construction, and
//! exposes the synchronous API every other thread calls.
//!
//! # Writers
//!
//! The aggregator thread is the single writer of batched content. The two
//! exceptions are [`Engine::set_full_text`] and [`Engine::clear`], which
//! write the committed buffer directly from the calling thread. They take
//! the pending lock and then the committed lock, the same order the flush
//! path holds them in, so each one lands entirely before or entirely after
//! any given commit.

use super::aggregator::{AggregatorActor, SinkState};
use super::stats::{FragmentPath, SinkStats};
use crate::buffer::lock;
use crate::error::{ConfigError, EngineError};
use crate::notify::{Notification, Notifier, NoopNotifier};
use crate::text::strip_ansi;
use crossbeam_channel::{bounded, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default retained-size ceiling (10 MiB).
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Default interval between commits.
pub const DEFAULT_FLUSH_PERIOD: Duration = Duration::from_millis(100);

/// Default ingestion channel capacity, in fragments.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Configuration for the Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum bytes retained in the committed buffer.
    pub max_bytes: usize,
    /// Commit cadence.
    pub flush_period: Duration,
    /// Fragments the ingestion channel holds before appends fall back to
    /// the pending buffer.
    pub channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            flush_period: DEFAULT_FLUSH_PERIOD,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Set the retained-size ceiling.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set the commit cadence.
    #[must_use]
    pub const fn with_flush_period(mut self, flush_period: Duration) -> Self {
        self.flush_period = flush_period;
        self
    }

    /// Set the ingestion channel capacity.
    #[must_use]
    pub const fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    /// Check that every knob is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::ZeroMaxBytes);
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        if self.flush_period.is_zero() {
            return Err(ConfigError::ZeroFlushPeriod(self.flush_period));
        }
        Ok(())
    }
}

/// The log sink engine.
///
/// `Engine` is `Send + Sync`; share it between producer threads with an
/// [`Arc`]. Dropping it stops the aggregator.
///
/// # Example
///
/// ```no_run
/// use logsink::Engine;
/// use std::time::Duration;
///
/// let engine = Engine::new()?;
/// engine.append("\x1b[32mok\x1b[0m build finished\n");
///
/// std::thread::sleep(Duration::from_millis(250));
/// assert_eq!(engine.get_text(), "ok build finished\n");
/// # Ok::<(), logsink::EngineError>(())
/// ```
pub struct Engine {
    /// Configuration.
    config: EngineConfig,
    /// Buffers, counters and notifier shared with the aggregator.
    state: Arc<SinkState>,
    /// Ingestion channel sender.
    fragment_tx: Sender<String>,
    /// Aggregator handle, taken exactly once by `stop`.
    aggregator: Mutex<Option<AggregatorActor>>,
    /// Whether the aggregator is still running.
    running: AtomicBool,
}

impl Engine {
    /// Create a new engine with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregator thread cannot be spawned.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the aggregator
    /// thread cannot be spawned.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_notifier(config, NoopNotifier)
    }

    /// Create a new engine that reports changes to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the aggregator
    /// thread cannot be spawned.
    pub fn with_notifier(
        config: EngineConfig,
        notifier: impl Notifier + 'static,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let (fragment_tx, fragment_rx) = bounded::<String>(config.channel_capacity);
        let state = Arc::new(SinkState::new(config.max_bytes, Box::new(notifier)));

        let aggregator =
            AggregatorActor::spawn(Arc::clone(&state), fragment_rx, config.flush_period)
                .map_err(|source| EngineError::Spawn { source })?;

        tracing::debug!(
            max_bytes = config.max_bytes,
            flush_period = ?config.flush_period,
            channel_capacity = config.channel_capacity,
            "log sink started"
        );

        Ok(Self {
            config,
            state,
            fragment_tx,
            aggregator: Mutex::new(Some(aggregator)),
            running: AtomicBool::new(true),
        })
    }

    /// Get the configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Append a fragment.
    ///
    /// The text is sanitized, then handed to the aggregator through the
    /// ingestion channel. If the channel is full, it is appended straight to
    /// the pending buffer instead. Never blocks on the consumer and never
    /// drops text; it becomes visible on the next commit.
    ///
    /// Fragments sent through the channel keep their order. A fragment that
    /// took the fallback path may be committed ahead of channel fragments
    /// submitted earlier, since those still sit in the channel when it lands
    /// in the pending buffer. Ordering across the two paths is best-effort.
    ///
    /// Empty fragments are ignored. After [`stop`](Self::stop) the text is
    /// still buffered but never committed.
    pub fn append(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        let clean = strip_ansi(text).into_owned();

        match self.fragment_tx.try_send(clean) {
            Ok(()) => self.state.stats.record_fragment(FragmentPath::Channel),
            Err(TrySendError::Full(clean)) => {
                tracing::trace!(bytes = clean.len(), "ingestion channel full, appending directly");
                self.state.pending.push(&clean);
                self.state.stats.record_fragment(FragmentPath::Fallback);
            }
            Err(TrySendError::Disconnected(clean)) => {
                tracing::trace!(bytes = clean.len(), "aggregator stopped, buffering without commit");
                self.state.pending.push(&clean);
                self.state.stats.record_fragment(FragmentPath::Stopped);
            }
        }
    }

    /// Replace the committed content.
    ///
    /// Sanitizes `text`, discards anything pending, replaces the committed
    /// buffer, truncates it, and notifies the consumer, all before
    /// returning. Fragments still in the ingestion channel are committed on
    /// top of the new content by later ticks.
    pub fn set_full_text(&self, text: &str) {
        let clean = strip_ansi(text);

        let result = self.state.reset(Some(clean.as_ref()));
        self.state.stats.record_truncation(result.truncated);

        if result.truncated > 0 {
            tracing::debug!(
                dropped = result.truncated,
                retained = result.len,
                "truncated replacement text"
            );
        }

        self.state.notifier.notify(Notification::Replaced {
            bytes: result.bytes,
            truncated: result.truncated,
        });
    }

    /// Empty both the pending and the committed buffer, then notify.
    ///
    /// A [`get_text`](Self::get_text) right after this returns `""` even if
    /// fragments are still in flight.
    pub fn clear(&self) {
        self.state.reset(None);
        self.state.notifier.notify(Notification::Cleared);
    }

    /// Snapshot of the committed content.
    ///
    /// Only as fresh as the last commit; pending text is never included.
    pub fn get_text(&self) -> String {
        self.state.committed.snapshot()
    }

    /// Length of the committed content in bytes.
    pub fn len(&self) -> usize {
        self.state.committed.len()
    }

    /// Check if the committed content is empty.
    pub fn is_empty(&self) -> bool {
        self.state.committed.is_empty()
    }

    /// Check if the committed content changed since the last
    /// [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self) -> bool {
        self.state.committed.is_dirty()
    }

    /// Return whether the committed content changed, and reset the flag.
    ///
    /// For consumers that poll from their own frame loop instead of
    /// reacting to notifications.
    pub fn take_dirty(&self) -> bool {
        self.state.committed.take_dirty()
    }

    /// Snapshot of the engine counters.
    pub fn stats(&self) -> SinkStats {
        self.state.stats.snapshot()
    }

    /// Check if the aggregator is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the aggregator.
    ///
    /// Waits for the aggregator thread to exit, so no commit happens after
    /// this returns. Buffers keep their last state and stay readable.
    /// Calling it again is a no-op.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            tracing::debug!("stop called on a stopped log sink");
            return;
        }

        let aggregator = lock(&self.aggregator).take();
        if let Some(aggregator) = aggregator {
            aggregator.join();
        }
        tracing::debug!(len = self.len(), "log sink stopped");
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
