//! Aggregator Actor: Dedicated thread that batches fragments into commits.
//!
//! This actor owns the flush cadence. It drains the ingestion channel into
//! the pending buffer as fragments arrive, and on every tick moves whatever
//! is pending into the committed buffer in a single truncating append.
//! Arrival is cheap and frequent; commits (truncation plus consumer
//! notification) happen at most once per tick regardless of write rate.

use crate::actor::stats::StatsCounters;
use crate::buffer::{CommitResult, CommittedBuffer, PendingBuffer};
use crate::notify::{Notification, Notifier};
use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// State shared between the engine handle and the aggregator thread.
pub(crate) struct SinkState {
    pub(crate) pending: PendingBuffer,
    pub(crate) committed: CommittedBuffer,
    pub(crate) stats: StatsCounters,
    pub(crate) notifier: Box<dyn Notifier>,
}

impl SinkState {
    pub(crate) fn new(max_bytes: usize, notifier: Box<dyn Notifier>) -> Self {
        Self {
            pending: PendingBuffer::new(),
            committed: CommittedBuffer::new(max_bytes),
            stats: StatsCounters::default(),
            notifier,
        }
    }

    /// Move pending text into the committed buffer.
    ///
    /// Returns `false` without notifying if nothing was pending. The pending
    /// lock is held until the batch is in the committed buffer, so a
    /// concurrent [`reset`](Self::reset) lands entirely before or after the
    /// whole commit.
    pub(crate) fn flush(&self) -> bool {
        let result = {
            let mut pending = self.pending.guard();
            if pending.is_empty() {
                return false;
            }
            let batch = std::mem::take(&mut *pending);
            self.committed.append(&batch)
        };
        self.stats.record_commit(result.bytes, result.truncated);

        if result.truncated > 0 {
            tracing::debug!(
                dropped = result.truncated,
                retained = result.len,
                "truncated committed buffer"
            );
        }
        tracing::trace!(bytes = result.bytes, len = result.len, "committed batch");

        self.notifier.notify(Notification::Committed {
            bytes: result.bytes,
            truncated: result.truncated,
        });
        true
    }

    /// Discard pending text and replace the committed content.
    ///
    /// `None` empties the committed buffer. Locks pending, then committed.
    pub(crate) fn reset(&self, content: Option<&str>) -> CommitResult {
        let mut pending = self.pending.guard();
        pending.clear();
        match content {
            Some(content) => self.committed.replace(content),
            None => {
                self.committed.clear();
                CommitResult::default()
            }
        }
    }
}

/// Aggregator actor that runs the flush loop.
pub struct AggregatorActor {
    /// Handle to the aggregator thread.
    handle: Option<JoinHandle<()>>,
    /// Stop signal. Sending or dropping it ends the loop.
    stop_tx: Sender<()>,
}

impl AggregatorActor {
    /// Spawn the aggregator thread.
    ///
    /// # Arguments
    ///
    /// * `state` - Buffers, counters and notifier shared with the engine.
    /// * `fragments` - Receiving end of the ingestion channel.
    /// * `flush_period` - Interval between commit attempts.
    pub(crate) fn spawn(
        state: Arc<SinkState>,
        fragments: Receiver<String>,
        flush_period: Duration,
    ) -> io::Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("logsink-aggregator".to_string())
            .spawn(move || {
                Self::run_loop(&state, &fragments, &stop_rx, flush_period);
            })?;

        Ok(Self {
            handle: Some(handle),
            stop_tx,
        })
    }

    /// Signal the aggregator thread to stop.
    pub fn shutdown(&self) {
        // A full channel already carries a stop signal.
        let _ = self.stop_tx.try_send(());
    }

    /// Stop the thread and wait for it to finish.
    ///
    /// Does not wait when called from the aggregator thread itself (a
    /// notifier stopping the engine), which would otherwise deadlock.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                tracing::warn!("aggregator thread panicked");
            }
        }
    }

    /// Main aggregation loop.
    fn run_loop(
        state: &SinkState,
        fragments: &Receiver<String>,
        stop: &Receiver<()>,
        flush_period: Duration,
    ) {
        let ticker = tick(flush_period);
        tracing::debug!(?flush_period, "aggregator started");

        loop {
            select! {
                recv(stop) -> _ => break,
                recv(fragments) -> fragment => match fragment {
                    Ok(fragment) => state.pending.push(&fragment),
                    // Engine handle is gone; nothing can arrive anymore.
                    Err(_) => break,
                },
                recv(ticker) -> _ => {
                    state.flush();
                }
            }
        }

        tracing::debug!("aggregator stopped");
    }
}

impl Drop for AggregatorActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopNotifier;
    use std::sync::Mutex;

    fn state(max_bytes: usize) -> Arc<SinkState> {
        Arc::new(SinkState::new(max_bytes, Box::new(NoopNotifier)))
    }

    #[test]
    fn test_flush_empty_is_noop() {
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notifications);
        let notifier = move |n: Notification| sink.lock().unwrap().push(n);
        let state = SinkState::new(64, Box::new(notifier));

        assert!(!state.flush());
        assert!(notifications.lock().unwrap().is_empty());

        state.pending.push("abc");
        assert!(state.flush());
        assert_eq!(
            notifications.lock().unwrap().as_slice(),
            &[Notification::Committed { bytes: 3, truncated: 0 }]
        );
    }

    #[test]
    fn test_reset_never_lets_flushed_text_survive() {
        let state = state(1024);
        let done = Arc::new(std::sync::atomic::AtomicBool::new(false));

        let flusher = {
            let state = Arc::clone(&state);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(std::sync::atomic::Ordering::Relaxed) {
                    state.flush();
                }
            })
        };

        for _ in 0..5_000 {
            state.pending.push("stale");
            state.reset(None);
            assert_eq!(state.committed.snapshot(), "");

            state.pending.push("stale");
            state.reset(Some("fresh"));
            assert_eq!(state.committed.snapshot(), "fresh");
        }

        done.store(true, std::sync::atomic::Ordering::Relaxed);
        flusher.join().unwrap();
    }

    #[test]
    fn test_aggregator_commits_on_tick() {
        let state = state(1024);
        let (tx, rx) = bounded(16);
        let actor =
            AggregatorActor::spawn(Arc::clone(&state), rx, Duration::from_millis(10)).unwrap();

        tx.send("hello ".to_string()).unwrap();
        tx.send("world".to_string()).unwrap();
        thread::sleep(Duration::from_millis(100));

        assert_eq!(state.committed.snapshot(), "hello world");
        actor.join();
    }

    #[test]
    fn test_aggregator_stops_without_commit() {
        let state = state(1024);
        let (_tx, rx) = bounded::<String>(16);
        let actor =
            AggregatorActor::spawn(Arc::clone(&state), rx, Duration::from_millis(10)).unwrap();
        actor.join();

        state.pending.push("late");
        thread::sleep(Duration::from_millis(50));
        assert_eq!(state.committed.snapshot(), "");
    }

    #[test]
    fn test_aggregator_exits_when_channel_disconnects() {
        let state = state(1024);
        let (tx, rx) = bounded::<String>(16);
        let actor =
            AggregatorActor::spawn(Arc::clone(&state), rx, Duration::from_secs(60)).unwrap();
        drop(tx);
        // Would hang here if the loop kept running.
        actor.join();
    }
}
