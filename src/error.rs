//! Error types for engine construction.
//!
//! Ingestion never fails: appends, resets and snapshots always succeed from
//! the caller's point of view. Only building an engine can go wrong.

use std::time::Duration;
use thiserror::Error;

/// Rejected [`EngineConfig`](crate::EngineConfig) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero byte ceiling would discard every fragment.
    #[error("max_bytes must be greater than zero")]
    ZeroMaxBytes,
    /// A zero-capacity channel is a rendezvous channel, which cannot be
    /// written without blocking.
    #[error("channel_capacity must be greater than zero")]
    ZeroChannelCapacity,
    /// The flush loop needs a non-zero period to tick on.
    #[error("flush_period must be non-zero, got {0:?}")]
    ZeroFlushPeriod(Duration),
}

/// Errors that may occur while starting an [`Engine`](crate::Engine).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration failed validation.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// The OS refused to spawn the aggregator thread.
    #[error("failed to spawn aggregator thread: {source}")]
    Spawn {
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
