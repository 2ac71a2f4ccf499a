//! Actor Model: The background flush loop and the handle producers share.
//!
//! This module implements the sink's concurrency with crossbeam channels:
//! - **Producers**: Any thread calling [`Engine::append`]
//! - **Aggregator Actor**: Drains fragments, commits on every tick
//! - **Consumer**: Reads snapshots, woken by a [`Notifier`](crate::Notifier)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  try_send   ┌──────────────┐  tick  ┌─────────────┐
//! │ Producer │ ──────────▶ │  Aggregator  │ ─────▶ │  Committed  │
//! └──────────┘             │    Thread    │        │   Buffer    │
//!      │                   └──────────────┘        └─────────────┘
//!      │ channel full             │ drain                 │
//!      ▼                          ▼                       │ snapshot
//! ┌──────────────────────────────────────┐                ▼
//! │            Pending Buffer            │         ┌─────────────┐
//! └──────────────────────────────────────┘         │  Consumer   │
//!                                                  └─────────────┘
//! ```

mod aggregator;
mod engine;
mod stats;

pub(crate) use aggregator::AggregatorActor;
pub use engine::{
    Engine, EngineConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_FLUSH_PERIOD, DEFAULT_MAX_BYTES,
};
pub use stats::SinkStats;
