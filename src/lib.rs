//! # Logsink
//!
//! A concurrent, rate-limited text sink for streaming process output.
//!
//! Logsink accepts text fragments from any number of producer threads,
//! strips ANSI escape sequences, and coalesces bursts of writes into
//! periodic commits, so a display can refresh at a bounded rate no matter
//! how fast the output arrives.
//!
//! ## Core Concepts
//!
//! - **Non-blocking ingestion**: Appends go through a bounded channel and fall
//!   back to a locked buffer when it is full; nothing is ever dropped
//! - **Coalesced commits**: One background thread commits at most once per
//!   flush period
//! - **Bounded memory**: Committed content is capped at `max_bytes`, trimmed
//!   from the front to the nearest line boundary
//! - **Snapshots**: The consumer reads a sanitized copy at any time and is
//!   notified (or polls a dirty flag) after each change
//!
//! ## Example
//!
//! ```rust,ignore
//! use logsink::{Engine, EngineConfig, Notification};
//!
//! let engine = Engine::with_notifier(EngineConfig::default(), |n: Notification| {
//!     request_repaint(n);
//! })?;
//!
//! engine.append("\x1b[1mCompiling\x1b[0m logsink\n");
//! let visible = engine.get_text();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod error;
pub mod ffi;
pub mod notify;
pub mod text;

// Re-exports for convenience
pub use actor::{Engine, EngineConfig, SinkStats};
pub use buffer::{CommitResult, CommittedBuffer, PendingBuffer};
pub use error::{ConfigError, EngineError};
pub use notify::{ChannelNotifier, NoopNotifier, Notification, Notifier};
pub use text::{strip_ansi, truncate_to_line_boundary};
