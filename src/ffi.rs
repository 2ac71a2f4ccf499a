//! C Foreign Function Interface (FFI) for the log sink.
//!
//! This module provides a C-compatible API so hosts written in other
//! languages (a GUI toolkit, a scripting runtime) can feed process output
//! through the sink and poll it from their own render loop. All functions
//! are `extern "C"` with stable ABI.
//!
//! # Safety
//!
//! All functions that accept pointers require valid pointers; NULL is
//! tolerated and treated as a no-op. Strings returned by
//! [`logsink_get_text`] must be released with [`logsink_string_free`].
//!
//! # Example (C)
//!
//! ```c
//! #include "logsink.h"
//!
//! int main() {
//!     LogSink* sink = logsink_new();
//!     if (!sink) return 1;
//!
//!     logsink_append(sink, "\x1b[32mready\x1b[0m\n");
//!
//!     // Render loop...
//!     if (logsink_take_dirty(sink)) {
//!         char* text = logsink_get_text(sink);
//!         draw(text);
//!         logsink_string_free(text);
//!     }
//!
//!     logsink_destroy(sink);
//!     return 0;
//! }
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::actor::{Engine, EngineConfig};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::time::Duration;

// =============================================================================
// Opaque Handle Types
// =============================================================================

/// Opaque handle to a log sink engine.
pub struct LogSink(Engine);

// =============================================================================
// Result and Error Codes
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSinkResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
}

// =============================================================================
// Lifecycle Functions
// =============================================================================

/// Create a new log sink with default configuration.
///
/// Returns NULL on failure.
#[unsafe(no_mangle)]
pub extern "C" fn logsink_new() -> *mut LogSink {
    match Engine::new() {
        Ok(engine) => Box::into_raw(Box::new(LogSink(engine))),
        Err(err) => {
            tracing::warn!(%err, "logsink_new failed");
            ptr::null_mut()
        }
    }
}

/// Create a new log sink with custom configuration.
///
/// A zero argument selects the default for that knob. Returns NULL on
/// failure.
#[unsafe(no_mangle)]
pub extern "C" fn logsink_new_with_config(
    max_bytes: usize,
    flush_period_ms: u64,
    channel_capacity: usize,
) -> *mut LogSink {
    let mut config = EngineConfig::default();
    if max_bytes > 0 {
        config.max_bytes = max_bytes;
    }
    if flush_period_ms > 0 {
        config.flush_period = Duration::from_millis(flush_period_ms);
    }
    if channel_capacity > 0 {
        config.channel_capacity = channel_capacity;
    }

    match Engine::with_config(config) {
        Ok(engine) => Box::into_raw(Box::new(LogSink(engine))),
        Err(err) => {
            tracing::warn!(%err, "logsink_new_with_config failed");
            ptr::null_mut()
        }
    }
}

/// Stop the aggregator. The sink stays readable until destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_stop(sink: *const LogSink) {
    if !sink.is_null() {
        (*sink).0.stop();
    }
}

/// Check if the aggregator is still running.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_is_running(sink: *const LogSink) -> bool {
    if sink.is_null() {
        return false;
    }
    (*sink).0.is_running()
}

/// Stop and free a log sink.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_destroy(sink: *mut LogSink) {
    if !sink.is_null() {
        drop(Box::from_raw(sink));
    }
}

// =============================================================================
// Ingestion Functions
// =============================================================================

/// Append a NUL-terminated fragment.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_append(sink: *const LogSink, text: *const c_char) -> LogSinkResult {
    if sink.is_null() || text.is_null() {
        return LogSinkResult::NullPointer;
    }
    let text_str = CStr::from_ptr(text).to_string_lossy();

    (*sink).0.append(&text_str);
    LogSinkResult::Ok
}

/// Replace the whole content with a NUL-terminated string.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_set_full_text(
    sink: *const LogSink,
    text: *const c_char,
) -> LogSinkResult {
    if sink.is_null() || text.is_null() {
        return LogSinkResult::NullPointer;
    }
    let text_str = CStr::from_ptr(text).to_string_lossy();

    (*sink).0.set_full_text(&text_str);
    LogSinkResult::Ok
}

/// Clear all content.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_clear(sink: *const LogSink) {
    if !sink.is_null() {
        (*sink).0.clear();
    }
}

// =============================================================================
// Consumer Functions
// =============================================================================

/// Get a copy of the committed content.
///
/// The caller owns the result and must free it with
/// [`logsink_string_free`]. NUL bytes in the content are dropped. Returns
/// NULL if `sink` is NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_get_text(sink: *const LogSink) -> *mut c_char {
    if sink.is_null() {
        return ptr::null_mut();
    }
    let text = (*sink).0.get_text();
    let c_text = CString::new(text).unwrap_or_else(|err| {
        let mut bytes = err.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c_text.into_raw()
}

/// Free a string returned by [`logsink_get_text`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_string_free(text: *mut c_char) {
    if !text.is_null() {
        drop(CString::from_raw(text));
    }
}

/// Length of the committed content in bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_len(sink: *const LogSink) -> usize {
    if sink.is_null() {
        return 0;
    }
    (*sink).0.len()
}

/// Return whether the content changed since the last call, and reset.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logsink_take_dirty(sink: *const LogSink) -> bool {
    if sink.is_null() {
        return false;
    }
    (*sink).0.take_dirty()
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the log sink version string.
#[unsafe(no_mangle)]
pub extern "C" fn logsink_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}
