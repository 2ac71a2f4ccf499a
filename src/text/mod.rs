//! Text module: Pure transformations applied to fragments and content.
//!
//! This module contains:
//! - [`strip_ansi`]: Removes ANSI CSI sequences from incoming fragments
//! - [`truncate_to_line_boundary`]: Bounds retained content to a byte budget,
//!   preferring to start on a clean line

mod ansi;
mod truncate;

pub use ansi::strip_ansi;
pub use truncate::truncate_to_line_boundary;
