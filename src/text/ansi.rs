//! ANSI sanitizer: Strips CSI escape sequences from text fragments.
//!
//! Only sequences of the form `ESC [ <digits/semicolons> <letter>` are
//! removed. Everything else, newlines and stray `ESC` bytes included, is
//! kept verbatim. Stripping is a normalization step, not terminal emulation.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Pattern for a single CSI sequence (SGR colors, cursor moves, erases).
const CSI_PATTERN: &str = r"\x1B\[[0-9;]*[a-zA-Z]";

fn csi_regex() -> &'static Regex {
    static CSI: OnceLock<Regex> = OnceLock::new();
    CSI.get_or_init(|| Regex::new(CSI_PATTERN).expect("CSI pattern is a valid regex"))
}

/// Remove all ANSI CSI sequences from `text`.
///
/// Returns [`Cow::Borrowed`] when the input contains no escape sequence,
/// so the common case of plain output does not allocate.
///
/// Removal is repeated until no sequence remains. A sequence split by an
/// inner one (`"\x1B[\x1B[0m31m"`) would otherwise reassemble after the
/// first pass, and the result must be stable under a second call.
///
/// # Example
///
/// ```
/// use logsink::strip_ansi;
///
/// assert_eq!(strip_ansi("\x1B[31mred\x1B[0m text"), "red text");
/// ```
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    // Fast path: no ESC byte, nothing to strip.
    if !text.as_bytes().contains(&0x1B) {
        return Cow::Borrowed(text);
    }

    let regex = csi_regex();
    let mut current = match regex.replace_all(text, "") {
        Cow::Borrowed(_) => return Cow::Borrowed(text),
        Cow::Owned(stripped) => stripped,
    };

    loop {
        match regex.replace_all(&current, "") {
            Cow::Borrowed(_) => return Cow::Owned(current),
            Cow::Owned(stripped) => current = stripped,
        }
    }
}
