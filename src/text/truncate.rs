//! Truncation policy: Keeps the newest `max_bytes` of content.
//!
//! The oldest prefix is dropped first, then the retained window is aligned
//! to the first newline it contains so the visible log starts on a whole
//! line. Exactness of the oldest line is not required for a scrolling log,
//! so a window with no usable newline is kept as-is and may start mid-line.

/// Bound `content` to at most `max_bytes` bytes.
///
/// Returns the number of bytes removed from the front (0 if the content
/// already fit).
///
/// 1. Take the trailing `max_bytes` bytes as the window.
/// 2. If the window contains a newline at offset `i > 0`, drop `[0, i]`.
/// 3. Otherwise keep the window, moving its start forward to the next char
///    boundary if the cut landed inside a UTF-8 sequence.
///
/// # Example
///
/// ```
/// use logsink::truncate_to_line_boundary;
///
/// let mut content = String::from("1234567890\nABCDEFGHIJ");
/// truncate_to_line_boundary(&mut content, 20);
/// assert_eq!(content, "ABCDEFGHIJ");
/// ```
pub fn truncate_to_line_boundary(content: &mut String, max_bytes: usize) -> usize {
    let len = content.len();
    if len <= max_bytes {
        return 0;
    }

    let cut = len - max_bytes;
    let newline = content.as_bytes()[cut..].iter().position(|&b| b == b'\n');

    // Just past a newline is always a char boundary. Only a window with no
    // usable newline needs the cut moved off a multi-byte sequence.
    let start = match newline {
        Some(offset) if offset > 0 => cut + offset + 1,
        _ => {
            let mut start = cut;
            while !content.is_char_boundary(start) {
                start += 1;
            }
            start
        }
    };

    content.drain(..start);
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_limit_untouched() {
        let mut content = String::from("short\n");
        assert_eq!(truncate_to_line_boundary(&mut content, 100), 0);
        assert_eq!(content, "short\n");
    }

    #[test]
    fn test_exact_limit_untouched() {
        let mut content = String::from("0123456789");
        assert_eq!(truncate_to_line_boundary(&mut content, 10), 0);
        assert_eq!(content, "0123456789");
    }

    #[test]
    fn test_aligns_to_newline() {
        let mut content = String::from("1234567890\nABCDEFGHIJ");
        let dropped = truncate_to_line_boundary(&mut content, 20);
        assert_eq!(content, "ABCDEFGHIJ");
        assert_eq!(dropped, 11);
    }

    #[test]
    fn test_no_newline_keeps_window() {
        let mut content = String::from("abcdefghijklmnopqrstuvwxyz");
        truncate_to_line_boundary(&mut content, 5);
        assert_eq!(content, "vwxyz");
    }

    #[test]
    fn test_newline_at_window_start_keeps_window() {
        // Window is "\nline2", newline at offset 0.
        let mut content = String::from("line1\nline2");
        truncate_to_line_boundary(&mut content, 6);
        assert_eq!(content, "\nline2");
    }

    #[test]
    fn test_only_first_newline_is_used() {
        let mut content = String::from("xxxxa\nb\nc\n");
        truncate_to_line_boundary(&mut content, 8);
        // Window "xxa\nb\nc\n" -> drop through the first newline.
        assert_eq!(content, "b\nc\n");
    }

    #[test]
    fn test_trailing_newline_only() {
        // Window "cdef\n": first newline is the last byte, everything goes.
        let mut content = String::from("abcdef\n");
        truncate_to_line_boundary(&mut content, 5);
        assert_eq!(content, "");
    }

    #[test]
    fn test_cut_inside_multibyte_char() {
        // "é" is two bytes; a 3-byte window starting mid-char moves forward.
        let mut content = String::from("aéé");
        truncate_to_line_boundary(&mut content, 3);
        assert_eq!(content, "é");
        assert!(content.len() <= 3);
    }

    #[test]
    fn test_newline_after_split_char_still_aligns() {
        // Window starts on the second byte of "é"; the newline is at offset 1.
        let mut content = String::from("é\nabc");
        let dropped = truncate_to_line_boundary(&mut content, 5);
        assert_eq!(content, "abc");
        assert_eq!(dropped, 3);
    }

    #[test]
    fn test_result_never_exceeds_limit() {
        let mut content = "日本語のログ\n".repeat(50);
        for max in [1, 2, 3, 7, 17, 64, 100] {
            let mut c = content.clone();
            truncate_to_line_boundary(&mut c, max);
            assert!(c.len() <= max, "max={max} len={}", c.len());
        }
        truncate_to_line_boundary(&mut content, 0);
        assert!(content.is_empty());
    }
}
