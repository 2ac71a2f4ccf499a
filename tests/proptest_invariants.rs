//! Property tests for the pure text transformations.

use logsink::{strip_ansi, truncate_to_line_boundary};
use proptest::prelude::*;

/// Text mixing plain characters, newlines, and CSI fragments.
fn noisy_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        "[a-zA-Z0-9 ]{0,8}",
        Just("\n".to_string()),
        Just("\x1B[".to_string()),
        Just("\x1B".to_string()),
        "[0-9;]{0,4}[mKHJ]",
        "\x1B\\[[0-9;]{0,6}[a-zA-Z]",
        "[é日ß]{0,3}",
    ];
    proptest::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn strip_is_idempotent(text in noisy_text()) {
        let once = strip_ansi(&text).into_owned();
        let twice = strip_ansi(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn strip_leaves_plain_text_identical(text in "[^\x1B]{0,64}") {
        prop_assert_eq!(strip_ansi(&text), text.as_str());
    }

    #[test]
    fn strip_never_leaves_a_csi_sequence(text in noisy_text()) {
        let stripped = strip_ansi(&text);
        let csi = regex::Regex::new(r"\x1B\[[0-9;]*[a-zA-Z]").unwrap();
        prop_assert!(!csi.is_match(&stripped));
    }

    #[test]
    fn truncation_respects_bound(text in noisy_text(), max in 1usize..64) {
        let mut content = text.clone();
        truncate_to_line_boundary(&mut content, max);
        prop_assert!(content.len() <= max);
        prop_assert!(text.ends_with(&content));
    }

    #[test]
    fn truncation_aligns_to_first_newline(
        text in "[a-zé日ß\n]{0,60}",
        max in 1usize..64,
    ) {
        let mut content = text.clone();
        truncate_to_line_boundary(&mut content, max);

        if text.len() <= max {
            prop_assert_eq!(content, text);
        } else {
            let cut = text.len() - max;
            let window = &text.as_bytes()[cut..];
            let start = match window.iter().position(|&b| b == b'\n') {
                Some(i) if i > 0 => cut + i + 1,
                _ => (cut..=text.len()).find(|&i| text.is_char_boundary(i)).unwrap(),
            };
            prop_assert_eq!(content.as_str(), &text[start..]);
        }
    }

    #[test]
    fn commits_never_exceed_bound(
        batches in proptest::collection::vec("[a-z\n]{0,40}", 1..20),
        max in 1usize..100,
    ) {
        let mut committed = String::new();
        for batch in &batches {
            committed.push_str(batch);
            truncate_to_line_boundary(&mut committed, max);
            prop_assert!(committed.len() <= max);
        }
    }
}
