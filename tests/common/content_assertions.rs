use super::PageOps;
use itertools::Itertools;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.02,
        "expected {expected}, got {actual}"
    );
}

/// Every text position lies within `[left, right]` horizontally.
pub fn assert_text_within(ops: &PageOps, left: f32, right: f32) {
    for (x, _) in ops.text_positions() {
        assert!(
            x >= left - 0.02 && x <= right + 0.02,
            "text at x={x} outside {left}..{right}"
        );
    }
}

/// Successive lines never move up the page.
pub fn assert_lines_descend(ops: &PageOps) {
    for ((_, upper), (_, lower)) in ops.text_positions().into_iter().tuple_windows() {
        assert!(lower <= upper + 0.02, "line at y={lower} above y={upper}");
    }
}
