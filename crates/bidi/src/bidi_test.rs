use super::*;

const ALL_DIRECTIONS: [ParagraphDirection; 3] = [
    ParagraphDirection::Auto,
    ParagraphDirection::ForceLeftToRight,
    ParagraphDirection::ForceRightToLeft,
];

fn codes(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

#[test]
fn test_right_joining_word_reorders_isolated_forms() {
    let dal_waw_reh = [0x062F, 0x0648, 0x0631];
    assert_eq!(
        reorder(&dal_waw_reh, ParagraphDirection::Auto),
        vec![0xFEAD, 0xFEED, 0xFEA9]
    );
}

#[test]
fn test_persian_word_with_zwnj_in_every_direction() {
    let word = [0x06CC, 0x06A9, 0x200C, 0x0634, 0x0646, 0x0628, 0x0647];
    let expected = vec![0xFEEA, 0xFE92, 0xFEE8, 0xFEB7, 0x200C, 0xFB8F, 0xFBFE];
    for direction in ALL_DIRECTIONS {
        assert_eq!(reorder(&word, direction), expected, "{direction:?}");
    }
}

#[test]
fn test_trailing_spaces_move_to_the_left_in_rtl() {
    assert_eq!(
        reorder_str("abc  ", ParagraphDirection::ForceRightToLeft),
        "  abc"
    );
    assert_eq!(reorder_str("abc  ", ParagraphDirection::ForceLeftToRight), "abc  ");
    assert_eq!(reorder_str("abc  ", ParagraphDirection::Auto), "abc  ");
}

#[test]
fn test_ascii_text_is_unchanged_in_every_direction() {
    let samples = [
        "hello world",
        "snake_case_name and more",
        "ratio: 3:4 done",
        "Chapter 12 section 4b",
        "a",
    ];
    for sample in samples {
        for direction in ALL_DIRECTIONS {
            assert_eq!(reorder_str(sample, direction), sample, "{direction:?}");
        }
    }
}

#[test]
fn test_hebrew_run_inside_latin_paragraph() {
    let text = "abc \u{05D0}\u{05D1}\u{05D2} def";
    assert_eq!(
        reorder_str(text, ParagraphDirection::Auto),
        "abc \u{05D2}\u{05D1}\u{05D0} def"
    );
}

#[test]
fn test_numbers_keep_their_order_in_rtl() {
    assert_eq!(
        reorder_str("\u{05D0} 123", ParagraphDirection::ForceRightToLeft),
        "123 \u{05D0}"
    );
}

#[test]
fn test_arabic_run_inside_latin_paragraph_is_shaped() {
    let visual = reorder(&codes("x \u{0628}\u{0628} y"), ParagraphDirection::Auto);
    assert_eq!(
        visual,
        vec!['x' as u32, ' ' as u32, 0xFE90, 0xFE91, ' ' as u32, 'y' as u32]
    );
}

#[test]
fn test_brackets_are_mirrored_in_rtl_runs() {
    let visual = reorder_str(
        "\u{05D0}(\u{05D1})",
        ParagraphDirection::ForceRightToLeft,
    );
    assert_eq!(visual, "(\u{05D1})\u{05D0}");
}

#[test]
fn test_explicit_controls_are_removed() {
    let visual = reorder(&codes("a\u{202B}b\u{202C}c"), ParagraphDirection::Auto);
    assert_eq!(visual.len(), 3);
    assert!(!visual.contains(&0x202B));
    assert!(!visual.contains(&0x202C));
}

#[test]
fn test_invalid_scalars_pass_through() {
    let input = [0x41, 0xD800, 0x42];
    assert_eq!(reorder(&input, ParagraphDirection::ForceLeftToRight), input.to_vec());
}

#[test]
fn test_empty_input() {
    assert!(reorder(&[], ParagraphDirection::ForceRightToLeft).is_empty());
    assert!(reorder_glyphs(&[], ParagraphDirection::Auto).is_empty());
}

#[test]
fn test_visual_run_falls_back_to_original_code_points() {
    let run = reorder_glyphs(&[0x062F, 0x0648, 0x0631], ParagraphDirection::Auto);
    assert!(run.is_rtl());
    assert_eq!(run.levels, vec![1, 1, 1]);
    assert_eq!(run.resolve(|_| true), vec![0xFEAD, 0xFEED, 0xFEA9]);
    assert_eq!(run.resolve(|_| false), vec![0x0631, 0x0648, 0x062F]);
    assert_eq!(
        run.resolve(|cp| cp != 0xFEED),
        vec![0xFEAD, 0x0648, 0xFEA9]
    );
}

#[test]
fn test_has_rtl() {
    assert!(!has_rtl("plain ascii 123"));
    assert!(has_rtl("mixed \u{05D0}"));
    assert!(has_rtl("\u{0633}\u{0644}\u{0627}\u{0645}"));
    assert!(has_rtl("\u{0661}"));
}
