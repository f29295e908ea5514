//! Level resolution and visual reordering.
//!
//! A practical subset of UAX #9: explicit embeddings and overrides, weak
//! and neutral type resolution per level run, implicit levels, trailing
//! whitespace reset and run reversal. Isolates are treated as neutrals.

use crate::ParagraphDirection;
use crate::class::BidiClass;

/// Deepest explicit embedding level.
pub const MAX_DEPTH: u8 = 61;

/// Resolves the paragraph embedding level.
pub fn paragraph_level(classes: &[BidiClass], direction: ParagraphDirection) -> u8 {
    match direction {
        ParagraphDirection::ForceLeftToRight => 0,
        ParagraphDirection::ForceRightToLeft => 1,
        ParagraphDirection::Auto => classes
            .iter()
            .find_map(|class| match class {
                BidiClass::L => Some(0),
                BidiClass::R | BidiClass::AL => Some(1),
                _ => None,
            })
            .unwrap_or(0),
    }
}

/// Resolves the embedding level of every character.
///
/// `classes` are the original classes in logical order. Removed characters
/// (boundary neutrals and explicit controls) take the level of the character
/// before them, or of the first one after them at the start of the text.
pub fn resolve_levels(classes: &[BidiClass], base: u8) -> Vec<u8> {
    if classes.is_empty() {
        return Vec::new();
    }

    let mut types = classes.to_vec();
    let mut levels = explicit_levels(&mut types, base);

    let kept: Vec<usize> = (0..classes.len())
        .filter(|&i| !classes[i].is_removed())
        .collect();

    let mut start = 0;
    while start < kept.len() {
        let level = levels[kept[start]];
        let mut end = start;
        while end < kept.len() && levels[kept[end]] == level {
            end += 1;
        }

        let before = if start == 0 { base } else { levels[kept[start - 1]] };
        let after = if end == kept.len() { base } else { levels[kept[end]] };
        let sos = direction_of(level.max(before));
        let eos = direction_of(level.max(after));

        let run = &kept[start..end];
        let mut run_types: Vec<BidiClass> = run.iter().map(|&i| types[i]).collect();
        resolve_weak(&mut run_types, sos);
        resolve_neutral(&mut run_types, sos, eos, level);
        for (&i, class) in run.iter().zip(run_types) {
            levels[i] = implicit_level(level, class);
        }

        start = end;
    }

    inherit_removed_levels(classes, &mut levels, base);
    reset_whitespace(classes, &mut levels, base);
    levels
}

fn direction_of(level: u8) -> BidiClass {
    if level % 2 == 1 {
        BidiClass::R
    } else {
        BidiClass::L
    }
}

/// X1-X9: embedding and override controls.
fn explicit_levels(types: &mut [BidiClass], base: u8) -> Vec<u8> {
    let mut levels = vec![base; types.len()];
    let mut stack: Vec<(u8, Option<BidiClass>)> = Vec::with_capacity(MAX_DEPTH as usize);
    let mut level = base;
    let mut override_class: Option<BidiClass> = None;
    let mut overflow = 0usize;

    for (i, class) in types.iter_mut().enumerate() {
        match *class {
            BidiClass::RLE | BidiClass::RLO | BidiClass::LRE | BidiClass::LRO => {
                let next = if matches!(*class, BidiClass::RLE | BidiClass::RLO) {
                    (level + 1) | 1
                } else {
                    (level + 2) & !1
                };
                if next <= MAX_DEPTH && overflow == 0 {
                    stack.push((level, override_class));
                    level = next;
                    override_class = match *class {
                        BidiClass::RLO => Some(BidiClass::R),
                        BidiClass::LRO => Some(BidiClass::L),
                        _ => None,
                    };
                } else {
                    overflow += 1;
                }
                levels[i] = level;
            }
            BidiClass::PDF => {
                if overflow > 0 {
                    overflow -= 1;
                } else if let Some((previous, previous_override)) = stack.pop() {
                    level = previous;
                    override_class = previous_override;
                }
                levels[i] = level;
            }
            BidiClass::B => {
                stack.clear();
                level = base;
                override_class = None;
                overflow = 0;
                levels[i] = base;
            }
            BidiClass::BN => levels[i] = level,
            _ => {
                levels[i] = level;
                if let Some(forced) = override_class {
                    *class = forced;
                }
            }
        }
    }

    levels
}

/// W1-W7 over one level run.
fn resolve_weak(types: &mut [BidiClass], sos: BidiClass) {
    // W1: marks take the type of what they follow
    let mut previous = sos;
    for class in types.iter_mut() {
        if *class == BidiClass::NSM {
            *class = previous;
        }
        previous = *class;
    }

    // W2: European digits after an Arabic letter are Arabic digits
    let mut last_strong = sos;
    for class in types.iter_mut() {
        match *class {
            BidiClass::L | BidiClass::R | BidiClass::AL => last_strong = *class,
            BidiClass::EN if last_strong == BidiClass::AL => *class = BidiClass::AN,
            _ => {}
        }
    }

    // W3
    for class in types.iter_mut() {
        if *class == BidiClass::AL {
            *class = BidiClass::R;
        }
    }

    // W4: a single separator between two numbers of the same kind
    for i in 1..types.len().saturating_sub(1) {
        let (before, after) = (types[i - 1], types[i + 1]);
        match types[i] {
            BidiClass::ES if before == BidiClass::EN && after == BidiClass::EN => {
                types[i] = BidiClass::EN;
            }
            BidiClass::CS
                if before == after && matches!(before, BidiClass::EN | BidiClass::AN) =>
            {
                types[i] = before;
            }
            _ => {}
        }
    }

    // W5: terminators next to European digits
    let mut i = 0;
    while i < types.len() {
        if types[i] != BidiClass::ET {
            i += 1;
            continue;
        }
        let start = i;
        while i < types.len() && types[i] == BidiClass::ET {
            i += 1;
        }
        let touches_number = (start > 0 && types[start - 1] == BidiClass::EN)
            || (i < types.len() && types[i] == BidiClass::EN);
        if touches_number {
            types[start..i].fill(BidiClass::EN);
        }
    }

    // W6
    for class in types.iter_mut() {
        if matches!(*class, BidiClass::ES | BidiClass::ET | BidiClass::CS) {
            *class = BidiClass::ON;
        }
    }

    // W7: European digits in a left-to-right context are left-to-right
    let mut last_strong = sos;
    for class in types.iter_mut() {
        match *class {
            BidiClass::L | BidiClass::R => last_strong = *class,
            BidiClass::EN if last_strong == BidiClass::L => *class = BidiClass::L,
            _ => {}
        }
    }
}

/// Strong direction a resolved type counts as for neutral resolution.
fn strong_direction(class: BidiClass) -> BidiClass {
    match class {
        BidiClass::L => BidiClass::L,
        _ => BidiClass::R,
    }
}

/// N1-N2 over one level run.
fn resolve_neutral(types: &mut [BidiClass], sos: BidiClass, eos: BidiClass, level: u8) {
    let embedding = direction_of(level);
    let mut i = 0;
    while i < types.len() {
        if !types[i].is_neutral() {
            i += 1;
            continue;
        }
        let start = i;
        while i < types.len() && types[i].is_neutral() {
            i += 1;
        }
        let leading = if start == 0 { sos } else { strong_direction(types[start - 1]) };
        let trailing = if i == types.len() { eos } else { strong_direction(types[i]) };
        let resolved = if leading == trailing { leading } else { embedding };
        types[start..i].fill(resolved);
    }
}

/// I1-I2.
fn implicit_level(level: u8, class: BidiClass) -> u8 {
    match (level % 2 == 0, class) {
        (true, BidiClass::R) => level + 1,
        (true, BidiClass::AN | BidiClass::EN) => level + 2,
        (false, BidiClass::L | BidiClass::EN | BidiClass::AN) => level + 1,
        _ => level,
    }
}

fn inherit_removed_levels(classes: &[BidiClass], levels: &mut [u8], base: u8) {
    let first_kept = classes
        .iter()
        .position(|class| !class.is_removed())
        .map_or(base, |i| levels[i]);

    let mut previous: Option<u8> = None;
    for (class, level) in classes.iter().zip(levels.iter_mut()) {
        if class.is_removed() {
            *level = previous.unwrap_or(first_kept);
        } else {
            previous = Some(*level);
        }
    }
}

/// L1: separators, and whitespace before them or at the end of the line,
/// go back to the paragraph level.
fn reset_whitespace(classes: &[BidiClass], levels: &mut [u8], base: u8) {
    let mut trailing = true;
    for (class, level) in classes.iter().zip(levels.iter_mut()).rev() {
        match class {
            BidiClass::S | BidiClass::B => {
                *level = base;
                trailing = true;
            }
            BidiClass::WS => {
                if trailing {
                    *level = base;
                }
            }
            class if class.is_removed() => {
                if trailing {
                    *level = base;
                }
            }
            _ => trailing = false,
        }
    }
}

/// L2: reverses every maximal run at or above each level, from the highest
/// level down to the lowest odd one. `items` and `levels` move together.
pub fn reorder_visual<T>(items: &mut [T], levels: &mut [u8]) {
    debug_assert_eq!(items.len(), levels.len());
    let (Some(&highest), Some(&lowest)) = (levels.iter().max(), levels.iter().min()) else {
        return;
    };
    let lowest_odd = lowest | 1;

    for level in (lowest_odd..=highest).rev() {
        let mut i = 0;
        while i < levels.len() {
            if levels[i] < level {
                i += 1;
                continue;
            }
            let start = i;
            while i < levels.len() && levels[i] >= level {
                i += 1;
            }
            items[start..i].reverse();
            levels[start..i].reverse();
        }
    }
}

/// L4: the mirrored counterpart of a paired punctuation mark.
pub fn mirror(code: u32) -> Option<u32> {
    let mirrored = match code {
        0x0028 => 0x0029,
        0x0029 => 0x0028,
        0x003C => 0x003E,
        0x003E => 0x003C,
        0x005B => 0x005D,
        0x005D => 0x005B,
        0x007B => 0x007D,
        0x007D => 0x007B,
        0x00AB => 0x00BB,
        0x00BB => 0x00AB,
        0x2039 => 0x203A,
        0x203A => 0x2039,
        0x2045 => 0x2046,
        0x2046 => 0x2045,
        0x2264 => 0x2265,
        0x2265 => 0x2264,
        0x2308 => 0x2309,
        0x2309 => 0x2308,
        0x230A => 0x230B,
        0x230B => 0x230A,
        0x3008 => 0x3009,
        0x3009 => 0x3008,
        0x300A => 0x300B,
        0x300B => 0x300A,
        _ => return None,
    };
    Some(mirrored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(text: &str) -> Vec<BidiClass> {
        text.chars().map(|c| BidiClass::of(c as u32)).collect()
    }

    #[test]
    fn test_paragraph_level() {
        let latin_first = classes("abc \u{05D0}");
        let hebrew_first = classes("1 \u{05D0} abc");
        assert_eq!(paragraph_level(&latin_first, ParagraphDirection::Auto), 0);
        assert_eq!(paragraph_level(&hebrew_first, ParagraphDirection::Auto), 1);
        assert_eq!(paragraph_level(&classes("123"), ParagraphDirection::Auto), 0);
        assert_eq!(
            paragraph_level(&latin_first, ParagraphDirection::ForceRightToLeft),
            1
        );
    }

    #[test]
    fn test_levels_of_mixed_text() {
        // a b space alef bet
        let levels = resolve_levels(&classes("ab \u{05D0}\u{05D1}"), 0);
        assert_eq!(levels, vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_digits_after_arabic_letter_stay_left_to_right() {
        // alef space 1 2
        let levels = resolve_levels(&classes("\u{0627} 12"), 1);
        assert_eq!(levels, vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_separator_between_digits_joins_number() {
        let levels = resolve_levels(&classes("\u{05D0} 1,5"), 1);
        assert_eq!(levels, vec![1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_trailing_whitespace_resets_to_paragraph_level() {
        let levels = resolve_levels(&classes("abc  "), 1);
        assert_eq!(levels, vec![2, 2, 2, 1, 1]);
    }

    #[test]
    fn test_embedding_raises_levels() {
        // RLE a b PDF c
        let levels = resolve_levels(&classes("\u{202B}ab\u{202C}c"), 0);
        assert_eq!(levels, vec![2, 2, 2, 2, 0]);
    }

    #[test]
    fn test_override_forces_direction() {
        // RLO a b PDF
        let levels = resolve_levels(&classes("\u{202E}ab\u{202C}"), 0);
        assert_eq!(&levels[1..3], &[1, 1]);
    }

    #[test]
    fn test_embedding_depth_is_capped() {
        let mut text = String::new();
        for _ in 0..100 {
            text.push('\u{202A}');
        }
        text.push('a');
        let levels = resolve_levels(&classes(&text), 0);
        assert!(levels.iter().all(|&l| l <= MAX_DEPTH + 1));
    }

    #[test]
    fn test_reorder_visual() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        let mut levels = vec![0, 1, 1, 0];
        reorder_visual(&mut items, &mut levels);
        assert_eq!(items, vec!['a', 'c', 'b', 'd']);

        let mut items = vec!['1', '2', 'x'];
        let mut levels = vec![2, 2, 1];
        reorder_visual(&mut items, &mut levels);
        assert_eq!(items, vec!['x', '1', '2']);
    }

    #[test]
    fn test_mirror() {
        assert_eq!(mirror('(' as u32), Some(')' as u32));
        assert_eq!(mirror(0x00BB), Some(0x00AB));
        assert_eq!(mirror('a' as u32), None);
    }
}
