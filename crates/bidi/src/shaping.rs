//! Arabic and Persian joining-form selection.
//!
//! Each joining letter maps to one of its presentation forms (isolated,
//! final, initial, medial) depending on whether it connects to the letters
//! around it. The substitution is always one code point for one code point.

use crate::ShapedGlyph;

pub const ZWNJ: u32 = 0x200C;
pub const ZWJ: u32 = 0x200D;

/// How a letter connects to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoiningType {
    /// Connects on both sides
    Dual,
    /// Connects to the previous letter only
    Right,
    /// Never connects (hamza)
    NonJoining,
}

/// Positional form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionalForm {
    Isolated,
    Initial,
    Medial,
    Final,
}

/// Presentation forms of one letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub joining: JoiningType,
    pub isolated: u32,
    pub final_form: Option<u32>,
    pub initial: Option<u32>,
    pub medial: Option<u32>,
}

impl Letter {
    /// Letters whose forms are laid out as isolated, final, initial, medial.
    const fn dual(isolated: u32) -> Self {
        Self {
            joining: JoiningType::Dual,
            isolated,
            final_form: Some(isolated + 1),
            initial: Some(isolated + 2),
            medial: Some(isolated + 3),
        }
    }

    const fn right(isolated: u32) -> Self {
        Self {
            joining: JoiningType::Right,
            isolated,
            final_form: Some(isolated + 1),
            initial: None,
            medial: None,
        }
    }

    const fn non_joining(isolated: u32) -> Self {
        Self {
            joining: JoiningType::NonJoining,
            isolated,
            final_form: None,
            initial: None,
            medial: None,
        }
    }

    const fn tatweel() -> Self {
        Self {
            joining: JoiningType::Dual,
            isolated: 0x0640,
            final_form: Some(0x0640),
            initial: Some(0x0640),
            medial: Some(0x0640),
        }
    }

    pub fn joins(&self) -> bool {
        self.joining != JoiningType::NonJoining
    }

    pub fn form(&self, form: PositionalForm) -> Option<u32> {
        match form {
            PositionalForm::Isolated => Some(self.isolated),
            PositionalForm::Final => self.final_form,
            PositionalForm::Initial => self.initial,
            PositionalForm::Medial => self.medial,
        }
    }
}

/// Looks up the presentation forms of a joining letter.
pub fn letter(code: u32) -> Option<Letter> {
    let letter = match code {
        0x0621 => Letter::non_joining(0xFE80),
        0x0622 => Letter::right(0xFE81),
        0x0623 => Letter::right(0xFE83),
        0x0624 => Letter::right(0xFE85),
        0x0625 => Letter::right(0xFE87),
        0x0626 => Letter::dual(0xFE89),
        0x0627 => Letter::right(0xFE8D),
        0x0628 => Letter::dual(0xFE8F),
        0x0629 => Letter::right(0xFE93),
        0x062A => Letter::dual(0xFE95),
        0x062B => Letter::dual(0xFE99),
        0x062C => Letter::dual(0xFE9D),
        0x062D => Letter::dual(0xFEA1),
        0x062E => Letter::dual(0xFEA5),
        0x062F => Letter::right(0xFEA9),
        0x0630 => Letter::right(0xFEAB),
        0x0631 => Letter::right(0xFEAD),
        0x0632 => Letter::right(0xFEAF),
        0x0633 => Letter::dual(0xFEB1),
        0x0634 => Letter::dual(0xFEB5),
        0x0635 => Letter::dual(0xFEB9),
        0x0636 => Letter::dual(0xFEBD),
        0x0637 => Letter::dual(0xFEC1),
        0x0638 => Letter::dual(0xFEC5),
        0x0639 => Letter::dual(0xFEC9),
        0x063A => Letter::dual(0xFECD),
        0x0640 => Letter::tatweel(),
        0x0641 => Letter::dual(0xFED1),
        0x0642 => Letter::dual(0xFED5),
        0x0643 => Letter::dual(0xFED9),
        0x0644 => Letter::dual(0xFEDD),
        0x0645 => Letter::dual(0xFEE1),
        0x0646 => Letter::dual(0xFEE5),
        0x0647 => Letter::dual(0xFEE9),
        0x0648 => Letter::right(0xFEED),
        0x0649 => Letter::right(0xFEEF),
        0x064A => Letter::dual(0xFEF1),

        // Persian and Urdu
        0x0671 => Letter::right(0xFB50),
        0x0679 => Letter::dual(0xFB66),
        0x067E => Letter::dual(0xFB56),
        0x0686 => Letter::dual(0xFB7A),
        0x0688 => Letter::right(0xFB88),
        0x0691 => Letter::right(0xFB8C),
        0x0698 => Letter::right(0xFB8A),
        0x06A4 => Letter::dual(0xFB6A),
        0x06A9 => Letter::dual(0xFB8E),
        0x06AF => Letter::dual(0xFB92),
        0x06BA => Letter::right(0xFB9E),
        0x06BE => Letter::dual(0xFBAA),
        0x06C1 => Letter::dual(0xFBA6),
        0x06CC => Letter::dual(0xFBFC),
        0x06D2 => Letter::right(0xFBAE),
        _ => return None,
    };
    Some(letter)
}

/// Combining marks that are skipped when looking for neighbours.
pub fn is_transparent(code: u32) -> bool {
    matches!(
        code,
        0x0610..=0x061A
            | 0x064B..=0x065F
            | 0x0670
            | 0x06D6..=0x06DC
            | 0x06DF..=0x06E4
            | 0x06E7
            | 0x06E8
            | 0x06EA..=0x06ED
    )
}

/// Whether a letter following `previous` connects to it.
fn connects_from(previous: Option<u32>) -> bool {
    previous.is_some_and(|p| {
        p == ZWJ || letter(p).is_some_and(|l| l.joining == JoiningType::Dual)
    })
}

/// Whether a letter preceding `next` connects to it.
fn connects_to(next: Option<u32>) -> bool {
    next.is_some_and(|n| n == ZWJ || letter(n).is_some_and(|l| l.joins()))
}

/// Selects the presentation form of `code` given its non-transparent
/// neighbours in logical order.
pub fn shape(code: u32, previous: Option<u32>, next: Option<u32>) -> ShapedGlyph {
    let Some(letter) = letter(code) else {
        return ShapedGlyph::unshaped(code);
    };

    let prev_joins = connects_from(previous);
    let next_joins = connects_to(next);
    let form = match (letter.joining, prev_joins, next_joins) {
        (JoiningType::Dual, true, true) => PositionalForm::Medial,
        (JoiningType::Dual, false, true) => PositionalForm::Initial,
        (JoiningType::Dual, true, false) | (JoiningType::Right, true, _) => PositionalForm::Final,
        _ => PositionalForm::Isolated,
    };

    ShapedGlyph {
        code: letter.form(form).unwrap_or(code),
        original: code,
    }
}

/// Shapes a whole logical-order run.
pub fn shape_run(codes: &[u32]) -> Vec<ShapedGlyph> {
    codes
        .iter()
        .enumerate()
        .map(|(i, &code)| {
            if is_transparent(code) {
                return ShapedGlyph::unshaped(code);
            }
            let previous = codes[..i].iter().rev().copied().find(|&c| !is_transparent(c));
            let next = codes[i + 1..].iter().copied().find(|&c| !is_transparent(c));
            shape(code, previous, next)
        })
        .collect()
}
