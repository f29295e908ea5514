//! Greedy line breaking.
//!
//! Lines break after whitespace. Spaces hang past the right edge instead
//! of forcing a break, a word wider than the line is split between
//! characters, and every line takes at least one character.

use super::metrics::ActiveFont;

/// One line of wrapped text, in logical order.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Width in user units, trailing whitespace excluded.
    pub width: f32,
    /// The line ended at an explicit newline (not included in `text`).
    pub hard_break: bool,
}

impl Line {
    /// Number of breaking spaces between the first and last visible
    /// characters, used for justification.
    pub fn inner_spaces(&self) -> usize {
        self.text
            .trim_end_matches(is_breaking_space)
            .trim_start_matches(is_breaking_space)
            .chars()
            .filter(|&c| c == ' ')
            .count()
    }
}

/// Whitespace that offers a break opportunity. No-break spaces do not.
pub fn is_breaking_space(c: char) -> bool {
    c != '\n' && c != '\u{00A0}' && c != '\u{2007}' && c != '\u{202F}' && c.is_whitespace()
}

struct Pending {
    text: String,
    /// Advance of every character in `text`.
    advances: Vec<f32>,
    /// Width including trailing whitespace.
    width: f32,
    trailing: f32,
    /// Byte offset and character count just after the last breaking
    /// space, with the width and trailing width at that point.
    last_break: Option<(usize, usize, f32, f32)>,
}

impl Pending {
    fn new() -> Self {
        Self {
            text: String::new(),
            advances: Vec::new(),
            width: 0.0,
            trailing: 0.0,
            last_break: None,
        }
    }

    fn push(&mut self, c: char, advance: f32) {
        self.text.push(c);
        self.advances.push(advance);
        self.width += advance;
    }

    fn take(&mut self, hard_break: bool) -> Line {
        let line = Line {
            text: std::mem::take(&mut self.text),
            width: (self.width - self.trailing).max(0.0),
            hard_break,
        };
        *self = Self::new();
        line
    }

    /// Emits everything up to the last break opportunity and keeps the
    /// partial word that follows it.
    fn split_at_break(&mut self) -> Option<Line> {
        let (offset, count, width, trailing) = self.last_break.take()?;
        let rest = self.text.split_off(offset);
        let line = Line {
            text: std::mem::replace(&mut self.text, rest),
            width: (width - trailing).max(0.0),
            hard_break: false,
        };
        self.advances.drain(..count);
        self.width = self.advances.iter().sum();
        self.trailing = 0.0;
        Some(line)
    }
}

/// Wraps `text` with the first line limited to `first_width` and the
/// following ones to `max_width`.
pub fn wrap(text: &str, font: &ActiveFont, first_width: f32, max_width: f32) -> Vec<Line> {
    let advances: Vec<f32> = text.chars().map(|c| font.char_width(c as u32)).collect();
    wrap_advances(text, &advances, first_width, max_width)
}

/// [`wrap`] with the advance of every character supplied by the caller,
/// for text whose drawn glyphs differ from its characters. `advances`
/// holds one entry per `char` of `text`; missing entries count as zero.
pub fn wrap_advances(text: &str, advances: &[f32], first_width: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut pending = Pending::new();

    for (i, c) in text.chars().enumerate() {
        if c == '\n' {
            lines.push(pending.take(true));
            continue;
        }

        let advance = advances.get(i).copied().unwrap_or(0.0);
        if is_breaking_space(c) {
            pending.push(c, advance);
            pending.trailing += advance;
            pending.last_break = Some((
                pending.text.len(),
                pending.advances.len(),
                pending.width,
                pending.trailing,
            ));
            continue;
        }

        let limit = if lines.is_empty() { first_width } else { max_width };
        if !pending.text.is_empty() && pending.width + advance > limit {
            match pending.split_at_break() {
                Some(line) => {
                    lines.push(line);
                    if !pending.text.is_empty() && pending.width + advance > max_width {
                        lines.push(pending.take(false));
                    }
                }
                None => lines.push(pending.take(false)),
            }
        }

        pending.push(c, advance);
        pending.trailing = 0.0;
    }

    if !pending.text.is_empty() {
        lines.push(pending.take(false));
    }

    log::trace!(
        "Wrapped {} chars into {} lines (first {:.2}, max {:.2})",
        text.len(),
        lines.len(),
        first_width,
        max_width
    );
    lines
}

/// Wraps `text` to `max_width` on every line.
pub fn break_lines(text: &str, font: &ActiveFont, max_width: f32) -> Vec<Line> {
    wrap(text, font, max_width, max_width)
}

/// Number of lines `text` takes at `max_width`; never less than one.
pub fn count_lines(text: &str, font: &ActiveFont, max_width: f32) -> usize {
    break_lines(text, font, max_width).len().max(1)
}
