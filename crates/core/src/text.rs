//! Flowing text, single-line cells and multi-line cells.

use crate::document::{Document, EPSILON};
use crate::error::Result;
use folio_layout::{Line, is_breaking_space, measure_codes, wrap_advances};
use folio_style::{CellBorder, TextAlign};

/// Where the cursor goes after a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellAdvance {
    /// To the far edge of the cell, on the same line.
    #[default]
    Right,
    /// To the start of the next line.
    NextLine,
    /// Below the cell, keeping x.
    Below,
}

/// A cell box as drawn, with alignment already mirrored for RTL.
#[derive(Debug, Clone, Copy)]
struct CellBox {
    width: f32,
    height: f32,
    border: CellBorder,
    align: TextAlign,
    fill: bool,
    rtl: bool,
    /// Stretch inner spaces so the text fills the width.
    justify: bool,
}

impl Document {
    /// Writes flowing text from the cursor. Lines are `h` high (the default
    /// line height when `h <= 0`) and wrap at the margins. The cursor ends
    /// after the last character written.
    pub fn write(&mut self, h: f32, text: &str, align: TextAlign) -> Result<()> {
        self.page_index()?;
        let rtl = self.take_direction();
        if text.is_empty() {
            return Ok(());
        }
        let h = self.height_or_default(h);
        self.break_page_if_needed(h);

        let left_edge = self.state.margins.left;
        let right_edge = self.page_width - self.state.margins.right;
        let full = self.content_width();
        let line_start = self.line_start(rtl);
        let mut remaining = self.remaining_width(rtl);
        let advances = self.glyph_advances(text, rtl);

        // A first word that fits on a fresh line is not split, and a line
        // that has no room for the first character starts afresh.
        let word_width: f32 = text
            .chars()
            .zip(&advances)
            .take_while(|(c, _)| *c != '\n' && !is_breaking_space(*c))
            .map(|(_, w)| w)
            .sum();
        let first_advance = match text.chars().next() {
            Some(c) if c != '\n' && !is_breaking_space(c) => {
                advances.first().copied().unwrap_or(0.0)
            }
            _ => 0.0,
        };
        let at_start = (self.state.cursor.x - line_start).abs() < EPSILON;
        let word_overflows = word_width > remaining && word_width <= full;
        if !at_start && (word_overflows || first_advance > remaining) {
            self.next_text_line(h, line_start);
            remaining = full;
        }

        let lines = wrap_advances(text, &advances, remaining, full);
        let align = if rtl { align.mirrored() } else { align };
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.next_text_line(h, line_start);
            }
            self.write_line(line, h, rtl, align, left_edge, right_edge)?;
            if i == last && line.hard_break {
                self.next_text_line(h, line_start);
            }
        }
        Ok(())
    }

    fn next_text_line(&mut self, h: f32, line_start: f32) {
        self.state.cursor.x = line_start;
        self.state.cursor.y += h;
        self.state.cursor.last_height = h;
        self.break_page_if_needed(h);
    }

    fn write_line(
        &mut self,
        line: &Line,
        h: f32,
        rtl: bool,
        align: TextAlign,
        left_edge: f32,
        right_edge: f32,
    ) -> Result<()> {
        self.state.cursor.last_height = h;
        if line.text.is_empty() {
            return Ok(());
        }
        let font = self.active_font();
        let line_start = self.line_start(rtl);
        let at_start = (self.state.cursor.x - line_start).abs() < EPSILON;
        let natural = !at_start
            || match align {
                TextAlign::Justify => true,
                TextAlign::Left => !rtl,
                TextAlign::Right => rtl,
                TextAlign::Center => false,
            };
        let baseline = self.state.cursor.y + h / 2.0 + (font.ascent() + font.descent()) / 2.0;

        if natural {
            let codes = self.visual_codes(&line.text, rtl);
            let width = measure_codes(&codes, &font);
            let x = if rtl {
                self.state.cursor.x - width
            } else {
                self.state.cursor.x
            };
            self.show_text(x, baseline, &codes, 0.0)?;
            self.state.cursor.x = if rtl { x } else { x + width };
        } else {
            let trimmed = line.text.trim_end_matches(is_breaking_space);
            let codes = self.visual_codes(trimmed, rtl);
            let width = measure_codes(&codes, &font);
            let x = match align {
                TextAlign::Center => left_edge + (right_edge - left_edge - width) / 2.0,
                TextAlign::Right => right_edge - width,
                _ => left_edge,
            };
            self.show_text(x, baseline, &codes, 0.0)?;
            self.state.cursor.x = if rtl { x } else { x + width };
        }
        Ok(())
    }

    /// Draws a single-line cell of width `w` (to the margin when `w <= 0`)
    /// and height `h` (the default line height when `h <= 0`). In RTL mode
    /// the cell extends leftwards from the cursor.
    #[allow(clippy::too_many_arguments)]
    pub fn cell(
        &mut self,
        w: f32,
        h: f32,
        text: &str,
        border: CellBorder,
        advance: CellAdvance,
        align: TextAlign,
        fill: bool,
    ) -> Result<()> {
        self.page_index()?;
        let rtl = self.take_direction();
        let h = self.height_or_default(h);
        self.break_page_if_needed(h);
        let w = if w > 0.0 { w } else { self.remaining_width(rtl) };

        let codes = self.visual_codes(text, rtl);
        let cell = CellBox {
            width: w,
            height: h,
            border,
            align: if rtl { align.mirrored() } else { align },
            fill,
            rtl,
            justify: false,
        };
        self.draw_cell(&codes, cell)?;

        let line_start = self.line_start(rtl);
        let cursor = &mut self.state.cursor;
        cursor.last_height = h;
        match advance {
            CellAdvance::Right => {
                if rtl {
                    cursor.x -= w;
                } else {
                    cursor.x += w;
                }
            }
            CellAdvance::NextLine => {
                cursor.y += h;
                cursor.x = line_start;
            }
            CellAdvance::Below => cursor.y += h,
        }
        Ok(())
    }

    /// Draws text wrapped into a column of cells `w` wide, one per line,
    /// each `h` high. Borders: left and right on every line, top on the
    /// first, bottom on the last. The cursor ends at the start of the line
    /// below the block.
    pub fn multi_cell(
        &mut self,
        w: f32,
        h: f32,
        text: &str,
        border: CellBorder,
        align: TextAlign,
        fill: bool,
    ) -> Result<()> {
        self.page_index()?;
        let rtl = self.take_direction();
        let h = self.height_or_default(h);
        let w = if w > 0.0 { w } else { self.remaining_width(rtl) };
        let inner = w - 2.0 * self.state.cell_padding;
        let advances = self.glyph_advances(text, rtl);

        let mut lines = wrap_advances(text, &advances, inner, inner);
        if lines.is_empty() {
            lines.push(Line {
                text: String::new(),
                width: 0.0,
                hard_break: false,
            });
        }
        log::trace!("multi_cell: {} lines at width {:.2}", lines.len(), w);

        let start_x = self.state.cursor.x;
        let align = if rtl { align.mirrored() } else { align };
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            self.break_page_if_needed(h);
            self.state.cursor.x = start_x;
            let codes = self.visual_codes(line.text.trim_end_matches(is_breaking_space), rtl);
            let cell = CellBox {
                width: w,
                height: h,
                border: CellBorder {
                    left: border.left,
                    top: border.top && i == 0,
                    right: border.right,
                    bottom: border.bottom && i == last,
                },
                align,
                fill,
                rtl,
                justify: align == TextAlign::Justify && i != last && !line.hard_break,
            };
            self.draw_cell(&codes, cell)?;
            self.state.cursor.y += h;
        }
        self.state.cursor.x = self.line_start(rtl);
        self.state.cursor.last_height = h;
        Ok(())
    }

    fn draw_cell(&mut self, codes: &[u32], cell: CellBox) -> Result<()> {
        let x = if cell.rtl {
            self.state.cursor.x - cell.width
        } else {
            self.state.cursor.x
        };
        let y = self.state.cursor.y;

        if cell.fill || cell.border.is_all() {
            self.rect(x, y, cell.width, cell.height, cell.fill, cell.border.is_all())?;
        }
        if !cell.border.is_none() && !cell.border.is_all() {
            self.border_sides(x, y, cell.width, cell.height, cell.border)?;
        }
        if codes.is_empty() {
            return Ok(());
        }

        let font = self.active_font();
        let padding = self.state.cell_padding;
        let text_width = measure_codes(codes, &font);
        let spaces = codes.iter().filter(|&&c| c == 0x20).count();
        let align = match cell.align {
            TextAlign::Justify if !cell.justify || spaces == 0 => {
                if cell.rtl {
                    TextAlign::Right
                } else {
                    TextAlign::Left
                }
            }
            align => align,
        };
        let (text_x, word_spacing) = match align {
            TextAlign::Left => (x + padding, 0.0),
            TextAlign::Right => (x + cell.width - padding - text_width, 0.0),
            TextAlign::Center => (x + (cell.width - text_width) / 2.0, 0.0),
            TextAlign::Justify => (
                x + padding,
                (cell.width - 2.0 * padding - text_width) / spaces as f32,
            ),
        };
        let baseline = y + cell.height / 2.0 + (font.ascent() + font.descent()) / 2.0;
        self.show_text(text_x, baseline, codes, word_spacing)
    }
}
