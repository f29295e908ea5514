//! The document: page buffers, cursor, text state and content emission.

use crate::config::DocumentConfig;
use crate::error::{DocumentError, Result};
use crate::fonts::{FontRegistry, FontResource};
use crate::graphics::real;
use crate::page::{PageBuffer, PageOutput};
use crate::transaction::TransactionSnapshot;
use folio_bidi::shaping::shape_run;
use folio_bidi::{BidiClass, ParagraphDirection, has_rtl, reorder_glyphs};
use folio_layout::{ActiveFont, wrap_advances};
use folio_style::{CellBorder, FontStyleBits, LineStyle, Margins, TextDirection};
use folio_traits::{ByteStore, FontKey, FontMetrics, FontMetricsProvider, MemoryStore};
use folio_types::{Color, Point, Rect, ResourceName};
use lopdf::Object;
use lopdf::content::{Content, Operation};
use std::sync::Arc;

/// Tolerance for comparing positions in user units.
pub(crate) const EPSILON: f32 = 1e-4;

/// Pen position in user units, origin at the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    /// Height of the last line or cell emitted.
    pub last_height: f32,
}

/// The face currently selected, with its decoration bits.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectedFont {
    pub key: FontKey,
    pub style: FontStyleBits,
    pub metrics: Arc<FontMetrics>,
}

/// Everything a transaction snapshot captures.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentState {
    pub pages: Vec<PageBuffer>,
    /// 1-based, 0 when no page exists yet.
    pub current_page: usize,
    pub cursor: Cursor,
    pub rtl: bool,
    /// One-shot direction for the next text operation.
    pub temp_rtl: Option<TextDirection>,
    pub fonts: FontRegistry,
    pub font: SelectedFont,
    /// Points.
    pub font_size: f32,
    /// Percent.
    pub font_stretching: f32,
    /// Points.
    pub font_spacing: f32,
    pub draw_color: Color,
    pub fill_color: Color,
    pub text_color: Color,
    pub line_style: LineStyle,
    pub margins: Margins,
    pub auto_page_break: bool,
    pub cell_height_ratio: f32,
    pub cell_padding: f32,
}

/// A document under construction.
///
/// Page content is appended to a [`ByteStore`] (memory or disk) as encoded
/// content-stream fragments. All coordinates taken and returned are in the
/// configured unit with the origin at the top-left corner of the page.
#[derive(Debug)]
pub struct Document {
    pub(crate) config: Arc<DocumentConfig>,
    pub(crate) fonts: Arc<dyn FontMetricsProvider>,
    pub(crate) store: Box<dyn ByteStore>,
    pub(crate) state: DocumentState,
    pub(crate) transaction: Option<TransactionSnapshot>,
    /// Page size in user units.
    pub(crate) page_width: f32,
    pub(crate) page_height: f32,
    /// Points per user unit.
    pub(crate) scale: f32,
}

#[cfg(feature = "disk-cache")]
fn disk_store() -> Result<Box<dyn ByteStore>> {
    Ok(Box::new(folio_resource::DiskStore::new()?))
}

#[cfg(not(feature = "disk-cache"))]
fn disk_store() -> Result<Box<dyn ByteStore>> {
    Err(DocumentError::InvalidInput(
        "disk cache requested but the disk-cache feature is disabled".to_string(),
    ))
}

impl Document {
    /// Creates a document backed by memory, or by a temporary file when
    /// `config.disk_cache` is set.
    pub fn new(config: DocumentConfig, fonts: Arc<dyn FontMetricsProvider>) -> Result<Self> {
        let store: Box<dyn ByteStore> = if config.disk_cache {
            disk_store()?
        } else {
            Box::new(MemoryStore::new())
        };
        Self::with_store(config, fonts, store)
    }

    pub fn with_store(
        config: DocumentConfig,
        fonts: Arc<dyn FontMetricsProvider>,
        store: Box<dyn ByteStore>,
    ) -> Result<Self> {
        config.validate()?;
        let scale = config.unit.scale();
        let (width_pt, height_pt) = config.page_size_pt();

        let style = config.font_style_bits()?;
        let key = FontKey::new(config.font_family.as_str(), style);
        let metrics = fonts.metrics(&key)?;

        let state = DocumentState {
            pages: Vec::new(),
            current_page: 0,
            cursor: Cursor::default(),
            rtl: config.rtl,
            temp_rtl: None,
            fonts: FontRegistry::default(),
            font: SelectedFont {
                key,
                style,
                metrics,
            },
            font_size: config.font_size,
            font_stretching: 100.0,
            font_spacing: 0.0,
            draw_color: Color::BLACK,
            fill_color: Color::WHITE,
            text_color: Color::BLACK,
            line_style: LineStyle::default(),
            margins: config.margins,
            auto_page_break: config.auto_page_break,
            cell_height_ratio: config.cell_height_ratio,
            cell_padding: config.cell_padding,
        };

        log::debug!(
            "Created document: {}x{}pt page, {} store, {} fonts",
            width_pt,
            height_pt,
            store.name(),
            fonts.name()
        );

        Ok(Self {
            config: Arc::new(config),
            fonts,
            store,
            state,
            transaction: None,
            page_width: width_pt / scale,
            page_height: height_pt / scale,
            scale,
        })
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    // ---- pages ----

    /// Appends a page, makes it current and puts the cursor at its top.
    /// Returns the new page number.
    pub fn add_page(&mut self) -> usize {
        self.state.pages.push(PageBuffer::new());
        self.state.current_page = self.state.pages.len();
        self.reset_cursor();
        log::debug!("Added page {}", self.state.current_page);
        self.state.current_page
    }

    pub fn page_count(&self) -> usize {
        self.state.pages.len()
    }

    /// 0 before the first page is added.
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page == 0 || page > self.state.pages.len() {
            return Err(DocumentError::OutOfRange {
                page,
                count: self.state.pages.len(),
            });
        }
        Ok(())
    }

    /// Makes `page` current and puts the cursor at its top.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        self.check_page(page)?;
        self.state.current_page = page;
        self.reset_cursor();
        Ok(())
    }

    /// Moves to the last page; no-op while the document has none.
    pub fn last_page(&mut self) {
        if !self.state.pages.is_empty() {
            self.state.current_page = self.state.pages.len();
            self.reset_cursor();
        }
    }

    /// Removes `page`; later pages move down by one.
    pub fn delete_page(&mut self, page: usize) -> Result<()> {
        self.check_page(page)?;
        self.state.pages.remove(page - 1);
        let current = self.state.current_page;
        if current > page {
            self.state.current_page = current - 1;
        } else if current == page {
            self.state.current_page = page.min(self.state.pages.len());
            self.reset_cursor();
        }
        log::debug!(
            "Deleted page {}, {} pages left, current page {}",
            page,
            self.state.pages.len(),
            self.state.current_page
        );
        Ok(())
    }

    pub(crate) fn page_index(&self) -> Result<usize> {
        match self.state.current_page {
            0 => Err(DocumentError::NoPage),
            n => Ok(n - 1),
        }
    }

    pub(crate) fn page_mut(&mut self) -> Result<&mut PageBuffer> {
        let index = self.page_index()?;
        Ok(&mut self.state.pages[index])
    }

    // ---- geometry and cursor ----

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn margins(&self) -> Margins {
        self.state.margins
    }

    /// Where lines start: the left margin, or the right one in RTL mode.
    pub(crate) fn line_start(&self, rtl: bool) -> f32 {
        if rtl {
            self.page_width - self.state.margins.right
        } else {
            self.state.margins.left
        }
    }

    /// Width between the cursor and the margin text flows towards.
    pub(crate) fn remaining_width(&self, rtl: bool) -> f32 {
        if rtl {
            self.state.cursor.x - self.state.margins.left
        } else {
            self.page_width - self.state.margins.right - self.state.cursor.x
        }
    }

    pub(crate) fn content_width(&self) -> f32 {
        self.page_width - self.state.margins.left - self.state.margins.right
    }

    pub(crate) fn page_break_trigger(&self) -> f32 {
        self.page_height - self.state.margins.bottom
    }

    fn reset_cursor(&mut self) {
        self.state.cursor = Cursor {
            x: self.line_start(self.state.rtl),
            y: self.state.margins.top,
            last_height: 0.0,
        };
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }

    pub fn x(&self) -> f32 {
        self.state.cursor.x
    }

    pub fn y(&self) -> f32 {
        self.state.cursor.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.state.cursor.x = x;
    }

    /// Moves to `y` and back to the start of the line.
    pub fn set_y(&mut self, y: f32) {
        self.state.cursor.x = self.line_start(self.state.rtl);
        self.state.cursor.y = y;
    }

    pub fn set_xy(&mut self, x: f32, y: f32) {
        self.set_y(y);
        self.set_x(x);
    }

    /// Starts a new line `h` below the current one (the last line height
    /// when `None`).
    pub fn ln(&mut self, h: Option<f32>) {
        let h = h.unwrap_or(self.state.cursor.last_height);
        self.state.cursor.x = self.line_start(self.state.rtl);
        self.state.cursor.y += h;
    }

    /// Opens a new page when a box of height `h` at the cursor would cross
    /// the page-break trigger. The cursor keeps its x position.
    pub(crate) fn break_page_if_needed(&mut self, h: f32) -> bool {
        let cursor = self.state.cursor;
        let at_top = cursor.y <= self.state.margins.top + EPSILON;
        if !self.state.auto_page_break || at_top || cursor.y + h <= self.page_break_trigger() {
            return false;
        }
        log::trace!("Page break at y={:.2} for a box of height {:.2}", cursor.y, h);
        self.add_page();
        self.state.cursor.x = cursor.x;
        true
    }

    // ---- state ----

    /// Selects a face. `size` in points, `None` keeps the current size.
    pub fn set_font(&mut self, family: &str, style: FontStyleBits, size: Option<f32>) -> Result<()> {
        let key = FontKey::new(family, style);
        let metrics = self.fonts.metrics(&key)?;
        self.state.font = SelectedFont {
            key,
            style,
            metrics,
        };
        if let Some(size) = size {
            self.set_font_size(size)?;
        }
        Ok(())
    }

    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if size <= 0.0 {
            return Err(DocumentError::InvalidInput(format!(
                "font size must be positive, got {size}"
            )));
        }
        self.state.font_size = size;
        Ok(())
    }

    pub fn font_size(&self) -> f32 {
        self.state.font_size
    }

    pub fn font_style(&self) -> FontStyleBits {
        self.state.font.style
    }

    pub fn font_family(&self) -> &str {
        self.state.font.key.family.as_str()
    }

    /// Horizontal scaling in percent.
    pub fn set_font_stretching(&mut self, percent: f32) {
        self.state.font_stretching = percent;
    }

    /// Extra space after each character, in points.
    pub fn set_font_spacing(&mut self, spacing: f32) {
        self.state.font_spacing = spacing;
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.state.draw_color = color;
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.state.text_color = color;
    }

    pub fn text_color(&self) -> Color {
        self.state.text_color
    }

    pub fn set_line_style(&mut self, style: LineStyle) {
        self.state.line_style = style;
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.state.margins = margins;
    }

    /// `margin` is the distance from the bottom edge that triggers a break.
    pub fn set_auto_page_break(&mut self, enabled: bool, margin: f32) {
        self.state.auto_page_break = enabled;
        self.state.margins.bottom = margin;
    }

    pub fn set_cell_height_ratio(&mut self, ratio: f32) -> Result<()> {
        if ratio <= 0.0 {
            return Err(DocumentError::InvalidInput(format!(
                "cell height ratio must be positive, got {ratio}"
            )));
        }
        self.state.cell_height_ratio = ratio;
        Ok(())
    }

    pub fn cell_height_ratio(&self) -> f32 {
        self.state.cell_height_ratio
    }

    pub fn set_cell_padding(&mut self, padding: f32) {
        self.state.cell_padding = padding;
    }

    /// Switches the document direction and moves the cursor to the start
    /// of the line in that direction.
    pub fn set_rtl(&mut self, rtl: bool) {
        self.state.rtl = rtl;
        self.state.cursor.x = self.line_start(rtl);
    }

    pub fn is_rtl(&self) -> bool {
        self.state.rtl
    }

    /// Overrides the direction of the next text operation only.
    pub fn set_temp_rtl(&mut self, direction: Option<TextDirection>) {
        self.state.temp_rtl = direction;
    }

    /// The direction of the current text operation; consumes the one-shot
    /// override.
    pub(crate) fn take_direction(&mut self) -> bool {
        self.state
            .temp_rtl
            .take()
            .map_or(self.state.rtl, TextDirection::is_rtl)
    }

    // ---- measurement ----

    pub(crate) fn active_font(&self) -> ActiveFont {
        ActiveFont::new(self.state.font.metrics.clone(), self.state.font_size, self.scale)
            .with_stretching(self.state.font_stretching)
            .with_spacing(self.state.font_spacing)
    }

    /// Default height of a line: font size × cell height ratio.
    pub fn line_height(&self) -> f32 {
        self.active_font().size_in_units() * self.state.cell_height_ratio
    }

    pub(crate) fn height_or_default(&self, h: f32) -> f32 {
        if h > 0.0 { h } else { self.line_height() }
    }

    /// Width of `text` as it would be drawn, shaped when right-to-left.
    pub fn get_string_width(&self, text: &str) -> f32 {
        self.glyph_advances(text, self.state.rtl).iter().sum()
    }

    fn inner_width(&self, w: f32) -> f32 {
        let w = if w > 0.0 {
            w
        } else {
            self.remaining_width(self.state.rtl)
        };
        w - 2.0 * self.state.cell_padding
    }

    /// Lines `text` takes in a multi-line cell of width `w`.
    pub fn get_num_lines(&self, text: &str, w: f32) -> usize {
        let inner = self.inner_width(w);
        let advances = self.glyph_advances(text, self.state.rtl);
        wrap_advances(text, &advances, inner, inner).len().max(1)
    }

    /// Height `text` takes in a multi-line cell of width `w`.
    pub fn get_string_height(&self, w: f32, text: &str) -> f32 {
        self.get_num_lines(text, w) as f32
            * self.active_font().size_in_units()
            * self.state.cell_height_ratio
    }

    /// Advance of every character of `text` in user units, measured on the
    /// glyph that will be drawn for it: the contextual form of an Arabic
    /// letter, or the letter itself when the font lacks that form.
    /// Embedding controls take no space.
    pub(crate) fn glyph_advances(&self, text: &str, rtl: bool) -> Vec<f32> {
        let font = self.active_font();
        let codes: Vec<u32> = text.chars().map(u32::from).collect();
        if !rtl && !has_rtl(text) {
            return codes.iter().map(|&c| font.char_width(c)).collect();
        }
        let metrics = &self.state.font.metrics;
        let drawable = |cp: u32| !metrics.unicode || metrics.has_glyph(cp);
        codes
            .iter()
            .zip(shape_run(&codes))
            .map(|(&code, glyph)| match BidiClass::of(code) {
                class if class.is_explicit() => 0.0,
                BidiClass::AL if glyph.is_substituted() && drawable(glyph.code) => {
                    font.char_width(glyph.code)
                }
                _ => font.char_width(code),
            })
            .collect()
    }

    /// Visual-order code points for `text`, shaped and reordered when the
    /// text is right-to-left or contains right-to-left characters.
    pub(crate) fn visual_codes(&self, text: &str, rtl: bool) -> Vec<u32> {
        let codes: Vec<u32> = text.chars().map(u32::from).collect();
        if !rtl && !has_rtl(text) {
            return codes;
        }
        let direction = if rtl {
            ParagraphDirection::ForceRightToLeft
        } else {
            ParagraphDirection::Auto
        };
        let metrics = &self.state.font.metrics;
        reorder_glyphs(&codes, direction).resolve(|cp| !metrics.unicode || metrics.has_glyph(cp))
    }

    // ---- content emission ----

    /// Encodes `operations` and appends them to the current page.
    pub(crate) fn emit(&mut self, operations: Vec<Operation>) -> Result<()> {
        if operations.is_empty() {
            return Ok(());
        }
        let index = self.page_index()?;
        let mut bytes = Content { operations }.encode()?;
        bytes.push(b'\n');
        let offset = self.store.len();
        self.store.append(&bytes)?;
        self.state.pages[index].push_extent(offset, bytes.len() as u64);
        Ok(())
    }

    /// Shows visual-order code points with the left end of the baseline at
    /// `(x, baseline)`. `word_spacing` is added to every space.
    pub(crate) fn show_text(
        &mut self,
        x: f32,
        baseline: f32,
        codes: &[u32],
        word_spacing: f32,
    ) -> Result<()> {
        if codes.is_empty() {
            return Ok(());
        }
        let font = self.active_font();
        let key = self.state.font.key.clone();
        let style = self.state.font.style;
        let unicode = font.metrics.unicode;
        let resource = self.state.fonts.register(&key, &font.metrics);
        self.state.fonts.record_usage(&resource, codes);

        let k = self.scale;
        let stretching = self.state.font_stretching;
        let scaling = stretching / 100.0;
        let extra = word_spacing * k;
        let text_color = self.state.text_color;
        let page_height = self.page_height;

        let page = self.page_mut()?;
        page.fonts.insert(resource.clone());
        let mut ops = page
            .graphics
            .text_ops(&resource, font.size, font.spacing / scaling, stretching);
        ops.extend(page.graphics.fill_ops(text_color));
        let tw = if unicode { 0.0 } else { extra / scaling };
        ops.extend(page.graphics.word_spacing_ops(tw));

        let baseline_pt = (page_height - baseline) * k;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Td", vec![real(x * k), real(baseline_pt)]));
        if unicode && extra != 0.0 {
            let adjustment = -extra * 1000.0 / (font.size * scaling);
            ops.push(Operation::new("TJ", vec![justified_array(codes, adjustment)]));
        } else {
            ops.push(Operation::new(
                "Tj",
                vec![crate::encoding::encode_text(codes, unicode)],
            ));
        }
        ops.push(Operation::new("ET", vec![]));

        if style.underline || style.line_through {
            let spaces = codes.iter().filter(|&&c| c == 0x20).count() as f32;
            let width = (folio_layout::measure_codes(codes, &font) + spaces * word_spacing) * k;
            let thickness = font.size * 0.05;
            if style.underline {
                let y = baseline_pt - font.size * 0.1 - thickness;
                ops.extend(filled_rect(x * k, y, width, thickness));
            }
            if style.line_through {
                let y = baseline_pt + font.size * 0.25;
                ops.extend(filled_rect(x * k, y, width, thickness));
            }
        }

        self.emit(ops)
    }

    /// Draws a rectangle given by its top-left corner.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: bool, stroke: bool) -> Result<()> {
        if !fill && !stroke {
            return Ok(());
        }
        let k = self.scale;
        let page_height = self.page_height;
        let (style, draw, fill_color) = (
            self.state.line_style.clone(),
            self.state.draw_color,
            self.state.fill_color,
        );
        let page = self.page_mut()?;
        let mut ops = Vec::new();
        if stroke {
            ops.extend(page.graphics.stroke_ops(&style, draw));
        }
        if fill {
            ops.extend(page.graphics.fill_ops(fill_color));
        }
        let area = Rect::new(x, y, w, h).to_pdf_space(page_height);
        ops.push(Operation::new(
            "re",
            vec![
                real(area.x * k),
                real(area.y * k),
                real(area.width * k),
                real(area.height * k),
            ],
        ));
        let paint = match (fill, stroke) {
            (true, true) => "B",
            (true, false) => "f",
            _ => "S",
        };
        ops.push(Operation::new(paint, vec![]));
        self.emit(ops)
    }

    /// Strokes straight segments between pairs of points.
    pub(crate) fn stroke_segments(&mut self, segments: &[(Point, Point)]) -> Result<()> {
        if segments.is_empty() {
            return Ok(());
        }
        let k = self.scale;
        let page_height = self.page_height;
        let (style, draw) = (self.state.line_style.clone(), self.state.draw_color);
        let page = self.page_mut()?;
        let mut ops = page.graphics.stroke_ops(&style, draw);
        for (from, to) in segments {
            ops.push(Operation::new("m", vec![real(from.x * k), real((page_height - from.y) * k)]));
            ops.push(Operation::new("l", vec![real(to.x * k), real((page_height - to.y) * k)]));
        }
        ops.push(Operation::new("S", vec![]));
        self.emit(ops)
    }

    /// Draws a line with the current line style and draw colour.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        self.stroke_segments(&[(Point::new(x1, y1), Point::new(x2, y2))])
    }

    /// Strokes the requested sides of a box.
    pub(crate) fn border_sides(&mut self, x: f32, y: f32, w: f32, h: f32, border: CellBorder) -> Result<()> {
        let [top_left, top_right, bottom_left, bottom_right] = [
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x, y + h),
            Point::new(x + w, y + h),
        ];
        let mut segments = Vec::with_capacity(4);
        if border.left {
            segments.push((top_left, bottom_left));
        }
        if border.top {
            segments.push((top_left, top_right));
        }
        if border.right {
            segments.push((top_right, bottom_right));
        }
        if border.bottom {
            segments.push((bottom_left, bottom_right));
        }
        self.stroke_segments(&segments)
    }

    // ---- output ----

    /// Content stream of `page`.
    pub fn page_content(&self, page: usize) -> Result<Vec<u8>> {
        self.check_page(page)?;
        Ok(self.state.pages[page - 1].read(self.store.as_ref())?)
    }

    pub fn pages(&self) -> Result<Vec<PageOutput>> {
        let (width, height) = self.config.page_size_pt();
        self.state
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| -> Result<PageOutput> {
                Ok(PageOutput {
                    number: i + 1,
                    content: page.read(self.store.as_ref())?,
                    fonts: page.fonts.iter().cloned().collect(),
                    width,
                    height,
                })
            })
            .collect()
    }

    /// Fonts referenced so far, with the code points shown in each.
    pub fn font_resources(&self) -> &[FontResource] {
        self.state.fonts.resources()
    }

    /// Resource names used on `page`.
    pub fn page_fonts(&self, page: usize) -> Result<Vec<ResourceName>> {
        self.check_page(page)?;
        Ok(self.state.pages[page - 1].fonts.iter().cloned().collect())
    }
}

fn filled_rect(x: f32, y: f32, w: f32, h: f32) -> Vec<Operation> {
    vec![
        Operation::new("re", vec![real(x), real(y), real(w), real(h)]),
        Operation::new("f", vec![]),
    ]
}

/// `TJ` operand spreading `adjustment` (thousandths of an em, negative
/// widens) after every space.
fn justified_array(codes: &[u32], adjustment: f32) -> Object {
    let mut items = Vec::new();
    let mut chunk = Vec::new();
    for &code in codes {
        chunk.push(code);
        if code == 0x20 {
            items.push(crate::encoding::encode_text(&chunk, true));
            items.push(Object::Real((adjustment * 100.0).round() / 100.0));
            chunk.clear();
        }
    }
    if !chunk.is_empty() {
        items.push(crate::encoding::encode_text(&chunk, true));
    }
    Object::Array(items)
}
