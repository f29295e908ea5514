//! Bidirectional text support for the folio layout engine.
//!
//! [`reorder`] turns a logical-order sequence of code points into visual
//! order for a paragraph direction. Arabic letters are replaced by their
//! contextual presentation forms (isolated, initial, medial, final) before
//! reordering, and paired punctuation is mirrored inside right-to-left runs.
//!
//! ```
//! use folio_bidi::{ParagraphDirection, reorder};
//!
//! let visual = reorder(&[0x062F, 0x0648, 0x0631], ParagraphDirection::Auto);
//! assert_eq!(visual, vec![0xFEAD, 0xFEED, 0xFEA9]);
//! ```

mod class;
mod reorder;
pub mod shaping;

pub use class::BidiClass;
pub use reorder::{MAX_DEPTH, mirror};

/// Base direction of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphDirection {
    /// Direction of the first strong character, left-to-right if none.
    #[default]
    Auto,
    ForceLeftToRight,
    ForceRightToLeft,
}

impl ParagraphDirection {
    pub fn from_rtl(rtl: bool) -> Self {
        if rtl {
            ParagraphDirection::ForceRightToLeft
        } else {
            ParagraphDirection::ForceLeftToRight
        }
    }
}

/// A code point after form substitution, with the code point it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    pub code: u32,
    pub original: u32,
}

impl ShapedGlyph {
    pub fn unshaped(code: u32) -> Self {
        Self {
            code,
            original: code,
        }
    }

    pub fn is_substituted(&self) -> bool {
        self.code != self.original
    }
}

/// Glyphs of a paragraph in visual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualRun {
    pub glyphs: Vec<ShapedGlyph>,
    /// Resolved embedding level of each glyph.
    pub levels: Vec<u8>,
    pub base_level: u8,
}

impl VisualRun {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn codes(&self) -> Vec<u32> {
        self.glyphs.iter().map(|g| g.code).collect()
    }

    /// Final code points, falling back to the original code point wherever
    /// `has_glyph` rejects the substituted one.
    pub fn resolve(&self, has_glyph: impl Fn(u32) -> bool) -> Vec<u32> {
        self.glyphs
            .iter()
            .map(|g| {
                if g.is_substituted() && !has_glyph(g.code) {
                    g.original
                } else {
                    g.code
                }
            })
            .collect()
    }

    /// Visual text; code points that are not scalar values are dropped.
    pub fn to_text(&self) -> String {
        self.glyphs
            .iter()
            .filter_map(|g| char::from_u32(g.code))
            .collect()
    }

    pub fn is_rtl(&self) -> bool {
        self.base_level % 2 == 1
    }
}

/// Shapes and reorders a paragraph, keeping the original code points.
pub fn reorder_glyphs(codes: &[u32], direction: ParagraphDirection) -> VisualRun {
    let classes: Vec<BidiClass> = codes.iter().map(|&c| BidiClass::of(c)).collect();
    let base_level = reorder::paragraph_level(&classes, direction);
    let levels = reorder::resolve_levels(&classes, base_level);
    let shaped = shaping::shape_run(codes);

    let mut glyphs = Vec::with_capacity(codes.len());
    let mut visual_levels = Vec::with_capacity(codes.len());
    for ((&code, class), (glyph, level)) in codes
        .iter()
        .zip(&classes)
        .zip(shaped.into_iter().zip(levels))
    {
        if class.is_explicit() {
            continue;
        }
        let mut glyph = if *class == BidiClass::AL {
            glyph
        } else {
            ShapedGlyph::unshaped(code)
        };
        if level % 2 == 1 {
            if let Some(mirrored) = mirror(glyph.code) {
                glyph.code = mirrored;
            }
        }
        glyphs.push(glyph);
        visual_levels.push(level);
    }

    reorder::reorder_visual(&mut glyphs, &mut visual_levels);
    log::trace!(
        "Reordered {} code points at paragraph level {}",
        codes.len(),
        base_level
    );

    VisualRun {
        glyphs,
        levels: visual_levels,
        base_level,
    }
}

/// Shapes and reorders a paragraph of code points into visual order.
pub fn reorder(codes: &[u32], direction: ParagraphDirection) -> Vec<u32> {
    reorder_glyphs(codes, direction).codes()
}

/// [`reorder`] over a string.
pub fn reorder_str(text: &str, direction: ParagraphDirection) -> String {
    let codes: Vec<u32> = text.chars().map(u32::from).collect();
    reorder_glyphs(&codes, direction).to_text()
}

/// Whether `text` holds any character that needs right-to-left handling.
pub fn has_rtl(text: &str) -> bool {
    text.chars().any(|c| {
        let class = BidiClass::of(c as u32);
        class.is_rtl() || class == BidiClass::AN
    })
}

#[cfg(test)]
mod bidi_test;
