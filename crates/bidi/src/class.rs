//! Directional character classes.

/// Bidirectional character type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidiClass {
    // Strong types
    /// Left-to-Right
    L,
    /// Right-to-Left
    R,
    /// Arabic Letter
    AL,

    // Weak types
    /// European Number
    EN,
    /// European Number Separator
    ES,
    /// European Number Terminator
    ET,
    /// Arabic Number
    AN,
    /// Common Number Separator
    CS,
    /// Nonspacing Mark
    NSM,
    /// Boundary Neutral
    BN,

    // Neutral types
    /// Paragraph Separator
    B,
    /// Segment Separator
    S,
    /// Whitespace
    WS,
    /// Other Neutrals
    ON,

    // Explicit formatting
    /// Left-to-Right Embedding
    LRE,
    /// Left-to-Right Override
    LRO,
    /// Right-to-Left Embedding
    RLE,
    /// Right-to-Left Override
    RLO,
    /// Pop Directional Format
    PDF,
}

impl BidiClass {
    /// Classifies a code point. Values that are not Unicode scalar values
    /// are treated as other neutrals.
    pub fn of(code: u32) -> Self {
        if char::from_u32(code).is_none() {
            return BidiClass::ON;
        }

        match code {
            // C0/C1 controls
            0x0009 | 0x000B | 0x001F => BidiClass::S,
            0x000A | 0x000D | 0x001C..=0x001E | 0x0085 => BidiClass::B,
            0x000C | 0x0020 => BidiClass::WS,
            0x0000..=0x0008 | 0x000E..=0x001B | 0x007F..=0x0084 | 0x0086..=0x009F => {
                BidiClass::BN
            }

            // ASCII
            0x0030..=0x0039 => BidiClass::EN,
            0x002B | 0x002D => BidiClass::ES,
            0x0023..=0x0025 => BidiClass::ET,
            0x002C | 0x002E | 0x002F | 0x003A => BidiClass::CS,
            0x0041..=0x005A | 0x0061..=0x007A => BidiClass::L,
            0x0021..=0x007E => BidiClass::ON,

            // Latin-1 supplement
            0x00A0 => BidiClass::CS,
            0x00A2..=0x00A5 | 0x00B0 | 0x00B1 => BidiClass::ET,
            0x00B2 | 0x00B3 | 0x00B9 => BidiClass::EN,
            0x00AD => BidiClass::BN,
            0x00AA | 0x00B5 | 0x00BA => BidiClass::L,
            0x00A1..=0x00BF | 0x00D7 | 0x00F7 => BidiClass::ON,

            // Combining diacritics
            0x0300..=0x036F => BidiClass::NSM,

            // Hebrew
            0x0591..=0x05BD | 0x05BF | 0x05C1 | 0x05C2 | 0x05C4 | 0x05C5 | 0x05C7 => {
                BidiClass::NSM
            }
            0x0590..=0x05FF => BidiClass::R,

            // Arabic
            0x0600..=0x0605 | 0x0660..=0x0669 | 0x066B | 0x066C => BidiClass::AN,
            0x060C => BidiClass::CS,
            0x066A => BidiClass::ET,
            0x06F0..=0x06F9 => BidiClass::EN,
            0x0610..=0x061A
            | 0x064B..=0x065F
            | 0x0670
            | 0x06D6..=0x06DC
            | 0x06DF..=0x06E4
            | 0x06E7
            | 0x06E8
            | 0x06EA..=0x06ED => BidiClass::NSM,
            0x0600..=0x06FF => BidiClass::AL,

            // Syriac, Arabic supplement, Thaana
            0x0700..=0x07BF => BidiClass::AL,
            // N'Ko, Samaritan, Mandaic
            0x07C0..=0x085F => BidiClass::R,
            0x08A0..=0x08FF => BidiClass::AL,

            // General punctuation
            0x1680 | 0x2000..=0x200A | 0x2028 | 0x205F | 0x3000 => BidiClass::WS,
            0x200B..=0x200D | 0x2060..=0x2064 | 0xFEFF => BidiClass::BN,
            0x200E => BidiClass::L,
            0x200F => BidiClass::R,
            0x2029 => BidiClass::B,
            0x202A => BidiClass::LRE,
            0x202B => BidiClass::RLE,
            0x202C => BidiClass::PDF,
            0x202D => BidiClass::LRO,
            0x202E => BidiClass::RLO,
            0x202F | 0x2044 => BidiClass::CS,
            0x2030..=0x2034 => BidiClass::ET,
            // Isolates are not supported and behave as neutrals.
            0x2010..=0x2027 | 0x2035..=0x2043 | 0x2045..=0x205E | 0x2066..=0x2069 => {
                BidiClass::ON
            }
            0x2070 | 0x2074..=0x2079 | 0x2080..=0x2089 => BidiClass::EN,
            0x207A | 0x207B | 0x208A | 0x208B => BidiClass::ES,
            0x20A0..=0x20CF => BidiClass::ET,

            // Arrows, math operators, technical symbols, box drawing...
            0x2190..=0x2BFF => BidiClass::ON,

            // Presentation forms
            0xFB1D..=0xFB4F => BidiClass::R,
            0xFB50..=0xFDFF | 0xFE70..=0xFEFE => BidiClass::AL,

            _ => BidiClass::L,
        }
    }

    pub fn is_strong(self) -> bool {
        matches!(self, BidiClass::L | BidiClass::R | BidiClass::AL)
    }

    /// Embedding, override and pop controls.
    pub fn is_explicit(self) -> bool {
        matches!(
            self,
            BidiClass::LRE | BidiClass::LRO | BidiClass::RLE | BidiClass::RLO | BidiClass::PDF
        )
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, BidiClass::R | BidiClass::AL | BidiClass::RLE | BidiClass::RLO)
    }

    /// Classes that take no part in weak and neutral resolution.
    pub(crate) fn is_removed(self) -> bool {
        self == BidiClass::BN || self.is_explicit()
    }

    pub(crate) fn is_neutral(self) -> bool {
        matches!(self, BidiClass::B | BidiClass::S | BidiClass::WS | BidiClass::ON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bidi_class_latin_and_digits() {
        assert_eq!(BidiClass::of('A' as u32), BidiClass::L);
        assert_eq!(BidiClass::of('z' as u32), BidiClass::L);
        assert_eq!(BidiClass::of('7' as u32), BidiClass::EN);
        assert_eq!(BidiClass::of(' ' as u32), BidiClass::WS);
        assert_eq!(BidiClass::of('_' as u32), BidiClass::ON);
        assert_eq!(BidiClass::of(':' as u32), BidiClass::CS);
        assert_eq!(BidiClass::of('%' as u32), BidiClass::ET);
        assert_eq!(BidiClass::of('é' as u32), BidiClass::L);
    }

    #[test]
    fn test_bidi_class_rtl_scripts() {
        assert_eq!(BidiClass::of(0x05D0), BidiClass::R);
        assert_eq!(BidiClass::of(0x0627), BidiClass::AL);
        assert_eq!(BidiClass::of(0x06CC), BidiClass::AL);
        assert_eq!(BidiClass::of(0x0663), BidiClass::AN);
        assert_eq!(BidiClass::of(0x06F3), BidiClass::EN);
        assert_eq!(BidiClass::of(0x064E), BidiClass::NSM);
        assert_eq!(BidiClass::of(0xFEAD), BidiClass::AL);
    }

    #[test]
    fn test_bidi_class_controls() {
        assert_eq!(BidiClass::of(0x200C), BidiClass::BN);
        assert_eq!(BidiClass::of(0x200D), BidiClass::BN);
        assert_eq!(BidiClass::of(0x202B), BidiClass::RLE);
        assert_eq!(BidiClass::of(0x202C), BidiClass::PDF);
        assert_eq!(BidiClass::of('\n' as u32), BidiClass::B);
        assert_eq!(BidiClass::of('\t' as u32), BidiClass::S);
    }

    #[test]
    fn test_invalid_scalar_is_neutral() {
        assert_eq!(BidiClass::of(0xD800), BidiClass::ON);
        assert_eq!(BidiClass::of(0x11_0000), BidiClass::ON);
    }
}
