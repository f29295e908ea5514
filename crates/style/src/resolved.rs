//! Computed style attached to each node of an already-cascaded document.

use crate::font::{FontStyle, FontStyleBits, FontWeight};
use crate::text::{TextAlign, TextDecoration, TextDirection};
use folio_types::Color;
use serde::{Deserialize, Serialize};

/// The style map a node carries after cascade resolution. Every field is
/// optional: `None` means "inherit whatever the layout engine currently
/// uses".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResolvedStyle {
    pub color: Option<Color>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub font_size: Option<f32>,
    pub text_decoration: Option<TextDecoration>,
    /// First-line indent in user units.
    pub text_indent: Option<f32>,
    pub text_align: Option<TextAlign>,
    pub direction: Option<TextDirection>,
}

impl ResolvedStyle {
    /// Folds the weight/style/decoration properties onto `base`.
    pub fn font_bits(&self, base: FontStyleBits) -> FontStyleBits {
        let mut bits = base;
        if let Some(weight) = &self.font_weight {
            bits.bold = weight.is_bold();
        }
        if let Some(style) = self.font_style {
            bits.italic = !matches!(style, FontStyle::Normal);
        }
        if let Some(decoration) = self.text_decoration {
            bits.underline = decoration == TextDecoration::Underline;
            bits.line_through = decoration == TextDecoration::LineThrough;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_bits_override_base() {
        let style = ResolvedStyle {
            font_weight: Some(FontWeight::Bold),
            text_decoration: Some(TextDecoration::Underline),
            ..Default::default()
        };
        let bits = style.font_bits(FontStyleBits::italic());
        assert!(bits.bold && bits.italic && bits.underline);
    }

    #[test]
    fn test_deserialize_partial_style() {
        let style: ResolvedStyle =
            serde_json::from_str(r##"{"color": "#ff0000", "direction": "rtl", "text-indent": 5}"##)
                .unwrap();
        assert_eq!(style.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(style.direction, Some(TextDirection::Rtl));
        assert_eq!(style.text_indent, Some(5.0));
        assert!(style.font_weight.is_none());
    }
}
