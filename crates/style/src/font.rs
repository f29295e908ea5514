use crate::StyleParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CSS-like font weight. Names and numbers on the 100..900 scale are
/// both accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "WeightRepr", into = "WeightRepr")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Bold,
    Numeric(u16),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WeightRepr {
    Number(u16),
    Name(String),
}

impl TryFrom<WeightRepr> for FontWeight {
    type Error = StyleParseError;

    fn try_from(repr: WeightRepr) -> Result<Self, Self::Error> {
        let name = match repr {
            WeightRepr::Number(n) => return Ok(FontWeight::Numeric(n)),
            WeightRepr::Name(name) => name,
        };
        match name.to_ascii_lowercase().as_str() {
            "light" | "lighter" => Ok(FontWeight::Light),
            "normal" | "regular" => Ok(FontWeight::Normal),
            "bold" | "bolder" => Ok(FontWeight::Bold),
            other => other
                .parse()
                .map(FontWeight::Numeric)
                .map_err(|_| StyleParseError::Invalid(format!("font weight '{name}'"))),
        }
    }
}

impl From<FontWeight> for WeightRepr {
    fn from(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Light => WeightRepr::Name("light".to_string()),
            FontWeight::Normal => WeightRepr::Name("normal".to_string()),
            FontWeight::Bold => WeightRepr::Name("bold".to_string()),
            FontWeight::Numeric(n) => WeightRepr::Number(n),
        }
    }
}

impl FontWeight {
    /// Core fonts only come in regular and bold cuts.
    pub fn is_bold(self) -> bool {
        match self {
            FontWeight::Light | FontWeight::Normal => false,
            FontWeight::Bold => true,
            FontWeight::Numeric(n) => n >= 600,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// The style bits of a font selection: the face-selecting bits (`bold`,
/// `italic`) plus the decoration bits drawn by the layout engine.
///
/// Parsed from the compact flag notation `"B"`, `"BI"`, `"IU"`, ... where
/// `B` is bold, `I` italic, `U` underline and `D` line-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct FontStyleBits {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub line_through: bool,
}

impl FontStyleBits {
    pub const REGULAR: FontStyleBits = FontStyleBits {
        bold: false,
        italic: false,
        underline: false,
        line_through: false,
    };

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::REGULAR
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::REGULAR
        }
    }

    /// Only the bits that pick a different font face.
    pub fn face(self) -> Self {
        Self {
            bold: self.bold,
            italic: self.italic,
            ..Self::REGULAR
        }
    }

    /// Suffix used when naming a face, e.g. `BI` for bold italic.
    pub fn face_suffix(self) -> &'static str {
        match (self.bold, self.italic) {
            (false, false) => "",
            (true, false) => "B",
            (false, true) => "I",
            (true, true) => "BI",
        }
    }
}

impl FromStr for FontStyleBits {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = FontStyleBits::default();
        for c in s.chars() {
            match c.to_ascii_uppercase() {
                'B' => bits.bold = true,
                'I' => bits.italic = true,
                'U' => bits.underline = true,
                'D' => bits.line_through = true,
                other => return Err(StyleParseError::FontStyleFlag(other)),
            }
        }
        Ok(bits)
    }
}

impl fmt::Display for FontStyleBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            f.write_str("B")?;
        }
        if self.italic {
            f.write_str("I")?;
        }
        if self.underline {
            f.write_str("U")?;
        }
        if self.line_through {
            f.write_str("D")?;
        }
        Ok(())
    }
}
