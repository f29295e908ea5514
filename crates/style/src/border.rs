//! Stroke and border vocabulary for cells.

use crate::StyleParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    /// Operand of the `J` operator.
    pub fn pdf_value(self) -> i64 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    /// Operand of the `j` operator.
    pub fn pdf_value(self) -> i64 {
        match self {
            LineJoin::Miter => 0,
            LineJoin::Round => 1,
            LineJoin::Bevel => 2,
        }
    }
}

/// A dash pattern in points. An empty `array` is a solid line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashPattern {
    pub array: Vec<f32>,
    #[serde(default)]
    pub phase: f32,
}

impl DashPattern {
    pub fn solid() -> Self {
        Self::default()
    }

    pub fn new(array: Vec<f32>, phase: f32) -> Self {
        Self { array, phase }
    }

    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }
}

/// Stroke settings applied to cell borders. Widths are in points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct LineStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub dash: DashPattern,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            // 0.2 mm
            width: 0.567,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            dash: DashPattern::solid(),
        }
    }
}

/// Which sides of a cell get a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellBorder {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl CellBorder {
    pub const NONE: CellBorder = CellBorder {
        left: false,
        top: false,
        right: false,
        bottom: false,
    };

    pub const ALL: CellBorder = CellBorder {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }

    /// Swaps the left and right sides, used when a cell is laid out
    /// right-to-left.
    pub fn mirrored(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
            ..self
        }
    }
}

impl FromStr for CellBorder {
    type Err = StyleParseError;

    /// Parses `"1"` (all sides), `"0"`/`""` (none) or any combination of
    /// `L`, `T`, `R`, `B`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "0" => return Ok(Self::NONE),
            "1" => return Ok(Self::ALL),
            _ => {}
        }
        let mut border = Self::NONE;
        for c in s.trim().chars() {
            match c.to_ascii_uppercase() {
                'L' => border.left = true,
                'T' => border.top = true,
                'R' => border.right = true,
                'B' => border.bottom = true,
                other => return Err(StyleParseError::BorderSide(other)),
            }
        }
        Ok(border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_parsing() {
        assert_eq!("1".parse::<CellBorder>().unwrap(), CellBorder::ALL);
        assert_eq!("0".parse::<CellBorder>().unwrap(), CellBorder::NONE);
        let lt: CellBorder = "lt".parse().unwrap();
        assert!(lt.left && lt.top && !lt.right && !lt.bottom);
        assert_eq!(
            "LX".parse::<CellBorder>(),
            Err(StyleParseError::BorderSide('X'))
        );
    }

    #[test]
    fn test_border_mirrored_swaps_sides() {
        let lt: CellBorder = "LT".parse().unwrap();
        let m = lt.mirrored();
        assert!(m.right && m.top && !m.left);
    }

    #[test]
    fn test_line_style_defaults_and_json() {
        let style: LineStyle =
            serde_json::from_str(r#"{"width": 2.0, "cap": "round", "dash": {"array": [3.0, 1.0]}}"#)
                .unwrap();
        assert_eq!(style.width, 2.0);
        assert_eq!(style.cap.pdf_value(), 1);
        assert_eq!(style.join, LineJoin::Miter);
        assert!(!style.dash.is_solid());
        assert_eq!(style.dash.phase, 0.0);
    }
}
