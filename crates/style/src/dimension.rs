//! Page geometry: measurement units, page sizes and margins.
use serde::{Deserialize, Serialize};

/// The user unit all public coordinates are expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pt,
    #[default]
    Mm,
    Cm,
    In,
}

impl Unit {
    /// Points per user unit.
    pub fn scale(self) -> f32 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => 72.0 / 25.4,
            Unit::Cm => 72.0 / 2.54,
            Unit::In => 72.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Margins in user units.
///
/// Accepts a single number, a `"vertical horizontal"` or
/// `"top right bottom left"` string, or a map of sides.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(try_from = "MarginsRepr")]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self::sides(value, value, value, value)
    }

    pub fn sides(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MarginsRepr {
    Uniform(f32),
    Shorthand(String),
    Sides {
        #[serde(default)]
        top: f32,
        #[serde(default)]
        right: f32,
        #[serde(default)]
        bottom: f32,
        #[serde(default)]
        left: f32,
    },
}

impl TryFrom<MarginsRepr> for Margins {
    type Error = String;

    fn try_from(repr: MarginsRepr) -> Result<Self, Self::Error> {
        match repr {
            MarginsRepr::Uniform(v) => Ok(Margins::all(v)),
            MarginsRepr::Sides {
                top,
                right,
                bottom,
                left,
            } => Ok(Margins::sides(top, right, bottom, left)),
            MarginsRepr::Shorthand(text) => {
                let mut values = Vec::with_capacity(4);
                for token in text.split_whitespace() {
                    let v = token
                        .parse::<f32>()
                        .map_err(|_| format!("margin value '{token}' is not a number"))?;
                    values.push(v);
                }
                match values[..] {
                    [v] => Ok(Margins::all(v)),
                    [vertical, horizontal] => {
                        Ok(Margins::sides(vertical, horizontal, vertical, horizontal))
                    }
                    [t, r, b, l] => Ok(Margins::sides(t, r, b, l)),
                    _ => Err(format!(
                        "margins take 1, 2 or 4 values, '{text}' has {}",
                        values.len()
                    )),
                }
            }
        }
    }
}

/// Named paper formats or an explicit size in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "PageSizeRepr", into = "PageSizeRepr")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PageSizeRepr {
    Named(String),
    Custom { width: f32, height: f32 },
}

impl TryFrom<PageSizeRepr> for PageSize {
    type Error = String;

    fn try_from(repr: PageSizeRepr) -> Result<Self, Self::Error> {
        match repr {
            PageSizeRepr::Custom { width, height } => Ok(PageSize::Custom { width, height }),
            PageSizeRepr::Named(name) => match name.to_ascii_lowercase().as_str() {
                "a4" => Ok(PageSize::A4),
                "letter" => Ok(PageSize::Letter),
                "legal" => Ok(PageSize::Legal),
                _ => Err(format!("unknown page size '{name}'")),
            },
        }
    }
}

impl From<PageSize> for PageSizeRepr {
    fn from(size: PageSize) -> Self {
        let name = match size {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Custom { width, height } => return PageSizeRepr::Custom { width, height },
        };
        PageSizeRepr::Named(name.to_string())
    }
}

impl PageSize {
    fn portrait_pt(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (width.min(height), width.max(height)),
        }
    }

    /// Width and height in points for the given orientation.
    pub fn oriented_pt(self, orientation: Orientation) -> (f32, f32) {
        let (short, long) = self.portrait_pt();
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_scale() {
        assert_eq!(Unit::Pt.scale(), 1.0);
        assert!((Unit::Mm.scale() - 2.834_645_7).abs() < 1e-4);
        assert_eq!(Unit::In.scale(), 72.0);
    }

    #[test]
    fn test_margins_forms() {
        let m: Margins = serde_json::from_str("\"10 20\"").unwrap();
        assert_eq!(m, Margins::sides(10.0, 20.0, 10.0, 20.0));
        let m: Margins = serde_json::from_str("15").unwrap();
        assert_eq!(m, Margins::all(15.0));
        let m: Margins = serde_json::from_str(r#"{"left": 5}"#).unwrap();
        assert_eq!(m, Margins::sides(0.0, 0.0, 0.0, 5.0));
        assert!(serde_json::from_str::<Margins>("\"1 2 3\"").is_err());
    }

    #[test]
    fn test_page_size_orientation() {
        let (w, h) = PageSize::A4.oriented_pt(Orientation::Landscape);
        assert!(w > h);
        let size: PageSize = serde_json::from_str(r#"{"width": 200, "height": 100}"#).unwrap();
        assert_eq!(size.oriented_pt(Orientation::Portrait), (100.0, 200.0));
        assert!(serde_json::from_str::<PageSize>("\"a5\"").is_err());
        assert_eq!(serde_json::to_string(&PageSize::Letter).unwrap(), "\"Letter\"");
    }
}
