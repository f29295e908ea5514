use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    /// The alignment as seen by a right-to-left writer: start and end swap,
    /// centre and justify are unaffected.
    pub fn mirrored(self) -> Self {
        match self {
            TextAlign::Left => TextAlign::Right,
            TextAlign::Right => TextAlign::Left,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

/// Writing direction of a run of text or of a whole document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }

    pub fn from_rtl(rtl: bool) -> Self {
        if rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_alignment() {
        assert_eq!(TextAlign::Left.mirrored(), TextAlign::Right);
        assert_eq!(TextAlign::Right.mirrored(), TextAlign::Left);
        assert_eq!(TextAlign::Justify.mirrored(), TextAlign::Justify);
    }

    #[test]
    fn test_direction_deserializes_kebab_case() {
        let d: TextDirection = serde_json::from_str("\"rtl\"").unwrap();
        assert!(d.is_rtl());
    }
}
