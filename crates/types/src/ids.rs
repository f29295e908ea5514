//! Newtype wrappers for semantic names
//!
//! These types keep font family names and content-stream resource names
//! apart even though both are plain strings underneath.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A normalized (lower-case) font family name, e.g. `helvetica`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FontFamily(Arc<str>);

impl FontFamily {
    pub fn new(family: &str) -> Self {
        Self(family.trim().to_lowercase().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FontFamily {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FontFamily {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl AsRef<str> for FontFamily {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The name a font is referenced by inside a content stream (`/F1`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ResourceName(Arc<str>);

impl ResourceName {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The resource name for the `index`-th registered font (1-based).
    pub fn font(index: usize) -> Self {
        Self(format!("F{}", index).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<&str> for ResourceName {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_family_is_normalized() {
        let a = FontFamily::new("Helvetica");
        let b = FontFamily::from(" HELVETICA ");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "helvetica");
    }

    #[test]
    fn test_font_resource_names() {
        assert_eq!(ResourceName::font(1).as_str(), "F1");
        assert_eq!(ResourceName::font(12), ResourceName::from("F12"));
    }

    #[test]
    fn test_hash_map_usage() {
        use std::collections::HashMap;

        let mut used = HashMap::new();
        used.insert(ResourceName::font(1), 3usize);
        assert_eq!(used.get(&ResourceName::from("F1")), Some(&3));
    }
}
