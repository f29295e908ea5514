//! Font resources used by a document.

use folio_traits::{FontKey, FontMetrics};
use folio_types::ResourceName;
use std::collections::BTreeSet;

/// A font as referenced from content streams.
#[derive(Debug, Clone, PartialEq)]
pub struct FontResource {
    pub name: ResourceName,
    pub key: FontKey,
    /// PostScript name of the face.
    pub base_font: String,
    pub unicode: bool,
    /// Every code point shown with this font, for subsetting.
    pub used: BTreeSet<u32>,
}

/// Assigns resource names `F1, F2, ...` in order of first use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontRegistry {
    resources: Vec<FontResource>,
}

impl FontRegistry {
    pub fn register(&mut self, key: &FontKey, metrics: &FontMetrics) -> ResourceName {
        if let Some(existing) = self.resources.iter().find(|r| &r.key == key) {
            return existing.name.clone();
        }
        let name = ResourceName::font(self.resources.len() + 1);
        log::debug!("Registered font {} as {}", key, name);
        self.resources.push(FontResource {
            name: name.clone(),
            key: key.clone(),
            base_font: metrics.name.clone(),
            unicode: metrics.unicode,
            used: BTreeSet::new(),
        });
        name
    }

    pub fn record_usage(&mut self, name: &ResourceName, codes: &[u32]) {
        if let Some(resource) = self.resources.iter_mut().find(|r| &r.name == name) {
            resource.used.extend(codes.iter().copied());
        }
    }

    pub fn get(&self, name: &ResourceName) -> Option<&FontResource> {
        self.resources.iter().find(|r| &r.name == name)
    }

    pub fn resources(&self) -> &[FontResource] {
        &self.resources
    }
}
