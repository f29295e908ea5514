#![allow(dead_code)]

pub mod fixtures;
pub mod content_assertions;

use folio::{CoreFontProvider, Document, DocumentConfig};
use lopdf::Object;
use lopdf::content::{Content, Operation};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A decoded page content stream with helper methods.
pub struct PageOps {
    pub operations: Vec<Operation>,
}

impl PageOps {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        let content = Content::decode(bytes)?;
        Ok(Self {
            operations: content.operations,
        })
    }

    pub fn of(doc: &Document, page: usize) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(&doc.page_content(page)?)
    }

    pub fn operators(&self) -> Vec<&str> {
        self.operations
            .iter()
            .map(|op| op.operator.as_str())
            .collect()
    }

    pub fn count(&self, operator: &str) -> usize {
        self.operations
            .iter()
            .filter(|op| op.operator == operator)
            .count()
    }

    /// Raw string operands of every `Tj`, in stream order.
    pub fn shown_bytes(&self) -> Vec<Vec<u8>> {
        self.operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// `Tj` operands of a single-byte font as text.
    pub fn shown_text(&self) -> Vec<String> {
        self.shown_bytes()
            .into_iter()
            .map(|bytes| bytes.into_iter().map(char::from).collect())
            .collect()
    }

    /// `Tj` operands of a unicode font decoded from UTF-16BE.
    pub fn shown_code_points(&self) -> Vec<Vec<u32>> {
        self.shown_bytes()
            .into_iter()
            .map(|bytes| {
                bytes
                    .chunks_exact(2)
                    .map(|pair| u32::from(u16::from_be_bytes([pair[0], pair[1]])))
                    .collect()
            })
            .collect()
    }

    /// `Td` operands in points, origin bottom-left.
    pub fn text_positions(&self) -> Vec<(f32, f32)> {
        self.operations
            .iter()
            .filter(|op| op.operator == "Td")
            .filter_map(|op| match op.operands.as_slice() {
                [x, y] => Some((x.as_float().ok()?, y.as_float().ok()?)),
                _ => None,
            })
            .collect()
    }
}

pub fn core_document(config: DocumentConfig) -> Document {
    init_logging();
    match Document::new(config, Arc::new(CoreFontProvider::new())) {
        Ok(doc) => doc,
        Err(e) => panic!("document creation failed: {e}"),
    }
}
