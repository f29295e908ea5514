//! Error types for document operations.

use folio_layout::LayoutError;
use folio_style::StyleParseError;
use folio_traits::{FontError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unknown font: {0}")]
    UnknownFont(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No page has been added to the document")]
    NoPage,
    #[error("Page {page} is out of range (document has {count} pages)")]
    OutOfRange { page: usize, count: usize },
    #[error("Transaction misuse: {0}")]
    TransactionMisuse(&'static str),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Font error: {0}")]
    Font(FontError),
    #[error("Content stream encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

impl From<FontError> for DocumentError {
    fn from(e: FontError) -> Self {
        match e {
            FontError::NotFound(name) => DocumentError::UnknownFont(name),
            FontError::InvalidData { name, message } => {
                DocumentError::InvalidInput(format!("font {name}: {message}"))
            }
            other => DocumentError::Font(other),
        }
    }
}

impl From<LayoutError> for DocumentError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::Font(font) => font.into(),
            LayoutError::Generic(message) => DocumentError::InvalidInput(message),
        }
    }
}

impl From<StyleParseError> for DocumentError {
    fn from(e: StyleParseError) -> Self {
        DocumentError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::InvalidInput(format!("configuration: {e}"))
    }
}

impl From<lopdf::Error> for DocumentError {
    fn from(e: lopdf::Error) -> Self {
        DocumentError::Encoding(e.to_string())
    }
}
