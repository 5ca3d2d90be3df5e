//! Source documents handed over by the upstream text readers.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::text::normalize_text;

/// Text content of a source document, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentContent {
    /// Whitespace-normalized document text.
    Text(String),
    /// The reader failed; carries the failure message.
    Unreadable(String),
}

/// A document as it enters extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Source identifier, normally the uploaded file name.
    pub id: String,

    /// Document text or read failure.
    pub content: DocumentContent,
}

impl SourceDocument {
    /// Create a document from raw text. The text is normalized.
    pub fn text(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            content: DocumentContent::Text(normalize_text(text)),
        }
    }

    /// Create a document whose text could not be obtained.
    pub fn unreadable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: DocumentContent::Unreadable(reason.into()),
        }
    }

    /// Create a document from a reader result.
    pub fn from_result<E: Display>(id: impl Into<String>, result: Result<String, E>) -> Self {
        match result {
            Ok(text) => Self::text(id, &text),
            Err(e) => Self::unreadable(id, e.to_string()),
        }
    }

    /// Normalized text, if the document was readable.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            DocumentContent::Text(text) => Some(text),
            DocumentContent::Unreadable(_) => None,
        }
    }
}
