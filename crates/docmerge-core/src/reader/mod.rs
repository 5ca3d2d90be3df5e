//! Text readers turning files into source documents.
//!
//! Supported formats are chosen by extension: `.pdf`, `.docx` and `.txt`.
//! [`read_document`] never fails; a reader error becomes an unreadable
//! document that consolidates as an all-`N/A` row.

mod docx;
mod pdf;

pub use docx::extract_docx_text;
pub use pdf::PdfReader;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::ReaderError;
use crate::models::document::SourceDocument;

/// Document format, from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    /// Detect the format of a path by extension.
    pub fn from_path(path: &Path) -> Result<Self, ReaderError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Text),
            other => Err(ReaderError::Unsupported(if other.is_empty() {
                path.display().to_string()
            } else {
                format!(".{}", other)
            })),
        }
    }
}

/// Read the raw text of a file.
pub fn read_text(path: &Path) -> Result<String, ReaderError> {
    let format = DocumentFormat::from_path(path)?;
    debug!("Reading {} as {:?}", path.display(), format);

    match format {
        DocumentFormat::Pdf => {
            let data = std::fs::read(path)?;
            let mut reader = PdfReader::new();
            reader.load(&data)?;
            reader.extract_text()
        }
        DocumentFormat::Docx => extract_docx_text(path),
        DocumentFormat::Text => Ok(std::fs::read_to_string(path)?),
    }
}

/// Source identifier of a path: its file name.
pub fn source_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a file into a source document, turning failures into an
/// unreadable document.
pub fn read_document(path: &Path) -> SourceDocument {
    let id = source_id(path);
    let result = read_text(path);
    if let Err(e) = &result {
        warn!("{}: {}", id, e);
    }
    SourceDocument::from_result(id, result)
}
