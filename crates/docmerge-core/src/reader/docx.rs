//! Word (`.docx`) text extraction using docx-lite.

use std::path::Path;

use tracing::trace;

use crate::error::ReaderError;

/// Extract the paragraph text of a `.docx` file.
pub fn extract_docx_text(path: &Path) -> Result<String, ReaderError> {
    let text = docx_lite::extract_text(path)
        .map_err(|e| ReaderError::TextExtraction(format!("{}: {}", path.display(), e)))?;
    trace!("docx-lite returned {} characters", text.len());
    Ok(text)
}
