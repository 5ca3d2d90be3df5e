//! Error types for the docmerge-core library.
//!
//! Only construction problems (bad rule tables, unreadable config) and
//! reader internals are errors. Everything that can go wrong while
//! extracting or merging a batch is recovered and reported as an
//! [`Issue`].

use serde::Serialize;
use thiserror::Error;

use crate::models::record::Field;

/// Main error type for the docmerge library.
#[derive(Error, Debug)]
pub enum DocmergeError {
    /// Rule table could not be compiled.
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    /// Document reader error.
    #[error("reader error: {0}")]
    Reader(#[from] ReaderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while compiling a rule table.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A configured pattern is not a valid regular expression.
    #[error("invalid pattern #{index} for {field}: {source}")]
    InvalidPattern {
        field: Field,
        index: usize,
        #[source]
        source: regex::Error,
    },

    /// A field entry exists but lists no patterns.
    #[error("no patterns configured for {0}")]
    EmptyField(Field),
}

/// Errors raised by the upstream text readers.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// File extension has no reader.
    #[error("unsupported document format: {0}")]
    Unsupported(String),

    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A recovered, non-fatal condition observed during a consolidation run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    /// Upstream text extraction failed; the document became an all-N/A row.
    #[error("{source_id}: document unreadable ({reason})")]
    SourceUnreadable { source_id: String, reason: String },

    /// No rule matched the field.
    #[error("{source_id}: {field} not found")]
    FieldNotFound { source_id: String, field: Field },

    /// A date-shaped match could not be converted to a calendar date.
    #[error("{source_id}: {field} '{raw}' is not a valid date")]
    DateParseFailure {
        source_id: String,
        field: Field,
        raw: String,
    },

    /// A captured amount is not numeric; the text was kept as-is.
    #[error("{source_id}: {field} '{raw}' is not a number")]
    AmountParseFailure {
        source_id: String,
        field: Field,
        raw: String,
    },

    /// Primary document without a client identity; its row was dropped.
    #[error("{source_id}: no client found, row dropped")]
    MergeKeyMissing { source_id: String },

    /// More secondary documents than registered primary rows.
    #[error("{source_id}: secondary #{position} has no primary row to attach to ({primary_count} rows)")]
    SecondaryOverflow {
        source_id: String,
        position: usize,
        primary_count: usize,
    },
}

impl Issue {
    /// Identifier of the document the issue belongs to.
    pub fn source_id(&self) -> &str {
        match self {
            Issue::SourceUnreadable { source_id, .. }
            | Issue::FieldNotFound { source_id, .. }
            | Issue::DateParseFailure { source_id, .. }
            | Issue::AmountParseFailure { source_id, .. }
            | Issue::MergeKeyMissing { source_id }
            | Issue::SecondaryOverflow { source_id, .. } => source_id,
        }
    }
}

/// Result type for the docmerge library.
pub type Result<T> = std::result::Result<T, DocmergeError>;
