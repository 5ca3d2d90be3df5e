//! Core library for invoice and quotation consolidation.
//!
//! This crate provides:
//! - Ordered, first-match-wins field extraction rules
//! - Spanish date, Chilean amount and client-name normalization
//! - Positional merge of quotations into invoice rows
//! - PDF, DOCX and plain-text readers (feature `readers`)

pub mod error;
pub mod extract;
pub mod merge;
pub mod models;
#[cfg(feature = "readers")]
pub mod reader;
pub mod text;

pub use error::{DocmergeError, Issue, ReaderError, Result, RuleError};
pub use extract::rules::{Amount, DateOutcome, FieldRules, PatternSpec, RuleEngine, RuleSet};
pub use extract::{DocumentParser, ExtractionResult, RuleParser};
pub use merge::{Consolidation, ConsolidatedRow, MergeEngine, MergeKey, OutputRow, COLUMNS};
pub use models::config::{DocmergeConfig, OutputFormat};
pub use models::document::{DocumentContent, SourceDocument};
pub use models::record::{DocumentKind, ExtractedRecord, Field};
#[cfg(feature = "readers")]
pub use reader::{read_document, read_text};
