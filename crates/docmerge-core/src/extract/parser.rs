//! Rule-based document parser.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Issue, RuleError};
use crate::models::document::{DocumentContent, SourceDocument};
use crate::models::record::{DocumentKind, ExtractedRecord, Field, FieldKind};
use crate::models::sentinel::{DATE_FORMAT_ERROR, NOT_FOUND};

use super::rules::{
    clean_client_name, dates::normalize_match, DateOutcome, Extraction, RuleEngine, RuleHit,
    RuleSet,
};

/// Result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted record; every field of the document kind is set.
    pub record: ExtractedRecord,
    /// Recovered problems (missing fields, bad dates, unreadable source).
    pub issues: Vec<Issue>,
    /// Which rule produced each found field.
    pub hits: Vec<RuleHit>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for document parsing.
pub trait DocumentParser {
    /// Document kind this parser extracts.
    fn kind(&self) -> DocumentKind;

    /// Parse a document into a record. Never fails: problems are reported
    /// as issues and placeholders.
    fn parse(&self, document: &SourceDocument) -> ExtractionResult;
}

/// Parser evaluating a rule set over a document's fields.
pub struct RuleParser {
    kind: DocumentKind,
    engine: RuleEngine,
}

impl RuleParser {
    /// Create a parser for `kind` from a rule set.
    pub fn new(kind: DocumentKind, rules: &RuleSet) -> Result<Self, RuleError> {
        Ok(Self {
            kind,
            engine: RuleEngine::new(rules)?,
        })
    }

    /// Parser for invoices with the built-in rules.
    pub fn primary() -> Result<Self, RuleError> {
        Self::new(DocumentKind::Primary, &super::rules::patterns::primary_rules())
    }

    /// Parser for quotations with the built-in rules.
    pub fn secondary() -> Result<Self, RuleError> {
        Self::new(DocumentKind::Secondary, &super::rules::patterns::secondary_rules())
    }

    /// Access the underlying rule engine.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    fn resolve(&self, source_id: &str, field: Field, extraction: &Extraction, issues: &mut Vec<Issue>) -> String {
        let Extraction::Found(m) = extraction else {
            debug!("{}: no rule matched {}", source_id, field);
            issues.push(Issue::FieldNotFound {
                source_id: source_id.to_string(),
                field,
            });
            return NOT_FOUND.to_string();
        };

        match field.kind() {
            FieldKind::Text | FieldKind::Amount => m.value.clone(),
            FieldKind::Client => {
                let cleaned = clean_client_name(&m.value);
                if cleaned.is_empty() {
                    debug!("{}: client capture '{}' is empty after cleanup", source_id, m.value);
                    issues.push(Issue::FieldNotFound {
                        source_id: source_id.to_string(),
                        field,
                    });
                    NOT_FOUND.to_string()
                } else {
                    cleaned
                }
            }
            FieldKind::Date => match normalize_match(m) {
                DateOutcome::Normalized(date) => date,
                DateOutcome::FormatError => {
                    warn!("{}: cannot parse {} from '{}'", source_id, field, m.raw);
                    issues.push(Issue::DateParseFailure {
                        source_id: source_id.to_string(),
                        field,
                        raw: m.raw.clone(),
                    });
                    DATE_FORMAT_ERROR.to_string()
                }
                DateOutcome::NotFound => NOT_FOUND.to_string(),
            },
        }
    }
}

impl DocumentParser for RuleParser {
    fn kind(&self) -> DocumentKind {
        self.kind
    }

    fn parse(&self, document: &SourceDocument) -> ExtractionResult {
        let start = Instant::now();
        let mut issues = Vec::new();
        let mut hits = Vec::new();

        let text = match &document.content {
            DocumentContent::Text(text) => text,
            DocumentContent::Unreadable(reason) => {
                warn!("{}: document unreadable: {}", document.id, reason);
                return ExtractionResult {
                    record: ExtractedRecord::unreadable(&document.id, self.kind),
                    issues: vec![Issue::SourceUnreadable {
                        source_id: document.id.clone(),
                        reason: reason.clone(),
                    }],
                    hits,
                    processing_time_ms: start.elapsed().as_millis() as u64,
                };
            }
        };

        debug!(
            "Parsing {} document {} from {} characters of text",
            self.kind,
            document.id,
            text.len()
        );

        let mut record = ExtractedRecord::new(&document.id, self.kind);
        for &field in self.kind.fields() {
            let extraction = self.engine.extract(text, field);
            if let Some(m) = extraction.as_match() {
                hits.push(RuleHit {
                    field,
                    rule: m.rule,
                    raw: m.raw.clone(),
                });
            }
            let value = self.resolve(&document.id, field, &extraction, &mut issues);
            record.set(field, value);
        }

        ExtractionResult {
            record,
            issues,
            hits,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
