//! Consolidation of primary and secondary documents into output rows.
//!
//! Primary documents are registered in upload order under a client key.
//! Secondary documents are then attached strictly by position: the i-th
//! secondary goes to the i-th registered row, whatever client it names.

mod emit;
mod key;

pub use emit::{OutputRow, COLUMNS};
pub use key::MergeKey;

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Issue, RuleError};
use crate::extract::{DocumentParser, RuleParser};
use crate::models::config::DocmergeConfig;
use crate::models::document::SourceDocument;
use crate::models::record::{DocumentKind, ExtractedRecord, Field};

/// A registered primary record, possibly updated by one secondary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedRow {
    /// Unique row key.
    pub key: MergeKey,
    /// Primary fields, plus secondary fields once merged.
    pub record: ExtractedRecord,
    /// Id of the secondary document merged into the row.
    pub secondary_source: Option<String>,
}

/// Outcome of a consolidation run.
#[derive(Debug, Clone, Serialize)]
pub struct Consolidation {
    /// Registered rows in registration order.
    pub rows: Vec<ConsolidatedRow>,
    /// Output rows, one per registered row, same order.
    pub output: Vec<OutputRow>,
    /// Everything recovered along the way.
    pub issues: Vec<Issue>,
}

impl Consolidation {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Issues recorded for one document.
    pub fn issues_for<'a>(&'a self, source_id: &'a str) -> impl Iterator<Item = &'a Issue> + 'a {
        self.issues.iter().filter(move |i| i.source_id() == source_id)
    }
}

/// Ordered key registry for one run.
#[derive(Default)]
struct Registry {
    rows: Vec<ConsolidatedRow>,
    occurrences: HashMap<String, usize>,
}

impl Registry {
    fn register(&mut self, base: String, record: ExtractedRecord) -> &MergeKey {
        let ordinal = self
            .occurrences
            .entry(base.clone())
            .and_modify(|n| *n += 1)
            .or_insert(1);
        let key = MergeKey::new(base, *ordinal);

        self.rows.push(ConsolidatedRow {
            key,
            record,
            secondary_source: None,
        });
        &self.rows[self.rows.len() - 1].key
    }
}

/// Consolidation engine binding a parser to each document kind.
pub struct MergeEngine<P: DocumentParser = RuleParser> {
    primary: P,
    secondary: P,
}

impl MergeEngine<RuleParser> {
    /// Engine with the built-in rule tables.
    pub fn with_default_rules() -> Result<Self, RuleError> {
        Ok(Self::new(RuleParser::primary()?, RuleParser::secondary()?))
    }

    /// Engine with the rule tables of a configuration.
    pub fn from_config(config: &DocmergeConfig) -> crate::Result<Self> {
        Ok(Self::new(
            RuleParser::new(DocumentKind::Primary, &config.rules.primary)?,
            RuleParser::new(DocumentKind::Secondary, &config.rules.secondary)?,
        ))
    }
}

impl<P: DocumentParser> MergeEngine<P> {
    pub fn new(primary: P, secondary: P) -> Self {
        Self { primary, secondary }
    }

    /// Consolidate one batch. Documents are taken in slice order, which is
    /// the upload order. Never fails; problems end up in `issues`.
    pub fn consolidate(
        &self,
        primaries: &[SourceDocument],
        secondaries: &[SourceDocument],
    ) -> Consolidation {
        info!(
            "Consolidating {} primary and {} secondary documents",
            primaries.len(),
            secondaries.len()
        );

        let mut registry = Registry::default();
        let mut issues = Vec::new();

        for document in primaries {
            let result = self.primary.parse(document);
            issues.extend(result.issues);

            let client = result.record.get(Field::Client).unwrap_or_default();
            match MergeKey::base_for(client) {
                Some(base) => {
                    let key = registry.register(base, result.record);
                    debug!("{}: registered as {}", document.id, key);
                }
                None => {
                    warn!("{}: no client found, row dropped", document.id);
                    issues.push(Issue::MergeKeyMissing {
                        source_id: document.id.clone(),
                    });
                }
            }
        }

        let primary_count = registry.rows.len();
        for (position, document) in secondaries.iter().enumerate() {
            let Some(row) = registry.rows.get_mut(position) else {
                warn!(
                    "{}: secondary #{} ignored, only {} primary rows",
                    document.id,
                    position + 1,
                    primary_count
                );
                issues.push(Issue::SecondaryOverflow {
                    source_id: document.id.clone(),
                    position: position + 1,
                    primary_count,
                });
                continue;
            };

            let result = self.secondary.parse(document);
            issues.extend(result.issues);
            row.record.absorb(&result.record);
            row.secondary_source = Some(document.id.clone());
            debug!("{}: merged into {}", document.id, row.key);
        }

        let output = registry
            .rows
            .iter()
            .map(|row| emit::emit_row(row, &mut issues))
            .collect();

        info!(
            "Consolidated {} rows with {} issues",
            registry.rows.len(),
            issues.len()
        );

        Consolidation {
            rows: registry.rows,
            output,
            issues,
        }
    }
}
