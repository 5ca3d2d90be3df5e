//! Rule tables and the field normalizers applied to their captures.

pub mod amounts;
pub mod client;
pub mod dates;
pub mod engine;
pub mod patterns;

pub use amounts::{format_amount, parse_amount, Amount};
pub use client::clean_client_name;
pub use dates::{normalize_date_text, normalize_match, DateOutcome};
pub use engine::{first_match, Extraction, FieldMatch, RuleEngine};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::record::Field;

/// Date shape a pattern's capture groups follow.
///
/// Tagged patterns capture day, month and year as groups 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `<day> de <month-name> de|del <year>`.
    Long,
    /// `<day>[sep]<month>[sep]<year>`, separator space, dash or slash.
    Short,
}

/// One pattern alternative for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Regular expression. Group 1 is the value when present.
    pub pattern: String,

    /// Date shape of the capture groups, for date fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DateFormat>,
}

impl PatternSpec {
    /// Pattern whose value is capture group 1.
    pub fn bare(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            format: None,
        }
    }

    /// Pattern capturing day, month and year in the given shape.
    pub fn dated(pattern: impl Into<String>, format: DateFormat) -> Self {
        Self {
            pattern: pattern.into(),
            format: Some(format),
        }
    }
}

/// Ordered pattern alternatives for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRules {
    /// Match case-sensitively. Only keyword-label fields need this.
    #[serde(default)]
    pub case_sensitive: bool,

    /// Collect every capture of the winning pattern, joined with this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join: Option<String>,

    /// Patterns in priority order.
    pub patterns: Vec<PatternSpec>,
}

impl FieldRules {
    /// Case-insensitive rules with a single value per field.
    pub fn new(patterns: Vec<PatternSpec>) -> Self {
        Self {
            case_sensitive: false,
            join: None,
            patterns,
        }
    }

    /// Match case-sensitively.
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Join all captures of the winning pattern with `separator`.
    pub fn joined(mut self, separator: impl Into<String>) -> Self {
        self.join = Some(separator.into());
        self
    }
}

/// Field name to ordered pattern list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<Field, FieldRules>);

impl RuleSet {
    /// Empty rule set; every field resolves to "not found".
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rules of a field.
    pub fn with_field(mut self, field: Field, rules: FieldRules) -> Self {
        self.0.insert(field, rules);
        self
    }

    /// Rules of a field.
    pub fn get(&self, field: Field) -> Option<&FieldRules> {
        self.0.get(&field)
    }

    /// Iterate over configured fields.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldRules)> {
        self.0.iter().map(|(f, r)| (*f, r))
    }
}

/// Extraction match with the rule that produced it.
///
/// Shared by both document kinds for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    /// Field the rule belongs to.
    pub field: Field,
    /// Zero-based index of the rule in the field's list.
    pub rule: usize,
    /// Whole matched text.
    pub raw: String,
}
