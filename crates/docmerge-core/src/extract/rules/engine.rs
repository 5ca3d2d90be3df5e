//! Ordered, first-match-wins field rule evaluation.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use super::{DateFormat, FieldRules, RuleSet};
use crate::error::RuleError;
use crate::models::record::Field;
use crate::models::sentinel::NOT_FOUND;

/// Try `attempt` on each candidate in order and return the first hit with
/// its index. Later candidates are never tried after a hit.
pub fn first_match<P, T>(
    candidates: &[P],
    mut attempt: impl FnMut(&P) -> Option<T>,
) -> Option<(usize, T)> {
    candidates
        .iter()
        .enumerate()
        .find_map(|(index, candidate)| attempt(candidate).map(|hit| (index, hit)))
}

/// A successful field match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    /// Captured value (group 1, or the whole match for group-less patterns).
    pub value: String,
    /// Capture groups 1..n; `None` for groups that did not participate.
    pub groups: Vec<Option<String>>,
    /// Whole matched text.
    pub raw: String,
    /// Zero-based index of the rule that matched.
    pub rule: usize,
    /// Date shape of the matching rule, if tagged.
    pub format: Option<DateFormat>,
}

/// Outcome of evaluating a field's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Extraction {
    /// A rule matched.
    Found(FieldMatch),
    /// No rule matched.
    NotFound,
}

impl Extraction {
    /// Captured value, or the "not found" placeholder.
    pub fn value(&self) -> &str {
        match self {
            Extraction::Found(m) => &m.value,
            Extraction::NotFound => NOT_FOUND,
        }
    }

    /// The match, if any.
    pub fn as_match(&self) -> Option<&FieldMatch> {
        match self {
            Extraction::Found(m) => Some(m),
            Extraction::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }
}

/// Captured text before the rule index is known.
struct Captured {
    value: String,
    groups: Vec<Option<String>>,
    raw: String,
}

struct CompiledPattern {
    regex: Regex,
    format: Option<DateFormat>,
}

impl CompiledPattern {
    fn capture(&self, text: &str) -> Option<Captured> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0)?.as_str();
        let groups: Vec<Option<String>> = caps
            .iter()
            .skip(1)
            .map(|g| g.map(|m| m.as_str().trim().to_string()))
            .collect();
        let value = caps
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or(whole)
            .trim()
            .to_string();

        Some(Captured {
            value,
            groups,
            raw: whole.to_string(),
        })
    }

    fn capture_all(&self, text: &str, separator: &str) -> Option<Captured> {
        let mut values = Vec::new();
        let mut span: Option<(usize, usize)> = None;

        for caps in self.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let value = caps.get(1).unwrap_or(whole).as_str().trim();
            if value.is_empty() {
                continue;
            }
            values.push(value.to_string());
            span = Some(match span {
                Some((start, _)) => (start, whole.end()),
                None => (whole.start(), whole.end()),
            });
        }

        let (start, end) = span?;
        Some(Captured {
            value: values.join(separator),
            groups: values.into_iter().map(Some).collect(),
            raw: text[start..end].to_string(),
        })
    }
}

struct CompiledField {
    patterns: Vec<CompiledPattern>,
    join: Option<String>,
}

impl CompiledField {
    fn compile(field: Field, rules: &FieldRules) -> Result<Self, RuleError> {
        if rules.patterns.is_empty() {
            return Err(RuleError::EmptyField(field));
        }

        let patterns = rules
            .patterns
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                RegexBuilder::new(&spec.pattern)
                    .case_insensitive(!rules.case_sensitive)
                    .build()
                    .map(|regex| CompiledPattern {
                        regex,
                        format: spec.format,
                    })
                    .map_err(|source| RuleError::InvalidPattern {
                        field,
                        index,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            join: rules.join.clone(),
        })
    }
}

/// Field rule engine over an immutable, compiled rule set.
pub struct RuleEngine {
    fields: HashMap<Field, CompiledField>,
}

impl RuleEngine {
    /// Compile a rule set.
    pub fn new(rules: &RuleSet) -> Result<Self, RuleError> {
        let fields = rules
            .iter()
            .map(|(field, field_rules)| {
                CompiledField::compile(field, field_rules).map(|compiled| (field, compiled))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { fields })
    }

    /// Evaluate a field's rules in priority order against normalized text.
    pub fn extract(&self, text: &str, field: Field) -> Extraction {
        let Some(compiled) = self.fields.get(&field) else {
            return Extraction::NotFound;
        };

        let hit = first_match(&compiled.patterns, |pattern| match &compiled.join {
            Some(separator) => pattern.capture_all(text, separator),
            None => pattern.capture(text),
        });

        match hit {
            Some((rule, captured)) => Extraction::Found(FieldMatch {
                value: captured.value,
                groups: captured.groups,
                raw: captured.raw,
                rule,
                format: compiled.patterns[rule].format,
            }),
            None => Extraction::NotFound,
        }
    }

    /// Check whether the engine has rules for a field.
    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }
}
