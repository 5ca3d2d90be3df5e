//! Extracted record models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::sentinel::{NOT_AVAILABLE, NOT_FOUND};

/// A field extracted from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Client (buyer) name on the invoice.
    Client,
    /// Invoice issue date.
    Date,
    /// Invoice number (folio).
    Number,
    /// Invoice total in pesos.
    Total,
    /// Service codes or free-text description.
    Description,
    /// Quotation identifier.
    QuotationNumber,
    /// Quotation date.
    QuotationDate,
    /// Quoted amount in US dollars.
    Dollars,
    /// Quoted amount in euros.
    Euros,
}

impl Field {
    /// Snake-case name, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Client => "client",
            Field::Date => "date",
            Field::Number => "number",
            Field::Total => "total",
            Field::Description => "description",
            Field::QuotationNumber => "quotation_number",
            Field::QuotationDate => "quotation_date",
            Field::Dollars => "dollars",
            Field::Euros => "euros",
        }
    }

    /// Post-processing applied to the raw capture.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Client => FieldKind::Client,
            Field::Date | Field::QuotationDate => FieldKind::Date,
            Field::Total | Field::Dollars | Field::Euros => FieldKind::Amount,
            Field::Number | Field::Description | Field::QuotationNumber => FieldKind::Text,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a field's capture is post-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Kept verbatim (trimmed).
    Text,
    /// Run through the client-name cleaner.
    Client,
    /// Normalized to `DD-MM-YY`.
    Date,
    /// Kept as text; converted to a number when rows are emitted.
    Amount,
}

/// Which side of the merge a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Financial document anchoring a row (invoice).
    Primary,
    /// Supplementary document merged by position (quotation).
    Secondary,
}

impl DocumentKind {
    /// Fields extracted from documents of this kind.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            DocumentKind::Primary => &[
                Field::Client,
                Field::Date,
                Field::Number,
                Field::Total,
                Field::Description,
            ],
            DocumentKind::Secondary => &[
                Field::QuotationNumber,
                Field::QuotationDate,
                Field::Dollars,
                Field::Euros,
            ],
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Primary => f.write_str("primary"),
            DocumentKind::Secondary => f.write_str("secondary"),
        }
    }
}

/// Field values extracted from one document.
///
/// Every field of the document kind is always present, holding either the
/// captured value or a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Source identifier (file name).
    pub source: String,

    /// Document kind the record was extracted as.
    pub kind: DocumentKind,

    /// Field values.
    fields: BTreeMap<Field, String>,
}

impl ExtractedRecord {
    /// Create a record with every field set to "not found".
    pub fn new(source: impl Into<String>, kind: DocumentKind) -> Self {
        Self::filled(source, kind, NOT_FOUND)
    }

    /// Create the record of a document whose text could not be obtained.
    pub fn unreadable(source: impl Into<String>, kind: DocumentKind) -> Self {
        Self::filled(source, kind, NOT_AVAILABLE)
    }

    fn filled(source: impl Into<String>, kind: DocumentKind, value: &str) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|f| (*f, value.to_string()))
            .collect();
        Self {
            source: source.into(),
            kind,
            fields,
        }
    }

    /// Set a field value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// Get a field value, if the record carries the field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Iterate over all fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Overwrite-union another record's fields into this one.
    pub fn absorb(&mut self, other: &ExtractedRecord) {
        for (field, value) in &other.fields {
            self.fields.insert(*field, value.clone());
        }
    }
}
