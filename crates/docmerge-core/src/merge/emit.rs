//! Conversion of consolidated rows into the fixed output schema.

use serde::Serialize;
use tracing::warn;

use super::ConsolidatedRow;
use crate::error::Issue;
use crate::extract::rules::{parse_amount, Amount};
use crate::models::record::Field;
use crate::models::sentinel::{is_sentinel, NO_SECONDARY};

/// Output column names, in order.
pub const COLUMNS: [&str; 10] = [
    "FILE_NAME",
    "CLIENT",
    "DATE",
    "NUMBER",
    "QUOTATION_NUMBER",
    "QUOTATION_DATE",
    "DOLLARS",
    "PESOS",
    "EUROS",
    "DESCRIPTION",
];

/// One row of the consolidated sheet.
///
/// Monetary columns hold a number when the text parsed and the original
/// text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OutputRow {
    pub file_name: String,
    pub client: String,
    pub date: String,
    pub number: String,
    pub quotation_number: String,
    pub quotation_date: String,
    pub dollars: Amount,
    pub pesos: Amount,
    pub euros: Amount,
    pub description: String,
}

impl OutputRow {
    /// Cell values as display strings, in column order.
    pub fn cells(&self) -> [String; 10] {
        [
            self.file_name.clone(),
            self.client.clone(),
            self.date.clone(),
            self.number.clone(),
            self.quotation_number.clone(),
            self.quotation_date.clone(),
            self.dollars.to_string(),
            self.pesos.to_string(),
            self.euros.to_string(),
            self.description.clone(),
        ]
    }
}

/// Build the output row for a consolidated row.
///
/// Fields of a row without a merged secondary read as "no secondary".
pub(crate) fn emit_row(row: &ConsolidatedRow, issues: &mut Vec<Issue>) -> OutputRow {
    let text = |field: Field| row.record.get(field).unwrap_or(NO_SECONDARY).to_string();

    let primary_id = row.record.source.as_str();
    let secondary_id = row.secondary_source.as_deref().unwrap_or(primary_id);

    OutputRow {
        file_name: row.record.source.clone(),
        client: row.key.base().to_string(),
        date: text(Field::Date),
        number: text(Field::Number),
        quotation_number: text(Field::QuotationNumber),
        quotation_date: text(Field::QuotationDate),
        dollars: amount(&text(Field::Dollars), secondary_id, Field::Dollars, issues),
        pesos: amount(&text(Field::Total), primary_id, Field::Total, issues),
        euros: amount(&text(Field::Euros), secondary_id, Field::Euros, issues),
        description: text(Field::Description),
    }
}

fn amount(raw: &str, source_id: &str, field: Field, issues: &mut Vec<Issue>) -> Amount {
    let amount = parse_amount(raw);
    if !amount.is_number() && !is_sentinel(raw) {
        warn!("{}: {} '{}' is not a number, kept as text", source_id, field, raw);
        issues.push(Issue::AmountParseFailure {
            source_id: source_id.to_string(),
            field,
            raw: raw.to_string(),
        });
    }
    amount
}
