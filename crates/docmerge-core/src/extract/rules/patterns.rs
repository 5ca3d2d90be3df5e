//! Default rule tables for Chilean electronic invoices and quotations.
//!
//! Patterns run against whitespace-normalized, single-line text, so free
//! text captures stop at the next known label instead of a line break.

use super::{DateFormat, FieldRules, PatternSpec, RuleSet};
use crate::models::record::Field;

/// Labels that follow the client name on the invoice header.
///
/// Word labels only end the name when a colon follows, so names such as
/// `COMERCIAL LA CIUDAD SPA` stay whole.
const CLIENT_END: &str = concat!(
    r"(?:\bR\.?\s?U\.?\s?T\b",
    r"|\b(?:GIRO|DIRECCI[OÓ]N|COMUNA|CIUDAD|FECHA|TEL[EÉ]FONO)\s*:",
    r"|\bFECHA\s+(?:DE\s+)?EMISI[OÓ]N\b",
    r"|$)"
);

/// Amount in dot-thousands, comma-decimal notation.
const AMOUNT: &str = r"(\d[\d.]*(?:,\d+)?)";

/// Long date body: day, month name, year.
const LONG_DATE: &str = r"(\d{1,2})\s+de\s+(\p{L}+)\s+del?\s+(\d{4})";

/// Short date body: day, month, year.
const SHORT_DATE: &str = r"(\d{1,2})[\s/\-](\d{1,2})[\s/\-](\d{4}|\d{2})\b";

// Invoice (primary document)

/// `SEÑOR(ES): <name>` header label.
pub fn client_label() -> String {
    format!(r"SE[ÑN]OR\s*\(\s*ES\s*\)\s*:?\s*(.+?)\s*{CLIENT_END}")
}

/// Alternative client labels (`SEÑORES:`, `SR(ES).:`, `CLIENTE:`).
pub fn client_alt_label() -> String {
    format!(r"\b(?:SE[ÑN]ORES|SR\s*\(\s*ES\s*\)|SRES?\.?|CLIENTE)\s*:\s*(.+?)\s*{CLIENT_END}")
}

/// `Fecha Emisión:` followed by a long date.
pub fn issue_date_long() -> String {
    format!(r"FECHA\s+(?:DE\s+)?EMISI[OÓ]N\s*:?\s*{LONG_DATE}")
}

/// `Fecha Emisión:` followed by a short date.
pub fn issue_date_short() -> String {
    format!(r"FECHA\s+(?:DE\s+)?EMISI[OÓ]N\s*:?\s*{SHORT_DATE}")
}

/// Any long date in the text.
pub fn any_long_date() -> String {
    format!(r"\b{LONG_DATE}\b")
}

/// `FACTURA ELECTRONICA Nº228`.
pub const INVOICE_NUMBER: &str = r"FACTURA\s+ELECTR[OÓ]NICA\s*N\s*[º°o]\.?\s*(\d+)";

/// Bare `Nº 228` or `FOLIO 228`.
pub const INVOICE_NUMBER_STANDALONE: &str = r"\b(?:N\s*[º°]|FOLIO)\s*:?\s*(\d+)";

/// `TOTAL $ 7.725.844`.
pub fn total_label() -> String {
    format!(r"\bTOTAL\s*:?\s*\$\s*{AMOUNT}")
}

/// `MONTO TOTAL: 7.725.844`.
pub fn total_amount_label() -> String {
    format!(r"MONTO\s+TOTAL\s*:?\s*\$?\s*{AMOUNT}")
}

/// Service code bullets such as `- SV_65000`.
pub const SERVICE_CODE: &str = r"-\s*([A-Z][A-Z0-9]*_[A-Z0-9_]+)\b";

/// `DESCRIPCION:` or `DETALLE:` up to the next column label.
pub const DESCRIPTION_LABEL: &str =
    r"(?:DESCRIPCI[OÓ]N|DETALLE)\s*:?\s*(.+?)\s*(?:CANTIDAD|PRECIO|VALOR|MONTO|TOTAL|$)";

// Quotation (secondary document)

/// `COTIZACIÓN Nº 1234`, `COTIZACION NRO: Q-12`.
pub const QUOTATION_NUMBER: &str =
    r"COTIZACI[OÓ]N\s*(?:N\s*[º°o]\.?|NRO\.?|N[UÚ]MERO|#)\s*:?\s*([A-Z0-9][A-Z0-9\-/]*)";

/// `COT-1234`.
pub const QUOTATION_NUMBER_SHORT: &str = r"\bCOT[\s.\-]*(\d+)";

/// `Fecha:` followed by a long date.
pub fn quotation_date_long() -> String {
    format!(r"FECHA\s*:?\s*{LONG_DATE}")
}

/// `Fecha:` followed by a short date.
pub fn quotation_date_short() -> String {
    format!(r"FECHA\s*:?\s*{SHORT_DATE}")
}

/// `TOTAL US$ 1.200,50`.
pub fn dollars_total() -> String {
    format!(r"TOTAL\s*:?\s*(?:US\$|\b(?:USD|D[OÓ]LARES)\b)\s*:?\s*{AMOUNT}")
}

/// `US$ 1.200,50` anywhere.
pub fn dollars_any() -> String {
    format!(r"(?:US\$|\bUSD\b)\s*{AMOUNT}")
}

/// `TOTAL EUR 980`.
pub fn euros_total() -> String {
    format!(r"TOTAL\s*:?\s*(?:\bEUR(?:OS)?\b|€)\s*:?\s*{AMOUNT}")
}

/// `€ 980` anywhere.
pub fn euros_any() -> String {
    format!(r"(?:\bEUR(?:OS)?\b|€)\s*{AMOUNT}")
}

/// Rules for the invoice fields.
pub fn primary_rules() -> RuleSet {
    RuleSet::new()
        .with_field(
            Field::Client,
            FieldRules::new(vec![
                PatternSpec::bare(client_label()),
                PatternSpec::bare(client_alt_label()),
            ]),
        )
        .with_field(
            Field::Date,
            FieldRules::new(vec![
                PatternSpec::dated(issue_date_long(), DateFormat::Long),
                PatternSpec::dated(issue_date_short(), DateFormat::Short),
                PatternSpec::dated(any_long_date(), DateFormat::Long),
            ]),
        )
        .with_field(
            Field::Number,
            FieldRules::new(vec![
                PatternSpec::bare(INVOICE_NUMBER),
                PatternSpec::bare(INVOICE_NUMBER_STANDALONE),
            ]),
        )
        .with_field(
            Field::Total,
            FieldRules::new(vec![
                PatternSpec::bare(total_label()),
                PatternSpec::bare(total_amount_label()),
            ]),
        )
        .with_field(
            Field::Description,
            FieldRules::new(vec![
                PatternSpec::bare(SERVICE_CODE),
                PatternSpec::bare(DESCRIPTION_LABEL),
            ])
            .case_sensitive()
            .joined(" + "),
        )
}

/// Rules for the quotation fields.
pub fn secondary_rules() -> RuleSet {
    RuleSet::new()
        .with_field(
            Field::QuotationNumber,
            FieldRules::new(vec![
                PatternSpec::bare(QUOTATION_NUMBER),
                PatternSpec::bare(QUOTATION_NUMBER_SHORT),
            ]),
        )
        .with_field(
            Field::QuotationDate,
            FieldRules::new(vec![
                PatternSpec::dated(quotation_date_long(), DateFormat::Long),
                PatternSpec::dated(quotation_date_short(), DateFormat::Short),
                PatternSpec::dated(any_long_date(), DateFormat::Long),
            ]),
        )
        .with_field(
            Field::Dollars,
            FieldRules::new(vec![
                PatternSpec::bare(dollars_total()),
                PatternSpec::bare(dollars_any()),
            ]),
        )
        .with_field(
            Field::Euros,
            FieldRules::new(vec![
                PatternSpec::bare(euros_total()),
                PatternSpec::bare(euros_any()),
            ]),
        )
}
