//! End-to-end consolidation over document text with the built-in rules.

use docmerge_core::models::sentinel::{DATE_FORMAT_ERROR, NOT_AVAILABLE, NOT_FOUND, NO_SECONDARY};
use docmerge_core::{
    Amount, DocmergeConfig, Field, FieldRules, Issue, MergeEngine, PatternSpec, SourceDocument,
};
use pretty_assertions::assert_eq;

fn invoice(id: &str, client: &str, number: u32, total: &str) -> SourceDocument {
    let text = format!(
        "ENERGIA SERVICIOS SPA\n\
         FACTURA ELECTRONICA Nº{number}\n\
         SEÑOR(ES): {client}\n\
         R.U.T.: 76.555.400-4\n\
         GIRO: GENERACION ELECTRICA\n\
         Fecha Emision: 14 de Agosto del 2025\n\
         - SV_65000 mantenimiento preventivo\n\
         TOTAL $ {total}\n"
    );
    SourceDocument::text(id, &text)
}

fn quotation(id: &str, number: &str, client: &str, dollars: &str) -> SourceDocument {
    let text = format!(
        "COTIZACIÓN Nº {number}\n\
         Fecha: 2 de julio de 2025\n\
         Atención: {client}\n\
         TOTAL US$ {dollars}\n"
    );
    SourceDocument::text(id, &text)
}

fn engine() -> MergeEngine {
    MergeEngine::with_default_rules().unwrap()
}

#[test]
fn test_duplicate_clients_and_positional_merge() {
    let result = engine().consolidate(
        &[
            invoice("f1.pdf", "Acme SpA", 101, "1.000"),
            invoice("f2.pdf", "Beta Ltda", 102, "2.500.000"),
            invoice("f3.pdf", "ACME SPA", 103, "3.000,50"),
        ],
        &[
            quotation("q1.docx", "Q-1", "Acme SpA", "100"),
            quotation("q2.docx", "Q-2", "Beta Ltda", "1.200,50"),
        ],
    );

    let keys: Vec<String> = result.rows.iter().map(|r| r.key.to_string()).collect();
    assert_eq!(keys, vec!["ACME SPA", "BETA LTDA", "ACME SPA_2"]);

    let out = &result.output;
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].client, "ACME SPA");
    assert_eq!(out[2].client, "ACME SPA");
    assert_eq!(out[0].file_name, "f1.pdf");
    assert_eq!(out[2].number, "103");

    assert_eq!(out[0].quotation_number, "Q-1");
    assert_eq!(out[0].quotation_date, "02-07-25");
    assert_eq!(out[0].dollars.as_f64(), Some(100.0));
    assert_eq!(out[1].quotation_number, "Q-2");
    assert_eq!(out[1].dollars.as_f64(), Some(1200.5));

    assert_eq!(out[2].quotation_number, NO_SECONDARY);
    assert_eq!(out[2].quotation_date, NO_SECONDARY);
    assert_eq!(out[2].dollars, Amount::Text(NO_SECONDARY.to_string()));

    assert_eq!(out[0].pesos.as_f64(), Some(1000.0));
    assert_eq!(out[1].pesos.as_f64(), Some(2_500_000.0));
    assert_eq!(out[2].pesos.as_f64(), Some(3000.5));
    assert_eq!(out[0].date, "14-08-25");
    assert_eq!(out[0].description, "SV_65000");

    assert_eq!(result.rows[0].secondary_source.as_deref(), Some("q1.docx"));
    assert_eq!(result.rows[2].secondary_source, None);

    // Quotations carry no euro amount.
    assert!(result
        .issues
        .iter()
        .all(|i| matches!(i, Issue::FieldNotFound { field: Field::Euros, .. })));
    assert_eq!(result.issues.len(), 2);
}

#[test]
fn test_unreadable_document_is_isolated() {
    let result = engine().consolidate(
        &[
            invoice("f1.pdf", "Acme", 1, "10"),
            SourceDocument::unreadable("f2.pdf", "PDF is encrypted"),
            invoice("f3.pdf", "Beta", 3, "30"),
        ],
        &[],
    );

    let out = &result.output;
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].client, "ACME");
    assert_eq!(out[2].client, "BETA");
    assert_eq!(out[2].pesos.as_f64(), Some(30.0));

    // Primary columns are unavailable; no quotation was attached to the row
    let broken = &out[1];
    assert_eq!(broken.pesos, Amount::Text(NOT_AVAILABLE.to_string()));
    assert_eq!(
        broken.cells(),
        [
            "f2.pdf",
            NOT_AVAILABLE,
            NOT_AVAILABLE,
            NOT_AVAILABLE,
            NO_SECONDARY,
            NO_SECONDARY,
            NO_SECONDARY,
            NOT_AVAILABLE,
            NO_SECONDARY,
            NOT_AVAILABLE,
        ]
        .map(String::from)
    );

    assert_eq!(
        result.issues,
        vec![Issue::SourceUnreadable {
            source_id: "f2.pdf".to_string(),
            reason: "PDF is encrypted".to_string(),
        }]
    );
}

#[test]
fn test_unmatched_field_is_not_found() {
    let text = "FACTURA ELECTRONICA Nº7 SEÑOR(ES): Gamma GIRO: MINERIA sin montos";
    let result = engine().consolidate(&[SourceDocument::text("f.pdf", text)], &[]);

    let row = &result.output[0];
    assert_eq!(row.client, "GAMMA");
    assert_eq!(row.number, "7");
    assert_eq!(row.date, NOT_FOUND);
    assert_eq!(row.pesos, Amount::Text(NOT_FOUND.to_string()));
    assert_eq!(row.description, NOT_FOUND);

    let missing: Vec<Field> = result
        .issues
        .iter()
        .filter_map(|i| match i {
            Issue::FieldNotFound { field, .. } => Some(*field),
            _ => None,
        })
        .collect();
    assert_eq!(missing, vec![Field::Date, Field::Total, Field::Description]);
}

#[test]
fn test_invalid_date_keeps_row() {
    let text = "SEÑOR(ES): Delta FECHA Emision: 32 de Enero de 2020 TOTAL $ 5";
    let result = engine().consolidate(&[SourceDocument::text("f.pdf", text)], &[]);

    assert_eq!(result.output.len(), 1);
    assert_eq!(result.output[0].date, DATE_FORMAT_ERROR);
    assert!(result
        .issues
        .iter()
        .any(|i| matches!(i, Issue::DateParseFailure { raw, .. } if raw.contains("32 de Enero"))));
}

#[test]
fn test_missing_client_drops_row_without_taking_a_slot() {
    let result = engine().consolidate(
        &[
            SourceDocument::text("f0.pdf", "FACTURA ELECTRONICA Nº1 TOTAL $ 10"),
            invoice("f1.pdf", "Acme", 2, "20"),
        ],
        &[quotation("q1.docx", "Q-1", "Acme", "5")],
    );

    assert_eq!(result.output.len(), 1);
    assert_eq!(result.output[0].file_name, "f1.pdf");
    assert_eq!(result.output[0].quotation_number, "Q-1");
    assert!(result.issues.contains(&Issue::MergeKeyMissing {
        source_id: "f0.pdf".to_string()
    }));
}

#[test]
fn test_secondaries_attach_by_position_not_content() {
    let result = engine().consolidate(
        &[invoice("f1.pdf", "Acme", 1, "10"), invoice("f2.pdf", "Beta", 2, "20")],
        &[
            quotation("q-beta.docx", "Q-B", "Beta", "2"),
            quotation("q-acme.docx", "Q-A", "Acme", "1"),
        ],
    );

    // Uploaded out of order, so each quotation lands on the other client.
    assert_eq!(result.output[0].client, "ACME");
    assert_eq!(result.output[0].quotation_number, "Q-B");
    assert_eq!(result.output[1].client, "BETA");
    assert_eq!(result.output[1].quotation_number, "Q-A");
}

#[test]
fn test_overflow_secondaries_are_reported() {
    let result = engine().consolidate(
        &[invoice("f1.pdf", "Acme", 1, "10")],
        &[
            quotation("q1.docx", "Q-1", "Acme", "1"),
            quotation("q2.docx", "Q-2", "Acme", "2"),
            quotation("q3.docx", "Q-3", "Acme", "3"),
        ],
    );

    assert_eq!(result.output.len(), 1);
    assert_eq!(result.output[0].quotation_number, "Q-1");

    let overflow: Vec<(&str, usize)> = result
        .issues
        .iter()
        .filter_map(|i| match i {
            Issue::SecondaryOverflow {
                source_id,
                position,
                primary_count,
            } => {
                assert_eq!(*primary_count, 1);
                Some((source_id.as_str(), *position))
            }
            _ => None,
        })
        .collect();
    assert_eq!(overflow, vec![("q2.docx", 2), ("q3.docx", 3)]);

    // Ignored documents are not parsed.
    assert_eq!(result.issues_for("q3.docx").count(), 1);
}

#[test]
fn test_description_codes_are_joined() {
    let text = "SEÑOR(ES): Acme GIRO: X \
                - SV_65000 mantenimiento - CW_DRIV conductor - cw_lookalike ignorado \
                TOTAL $ 1";
    let result = engine().consolidate(&[SourceDocument::text("f.pdf", text)], &[]);
    assert_eq!(result.output[0].description, "SV_65000 + CW_DRIV");
}

#[test]
fn test_configured_rules_replace_builtin_ones() {
    let mut config = DocmergeConfig::default();
    config.rules.primary = config.rules.primary.with_field(
        Field::Total,
        FieldRules::new(vec![PatternSpec::bare(r"NETO\s*\$?\s*([\d.]+)")]),
    );

    let engine = MergeEngine::from_config(&config).unwrap();
    let result = engine.consolidate(
        &[SourceDocument::text("f.pdf", "SEÑOR(ES): Acme NETO $ 6.492.306 TOTAL $ 7.725.844")],
        &[],
    );
    assert_eq!(result.output[0].pesos.as_f64(), Some(6_492_306.0));
}

#[test]
fn test_invalid_configured_pattern_is_rejected() {
    let mut config = DocmergeConfig::default();
    config.rules.secondary = config.rules.secondary.with_field(
        Field::Euros,
        FieldRules::new(vec![PatternSpec::bare("(EUR")]),
    );
    assert!(MergeEngine::from_config(&config).is_err());
}
