//! Extract command - show the fields of a single document.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use docmerge_core::reader::read_document;
use docmerge_core::{DocumentKind, DocumentParser, ExtractionResult, RuleParser};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, DOCX or TXT)
    #[arg(required = true)]
    input: PathBuf,

    /// Document kind to extract
    #[arg(short, long, value_enum, default_value = "primary")]
    kind: KindArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ExtractFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum KindArg {
    /// Invoice
    Primary,
    /// Quotation
    Secondary,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Primary => DocumentKind::Primary,
            KindArg::Secondary => DocumentKind::Secondary,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ExtractFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let kind = DocumentKind::from(args.kind);

    let rules = match kind {
        DocumentKind::Primary => &config.rules.primary,
        DocumentKind::Secondary => &config.rules.secondary,
    };
    let parser = RuleParser::new(kind, rules)?;

    info!("Extracting {} fields from {}", kind, args.input.display());
    let document = read_document(&args.input);
    let result = parser.parse(&document);

    match args.format {
        ExtractFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        ExtractFormat::Text => print!("{}", format_text(&result)),
    }

    Ok(())
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({})\n",
        style(&result.record.source).bold(),
        result.record.kind
    ));
    for (field, value) in result.record.iter() {
        let rule = result
            .hits
            .iter()
            .find(|hit| hit.field == field)
            .map(|hit| format!("  [rule {}]", hit.rule + 1))
            .unwrap_or_default();
        output.push_str(&format!("  {:<17} {}{}\n", field.name(), value, rule));
    }

    if !result.issues.is_empty() {
        output.push('\n');
        for issue in &result.issues {
            output.push_str(&format!("  - {}\n", issue));
        }
    }

    output.push_str(&format!("\nProcessed in {}ms\n", result.processing_time_ms));
    output
}
