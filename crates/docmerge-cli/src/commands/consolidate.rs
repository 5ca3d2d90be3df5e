//! Consolidate command - merge invoices and quotations into one sheet.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use docmerge_core::reader::read_document;
use docmerge_core::{Consolidation, Issue, MergeEngine, OutputFormat, OutputRow, SourceDocument};

use super::{expand_inputs, load_config};

/// Arguments for the consolidate command.
#[derive(Args)]
pub struct ConsolidateArgs {
    /// Invoices (PDF, DOCX or TXT) in upload order; globs allowed
    #[arg(required = true)]
    primary: Vec<String>,

    /// Quotations in upload order; the n-th quotation goes to the n-th invoice row
    #[arg(short, long, num_args = 1..)]
    secondary: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: csv, json or text (default: from config)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Exit with an error when any issue was recorded
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ConsolidateArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let primary_files = expand_inputs(&args.primary)?;
    let secondary_files = expand_inputs(&args.secondary)?;

    if primary_files.is_empty() {
        anyhow::bail!("No primary documents found for: {}", args.primary.join(" "));
    }

    info!(
        "Consolidating {} invoices and {} quotations",
        primary_files.len(),
        secondary_files.len()
    );

    let engine = MergeEngine::from_config(&config)?;

    let pb = ProgressBar::new((primary_files.len() + secondary_files.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let primaries = read_all(&primary_files, &pb);
    let secondaries = read_all(&secondary_files, &pb);
    pb.finish_and_clear();

    let consolidation = engine.consolidate(&primaries, &secondaries);

    let format = args.format.unwrap_or(config.output.format);
    let output = match format {
        OutputFormat::Csv => format_csv(&consolidation.output)?,
        OutputFormat::Json => format_json(&consolidation)?,
        OutputFormat::Text => {
            format_text(&consolidation, config.output.include_secondary_source)
        }
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} rows written to {}",
            style("✓").green(),
            consolidation.output.len(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if consolidation.has_issues() {
        eprintln!(
            "{} {} issues recorded",
            style("!").yellow(),
            consolidation.issues.len()
        );
        for issue in &consolidation.issues {
            eprintln!("  - {}", issue);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if args.strict && consolidation.has_issues() {
        anyhow::bail!(
            "{} issues recorded while consolidating (--strict)",
            consolidation.issues.len()
        );
    }

    Ok(())
}

fn read_all(files: &[PathBuf], pb: &ProgressBar) -> Vec<SourceDocument> {
    files
        .iter()
        .map(|path| {
            pb.set_message(path.display().to_string());
            let document = read_document(path);
            pb.inc(1);
            document
        })
        .collect()
}

fn format_csv(rows: &[OutputRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    if rows.is_empty() {
        wtr.write_record(docmerge_core::COLUMNS)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    row: &'a OutputRow,
    #[serde(rename = "SECONDARY_SOURCE")]
    secondary_source: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    rows: Vec<JsonRow<'a>>,
    issues: &'a [Issue],
}

fn format_json(consolidation: &Consolidation) -> anyhow::Result<String> {
    let rows = consolidation
        .output
        .iter()
        .zip(&consolidation.rows)
        .map(|(row, consolidated)| JsonRow {
            row,
            secondary_source: consolidated.secondary_source.as_deref(),
        })
        .collect();

    let report = JsonReport {
        rows,
        issues: &consolidation.issues,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

fn format_text(consolidation: &Consolidation, include_secondary_source: bool) -> String {
    let mut output = String::new();

    for (i, (row, consolidated)) in consolidation
        .output
        .iter()
        .zip(&consolidation.rows)
        .enumerate()
    {
        output.push_str(&format!("{}. {} ({})\n", i + 1, row.client, row.file_name));
        output.push_str(&format!("  Invoice:   {} on {}\n", row.number, row.date));
        output.push_str(&format!("  Pesos:     {}\n", row.pesos));
        output.push_str(&format!("  Services:  {}\n", row.description));
        output.push_str(&format!(
            "  Quotation: {} on {}\n",
            row.quotation_number, row.quotation_date
        ));
        output.push_str(&format!("  Dollars:   {}\n", row.dollars));
        output.push_str(&format!("  Euros:     {}\n", row.euros));
        if include_secondary_source {
            if let Some(source) = &consolidated.secondary_source {
                output.push_str(&format!("  Source:    {}\n", source));
            }
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "{} rows, {} issues\n",
        consolidation.output.len(),
        consolidation.issues.len()
    ));
    output
}
