use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::nit::Nit;
use crate::core::types::SimilarPair;
use crate::matching::similarity::detect_similar_nits;
use crate::parsing;
use crate::parsing::roster::RowError;

#[derive(Args)]
pub struct CheckArgs {
    /// Client roster (xlsx, xls, csv, or tsv)
    #[arg(required = true)]
    pub roster: PathBuf,
}

#[derive(Serialize)]
struct CheckReport {
    clients: usize,
    row_errors: Vec<RowError>,
    duplicates: Vec<DuplicateNit>,
    check_digit_mismatches: Vec<CheckDigitMismatch>,
    similar: Vec<SimilarPair>,
}

#[derive(Serialize)]
struct CheckDigitMismatch {
    row: usize,
    message: String,
}

#[derive(Serialize)]
struct DuplicateNit {
    nit: String,
    rows: Vec<usize>,
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if the roster cannot be loaded at all; individual bad
/// rows are findings, not errors.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = parsing::load_roster(&args.roster)?;

    if verbose {
        eprintln!("Loaded {} client rows", roster.clients.len());
    }

    let mut by_digits: HashMap<&str, Vec<usize>> = HashMap::new();
    for client in &roster.clients {
        by_digits
            .entry(client.nit.digits())
            .or_default()
            .push(client.row);
    }
    let mut duplicates: Vec<DuplicateNit> = by_digits
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|(nit, rows)| DuplicateNit {
            nit: nit.to_string(),
            rows,
        })
        .collect();
    duplicates.sort_by(|a, b| a.nit.cmp(&b.nit));

    // Rows that declare a check digit get it verified against the computed
    // value. Advisory: a wrong DV does not invalidate the row.
    let check_digit_mismatches: Vec<CheckDigitMismatch> = roster
        .clients
        .iter()
        .filter_map(|client| {
            Nit::parse_checked(client.nit.raw())
                .err()
                .map(|e| CheckDigitMismatch {
                    row: client.row,
                    message: e.to_string(),
                })
        })
        .collect();

    let nits: Vec<_> = roster.clients.iter().map(|c| c.nit.clone()).collect();
    let report = CheckReport {
        clients: roster.clients.len(),
        row_errors: roster.errors,
        duplicates,
        check_digit_mismatches,
        similar: detect_similar_nits(&nits),
    };

    match format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv(&report),
    }

    Ok(())
}

fn print_text(report: &CheckReport) {
    println!("{} valid client rows", report.clients);

    if !report.row_errors.is_empty() {
        println!("\nRejected rows:");
        for err in &report.row_errors {
            println!("   row {}: {}", err.row, err.message);
        }
    }

    if !report.duplicates.is_empty() {
        println!("\nDuplicate NITs:");
        for dup in &report.duplicates {
            let rows: Vec<String> = dup.rows.iter().map(ToString::to_string).collect();
            println!("   {} in rows {}", dup.nit, rows.join(", "));
        }
    }

    if !report.check_digit_mismatches.is_empty() {
        println!("\nCheck digit mismatches:");
        for m in &report.check_digit_mismatches {
            println!("   row {}: {}", m.row, m.message);
        }
    }

    if !report.similar.is_empty() {
        println!("\nConfusable NITs:");
        for pair in &report.similar {
            println!("   {pair}");
        }
    }

    if report.row_errors.is_empty()
        && report.duplicates.is_empty()
        && report.check_digit_mismatches.is_empty()
        && report.similar.is_empty()
    {
        println!("No problems found");
    }
}

fn print_tsv(report: &CheckReport) {
    println!("finding\tdetail");
    for err in &report.row_errors {
        println!("row_error\trow {}: {}", err.row, err.message);
    }
    for dup in &report.duplicates {
        let rows: Vec<String> = dup.rows.iter().map(ToString::to_string).collect();
        println!("duplicate\t{} in rows {}", dup.nit, rows.join(", "));
    }
    for m in &report.check_digit_mismatches {
        println!("check_digit\trow {}: {}", m.row, m.message);
    }
    for pair in &report.similar {
        println!("similar\t{pair}");
    }
}
