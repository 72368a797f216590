use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::MatchTier;
use crate::matching::engine::{MatchConfig, DEFAULT_NAME_THRESHOLD};
use crate::matching::index::CandidateIndex;
use crate::matching::report::BatchReport;
use crate::parsing;

#[derive(Args)]
pub struct MatchArgs {
    /// Client roster (xlsx, xls, csv, or tsv)
    #[arg(required = true)]
    pub roster: PathBuf,

    /// Candidate files: a directory of PDFs, or a text file listing one
    /// filename per line
    #[arg(required = true)]
    pub files: PathBuf,

    /// Disable the company-name fallback tier
    #[arg(long)]
    pub no_name_fallback: bool,

    /// Fraction of company-name tokens that must appear in a filename
    /// for the company-name tier to accept it
    #[arg(long, default_value_t = DEFAULT_NAME_THRESHOLD)]
    pub name_threshold: f64,
}

/// Execute match subcommand
///
/// # Errors
///
/// Returns an error if the roster or candidate listing cannot be loaded.
/// Unmatched clients and orphan files are reported, not errors.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = parsing::load_roster(&args.roster)?;
    let candidates = parsing::load_candidates(&args.files)?;

    if verbose {
        eprintln!(
            "Loaded {} client rows ({} rejected) and {} candidate files",
            roster.clients.len(),
            roster.errors.len(),
            candidates.len(),
        );
    }

    let index = CandidateIndex::from_files(candidates);
    if verbose {
        let unextracted = index.unextracted();
        if !unextracted.is_empty() {
            eprintln!("No identifier extracted from {} file(s)", unextracted.len());
        }
    }
    let config = MatchConfig {
        name_fallback: !args.no_name_fallback,
        name_threshold: args.name_threshold,
    };
    let report = BatchReport::build(&roster, &index, config);

    match format {
        OutputFormat::Text => print_text_report(&report, verbose),
        OutputFormat::Json => print_json_report(&report)?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &BatchReport, verbose: bool) {
    for pair in &report.similar {
        println!("Warning: {pair}");
    }
    if !report.similar.is_empty() {
        println!();
    }

    for outcome in &report.outcomes {
        let tier = match outcome.tier {
            Some(t) => t.to_string(),
            None => "no match".to_string(),
        };
        println!("{} {} ({tier})", outcome.nit, outcome.name);
        for file in &outcome.files {
            println!("   {file}");
        }
        for warning in &outcome.warnings {
            println!("   Warning: {warning}");
        }
        if outcome.files.is_empty() {
            println!("   (no candidate found)");
        }
    }

    if !report.orphans.is_empty() {
        println!("\nUnclaimed files:");
        for orphan in &report.orphans {
            match &orphan.nit {
                Some(nit) => println!("   {} (NIT {nit}, no roster row)", orphan.name),
                None => println!("   {} (no identifier found)", orphan.name),
            }
        }
    }

    if !report.row_errors.is_empty() {
        println!("\nRejected roster rows:");
        for err in &report.row_errors {
            println!("   row {}: {}", err.row, err.message);
        }
    }

    let s = &report.summary;
    println!(
        "\n{} clients: {} matched, {} unmatched ({} ambiguous, {} via fallback); {} of {} files unclaimed",
        s.clients, s.matched, s.unmatched, s.ambiguous, s.fallback_matches, s.orphans, s.candidates,
    );

    if verbose {
        let exact = report
            .outcomes
            .iter()
            .filter(|o| o.tier == Some(MatchTier::Exact))
            .count();
        eprintln!("{exact} of {} matches were exact", s.matched);
    }
}

fn print_json_report(report: &BatchReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_tsv_report(report: &BatchReport) {
    println!("nit\tname\trow\ttier\tfiles\twarnings");
    for outcome in &report.outcomes {
        let tier = outcome
            .tier
            .map_or_else(|| "none".to_string(), |t| t.to_string());
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            outcome.nit,
            outcome.name,
            outcome.row,
            tier,
            outcome.files.join(";"),
            outcome.warnings.len(),
        );
    }
}
