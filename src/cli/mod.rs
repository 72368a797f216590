//! Command-line interface for nit-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Match a client roster against a set of PDF filenames
//! - **check**: Validate a roster (bad rows, duplicates, similar identifiers)
//! - **scan**: Show the identifier extracted from each candidate filename
//! - **version**: Show or bump the release version
//!
//! ## Usage
//!
//! ```text
//! # Match a roster against a directory of PDFs
//! nit-match match clientes.xlsx recibos/
//!
//! # Match against a text listing of filenames
//! nit-match match clientes.csv archivos.txt
//!
//! # JSON output for scripting
//! nit-match match clientes.xlsx recibos/ --format json
//!
//! # Sanity-check a roster before a send
//! nit-match check clientes.xlsx
//!
//! # Bump the patch version and tag the release
//! nit-match version --patch --tag
//! ```

use clap::{Parser, Subcommand};

pub mod check;
pub mod match_cmd;
pub mod scan;
pub mod version;

#[derive(Parser)]
#[command(name = "nit-match")]
#[command(version)]
#[command(about = "Match client tax identifiers against PDF receipt filenames")]
#[command(
    long_about = "nit-match pairs the rows of a client roster (xlsx/csv) with the PDF receipt files meant for them.\n\nIt matches each client's NIT against the candidate filenames through a graduated cascade:\n- Exact digit match when possible\n- Formatting-tolerant fallbacks (embedded check digit, leading zeros)\n- Looser substring and company-name fallbacks, always flagged for review"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a roster against candidate PDF filenames
    Match(match_cmd::MatchArgs),

    /// Validate a roster without matching
    Check(check::CheckArgs),

    /// Show the identifier extracted from each candidate filename
    Scan(scan::ScanArgs),

    /// Show or bump the release version
    Version(version::VersionArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
