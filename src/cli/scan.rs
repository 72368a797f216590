use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing;

#[derive(Args)]
pub struct ScanArgs {
    /// Candidate files: a directory of PDFs, or a text file listing one
    /// filename per line
    #[arg(required = true)]
    pub files: PathBuf,

    /// Only show files where no identifier could be extracted
    #[arg(long)]
    pub unextracted_only: bool,
}

/// Execute scan subcommand
///
/// # Errors
///
/// Returns an error if the candidate listing cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut candidates = parsing::load_candidates(&args.files)?;
    if args.unextracted_only {
        candidates.retain(|c| c.nit.is_none());
    }

    if verbose {
        let extracted = candidates.iter().filter(|c| c.nit.is_some()).count();
        eprintln!(
            "{} candidate files, identifier extracted from {extracted}",
            candidates.len()
        );
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&candidates)?),
        OutputFormat::Text => {
            for c in &candidates {
                match &c.nit {
                    Some(nit) => println!("{}\t{} ({})", c.name, nit.digits, nit.pattern),
                    None => println!("{}\t-", c.name),
                }
            }
        }
        OutputFormat::Tsv => {
            println!("file\tnit\tpattern");
            for c in &candidates {
                match &c.nit {
                    Some(nit) => println!("{}\t{}\t{}", c.name, nit.digits, nit.pattern),
                    None => println!("{}\t\t", c.name),
                }
            }
        }
    }

    Ok(())
}
