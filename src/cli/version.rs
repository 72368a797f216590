use std::io::BufRead;
use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::version::{self, BumpKind, Version, HISTORY_FILE};

#[derive(Args)]
pub struct VersionArgs {
    /// Explicit new version (X.Y.Z); mutually exclusive with the bump flags
    #[arg(conflicts_with_all = ["patch", "minor", "major", "show"])]
    pub version: Option<String>,

    /// Show the current version and exit
    #[arg(long)]
    pub show: bool,

    /// Bump the patch component
    #[arg(long, conflicts_with_all = ["minor", "major"])]
    pub patch: bool,

    /// Bump the minor component
    #[arg(long, conflicts_with = "major")]
    pub minor: bool,

    /// Bump the major component
    #[arg(long)]
    pub major: bool,

    /// Commit pending changes and create an annotated vX.Y.Z git tag
    #[arg(long)]
    pub tag: bool,

    /// Also push the branch and the tag (implies --tag)
    #[arg(long)]
    pub push: bool,

    /// Read release notes from stdin (one line each, until a blank line
    /// or EOF) and record them in the history log
    #[arg(long)]
    pub notes: bool,

    /// Version file to read and update
    #[arg(long, default_value = "VERSION")]
    pub file: PathBuf,
}

/// Execute version subcommand
///
/// # Errors
///
/// Returns an error if the version file is missing or malformed, if the new
/// version is not strictly greater than the current one, or if git fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: VersionArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let current = version::read_version(&args.file)?;

    let new = if let Some(explicit) = &args.version {
        Some(explicit.parse::<Version>()?)
    } else if args.major {
        Some(current.bumped(BumpKind::Major))
    } else if args.minor {
        Some(current.bumped(BumpKind::Minor))
    } else if args.patch {
        Some(current.bumped(BumpKind::Patch))
    } else {
        None
    };

    let Some(new) = new else {
        // --show, or no action requested at all.
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "version": current.to_string() }));
            }
            OutputFormat::Text | OutputFormat::Tsv => println!("{current}"),
        }
        return Ok(());
    };

    let notes = if args.notes { read_notes()? } else { Vec::new() };

    // Rejects a non-increasing version before anything is written.
    version::write_version(&args.file, new)?;

    let history = args.file.with_file_name(HISTORY_FILE);
    version::append_history(&history, new, &notes)?;

    if verbose {
        eprintln!("{current} -> {new}, history in {}", history.display());
    }

    if args.tag || args.push {
        version::git_tag(new, args.push)?;
    }

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "previous": current.to_string(),
                "version": new.to_string(),
                "tagged": args.tag || args.push,
                "pushed": args.push,
            })
        ),
        OutputFormat::Text | OutputFormat::Tsv => println!("{new}"),
    }

    Ok(())
}

/// Release notes from stdin: one per line, stopping at the first blank
/// line or EOF.
fn read_notes() -> anyhow::Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut notes = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        notes.push(line.to_string());
    }
    Ok(notes)
}
