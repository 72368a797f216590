use std::path::Path;

use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

use crate::core::candidate::CandidateFile;
use crate::parsing::filename::extract_nit;
use crate::utils::validation::{is_pdf_filename, validate_candidate_name, MAX_CANDIDATES};

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("No PDF files found in {0}")]
    NoPdfFiles(String),

    #[error("Too many candidate files: {0} exceeds maximum allowed ({MAX_CANDIDATES})")]
    TooManyCandidates(usize),
}

/// Load candidate files from either a directory of PDFs or a text listing
/// file (one filename per line, e.g. an archive's extracted name list).
///
/// # Errors
///
/// Returns `ListingError::NotFound` when the path does not exist, plus the
/// errors of the chosen loader.
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateFile>, ListingError> {
    if !path.exists() {
        return Err(ListingError::NotFound(path.display().to_string()));
    }
    if path.is_dir() {
        scan_directory(path)
    } else {
        read_listing_file(path)
    }
}

/// Scan a directory (non-recursively) for PDF files.
///
/// # Errors
///
/// Returns `ListingError::NoPdfFiles` when the directory holds no PDFs and
/// `ListingError::TooManyCandidates` past the batch limit.
pub fn scan_directory(dir: &Path) -> Result<Vec<CandidateFile>, ListingError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_pdf_filename(name) || name.starts_with('.') {
            continue;
        }

        if files.len() >= MAX_CANDIDATES {
            return Err(ListingError::TooManyCandidates(files.len()));
        }
        files.push(make_candidate(name));
    }

    finish(files, dir)
}

/// Read candidate filenames from a text listing, one per line. Blank lines
/// and `#` comments are skipped, as are non-PDF entries and macOS resource
/// fork paths (`__MACOSX/...`).
///
/// # Errors
///
/// Returns `ListingError::Io` if the file cannot be read,
/// `ListingError::NoPdfFiles` for an effectively empty listing, and
/// `ListingError::TooManyCandidates` past the batch limit.
pub fn read_listing_file(path: &Path) -> Result<Vec<CandidateFile>, ListingError> {
    let content = std::fs::read_to_string(path)?;
    let mut files = Vec::new();

    for line in content.lines() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') || entry.starts_with("__MACOSX") {
            continue;
        }
        if !is_pdf_filename(entry) {
            continue;
        }
        if let Err(e) = validate_candidate_name(entry) {
            warn!(entry, error = %e, "skipping invalid listing entry");
            continue;
        }

        // Keep the base name only; archives often prefix a folder.
        let name = entry.rsplit(['/', '\\']).next().unwrap_or(entry);

        if files.len() >= MAX_CANDIDATES {
            return Err(ListingError::TooManyCandidates(files.len()));
        }
        files.push(make_candidate(name));
    }

    finish(files, path)
}

fn make_candidate(name: &str) -> CandidateFile {
    let extracted = extract_nit(name);
    if extracted.is_none() {
        warn!(file = name, "no NIT could be extracted from filename");
    }
    CandidateFile::new(name, extracted)
}

fn finish(mut files: Vec<CandidateFile>, origin: &Path) -> Result<Vec<CandidateFile>, ListingError> {
    if files.is_empty() {
        return Err(ListingError::NoPdfFiles(origin.display().to_string()));
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    files.dedup_by(|a, b| a.name == b.name);
    Ok(files)
}
