//! Centralized validation helpers for roster cells and candidate filenames.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of candidate files accepted in one batch (runaway-input
/// protection).
pub const MAX_CANDIDATES: usize = 100_000;

/// Maximum accepted filename length.
pub const MAX_FILENAME_LENGTH: usize = 255;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Validate a single email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Split a roster cell that may carry several addresses separated by commas
/// or semicolons. Returns `(valid, invalid)` address lists; blank fragments
/// are dropped.
#[must_use]
pub fn split_email_list(cell: &str) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for fragment in cell.split([',', ';']) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        if is_valid_email(fragment) {
            valid.push(fragment.to_string());
        } else {
            invalid.push(fragment.to_string());
        }
    }

    (valid, invalid)
}

/// Validation error for candidate filenames taken from a listing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilenameError {
    #[error("empty filename")]
    Empty,
    #[error("filename exceeds {MAX_FILENAME_LENGTH} characters")]
    TooLong,
    #[error("filename contains control characters")]
    ControlCharacters,
}

/// Sanity-check a candidate filename before indexing it.
///
/// Listing files come from outside the process, so reject entries that are
/// empty, absurdly long, or carry control characters. Path separators are
/// fine here; the loader reduces entries to their base name afterwards.
///
/// # Errors
///
/// Returns a `FilenameError` describing the first failed check.
pub fn validate_candidate_name(name: &str) -> Result<(), FilenameError> {
    if name.trim().is_empty() {
        return Err(FilenameError::Empty);
    }
    if name.len() > MAX_FILENAME_LENGTH {
        return Err(FilenameError::TooLong);
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(FilenameError::ControlCharacters);
    }
    Ok(())
}

/// Whether a listing entry names a PDF (case-insensitive extension check).
#[must_use]
pub fn is_pdf_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}
