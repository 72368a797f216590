use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::client::Client;
use crate::core::nit::Nit;
use crate::utils::validation::split_email_list;

/// Accepted headers for each required column, compared case-insensitively
/// after trimming and space-to-underscore folding. Spreadsheets come from
/// several accounting exports, so the alias lists are deliberately broad.
pub const NIT_COLUMNS: &[&str] = &[
    "nit",
    "nit_comprador",
    "numero_identificacion",
    "identificacion",
    "num_id",
];
pub const NAME_COLUMNS: &[&str] = &[
    "nombre",
    "nombre_del_comprador",
    "nombre_comprador",
    "nombre_cliente",
    "razon_social",
    "cliente",
    "empresa",
    "name",
    "company",
];
pub const EMAIL_COLUMNS: &[&str] = &[
    "email",
    "correos",
    "correo",
    "correo_electronico",
    "e-mail",
    "mail",
];

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Roster has no valid rows ({errors} row error(s))")]
    NoValidRows { errors: usize },

    #[error("Unsupported roster format: {0} (expected .xlsx, .xls, .xlsm, .csv or .tsv)")]
    UnsupportedExtension(String),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),
}

/// A roster row that failed validation. Collected, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RowError {
    /// 1-based spreadsheet row.
    pub row: usize,
    pub message: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// Parsed roster: valid clients plus the rows that were rejected.
#[derive(Debug, Default)]
pub struct Roster {
    pub clients: Vec<Client>,
    pub errors: Vec<RowError>,
}

/// Zero-based positions of the three required columns within a header row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnMap {
    pub nit: usize,
    pub name: usize,
    pub email: usize,
}

/// Load a roster from disk, dispatching on the file extension.
///
/// # Errors
///
/// Returns `RosterError::UnsupportedExtension` for unknown formats, plus the
/// parse errors of the chosen loader.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("xlsx" | "xls" | "xlsm") => super::xlsx::parse_workbook(path),
        Some("csv") => parse_delimited_file(path, ','),
        Some("tsv" | "txt") => parse_delimited_file(path, '\t'),
        Some(other) => Err(RosterError::UnsupportedExtension(other.to_string())),
        None => Err(RosterError::UnsupportedExtension("<none>".to_string())),
    }
}

/// Parse a CSV/TSV roster file.
///
/// # Errors
///
/// Returns `RosterError::Io` if the file cannot be read, plus the errors of
/// [`parse_delimited_text`].
pub fn parse_delimited_file(path: &Path, delimiter: char) -> Result<Roster, RosterError> {
    let content = std::fs::read_to_string(path)?;
    parse_delimited_text(&content, delimiter)
}

/// Parse delimited roster text. The first non-empty, non-comment line must be
/// a header naming the NIT, name, and email columns (see the alias lists).
///
/// # Errors
///
/// Returns `RosterError::MissingColumns` when the header lacks a required
/// column and `RosterError::NoValidRows` when no data row survives
/// validation.
pub fn parse_delimited_text(text: &str, delimiter: char) -> Result<Roster, RosterError> {
    let mut roster = Roster::default();
    let mut columns: Option<ColumnMap> = None;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        let Some(map) = columns else {
            columns = Some(detect_columns(&fields)?);
            continue;
        };

        // Line numbers in errors are 1-based for user friendliness.
        let row = i + 1;
        let nit_raw = fields.get(map.nit).copied().unwrap_or_default();
        let name_raw = fields.get(map.name).copied().unwrap_or_default();
        let email_raw = fields.get(map.email).copied().unwrap_or_default();

        match build_client(nit_raw, name_raw, email_raw, row) {
            Ok(Some(client)) => roster.clients.push(client),
            Ok(None) => {} // blank row
            Err(message) => roster.errors.push(RowError { row, message }),
        }
    }

    if columns.is_none() {
        return Err(RosterError::MissingColumns(vec![
            "nit".to_string(),
            "name".to_string(),
            "email".to_string(),
        ]));
    }

    if roster.clients.is_empty() {
        return Err(RosterError::NoValidRows {
            errors: roster.errors.len(),
        });
    }

    debug!(
        clients = roster.clients.len(),
        rejected = roster.errors.len(),
        "roster parsed"
    );
    Ok(roster)
}

/// Locate the required columns in a header row.
pub(crate) fn detect_columns(header: &[&str]) -> Result<ColumnMap, RosterError> {
    let normalized: Vec<String> = header.iter().map(|h| normalize_column(h)).collect();

    let find = |aliases: &[&str]| {
        normalized
            .iter()
            .position(|col| aliases.contains(&col.as_str()))
    };

    let nit = find(NIT_COLUMNS);
    let name = find(NAME_COLUMNS);
    let email = find(EMAIL_COLUMNS);

    let mut missing = Vec::new();
    if nit.is_none() {
        missing.push("nit".to_string());
    }
    if name.is_none() {
        missing.push("name".to_string());
    }
    if email.is_none() {
        missing.push("email".to_string());
    }
    if !missing.is_empty() {
        return Err(RosterError::MissingColumns(missing));
    }

    Ok(ColumnMap {
        // Checked above.
        nit: nit.unwrap_or_default(),
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
    })
}

fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Validate one roster row. `Ok(None)` means the row was blank and should be
/// skipped silently; `Err` carries a human-readable rejection reason.
pub(crate) fn build_client(
    nit_raw: &str,
    name_raw: &str,
    email_raw: &str,
    row: usize,
) -> Result<Option<Client>, String> {
    if nit_raw.trim().is_empty() && name_raw.trim().is_empty() && email_raw.trim().is_empty() {
        return Ok(None);
    }

    let nit = Nit::parse(nit_raw).map_err(|e| e.to_string())?;

    let name = name_raw.trim();
    if name.is_empty() {
        return Err("client name is empty".to_string());
    }

    let (emails, invalid) = split_email_list(email_raw);
    if !invalid.is_empty() {
        return Err(format!("invalid email(s): {}", invalid.join(", ")));
    }
    if emails.is_empty() {
        return Err("no email address".to_string());
    }

    Ok(Some(Client::new(nit, name, emails, row)))
}
