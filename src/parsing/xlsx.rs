use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::parsing::roster::{build_client, detect_columns, Roster, RosterError, RowError};

/// Load a roster from the first sheet of an Excel workbook.
///
/// The first row must be a header naming the NIT, name, and email columns;
/// the same alias lists and row validation as the CSV loader apply.
///
/// # Errors
///
/// Returns `RosterError::Workbook` when the file cannot be opened or has no
/// sheets, `RosterError::MissingColumns` for a bad header, and
/// `RosterError::NoValidRows` when nothing survives validation.
pub fn parse_workbook(path: &Path) -> Result<Roster, RosterError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| RosterError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RosterError::Workbook("workbook has no sheets".to_string()))?
        .map_err(|e| RosterError::Workbook(e.to_string()))?;

    let mut roster = Roster::default();
    let mut rows = range.rows().enumerate();

    let Some((_, header)) = rows.next() else {
        return Err(RosterError::Workbook("first sheet is empty".to_string()));
    };

    let header_cells: Vec<String> = header.iter().map(cell_to_string).collect();
    let header_refs: Vec<&str> = header_cells.iter().map(String::as_str).collect();
    let map = detect_columns(&header_refs)?;

    for (i, cells) in rows {
        // 1-based row numbers, matching what the user sees in the sheet.
        let row = i + 1;

        let cell = |idx: usize| cells.get(idx).map(cell_to_string).unwrap_or_default();
        let nit_raw = cell(map.nit);
        let name_raw = cell(map.name);
        let email_raw = cell(map.email);

        match build_client(&nit_raw, &name_raw, &email_raw, row) {
            Ok(Some(client)) => roster.clients.push(client),
            Ok(None) => {}
            Err(message) => roster.errors.push(RowError { row, message }),
        }
    }

    if roster.clients.is_empty() {
        return Err(RosterError::NoValidRows {
            errors: roster.errors.len(),
        });
    }

    debug!(
        clients = roster.clients.len(),
        rejected = roster.errors.len(),
        path = %path.display(),
        "workbook parsed"
    );
    Ok(roster)
}

/// Render a cell as text. Numeric NIT cells come back as floats from Excel,
/// so integral floats are printed without the trailing `.0`.
#[allow(clippy::cast_possible_truncation)] // Guarded by the < 1e15 check
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", *f as i64)
        }
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
