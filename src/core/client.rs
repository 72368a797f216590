use serde::{Deserialize, Serialize};

use crate::core::nit::Nit;

/// One valid row from the client roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Parsed and normalized identifier.
    pub nit: Nit,

    /// Company or person name as it appeared in the roster.
    pub name: String,

    /// Destination addresses. A single cell may carry several addresses
    /// separated by commas or semicolons; they are split and validated at
    /// load time.
    pub emails: Vec<String>,

    /// 1-based spreadsheet row, kept for error reporting.
    pub row: usize,
}

impl Client {
    pub fn new(nit: Nit, name: impl Into<String>, emails: Vec<String>, row: usize) -> Self {
        Self {
            nit,
            name: name.into(),
            emails,
            row,
        }
    }
}
