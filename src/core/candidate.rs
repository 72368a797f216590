use serde::{Deserialize, Serialize};

/// Which extraction rule produced the identifier embedded in a filename.
///
/// Ordered from strongest to weakest evidence; the report shows it so a
/// reviewer can judge how trustworthy an association is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPattern {
    /// Digits adjacent to an explicit `NIT` / `N.I.T` marker.
    Marker,
    /// An `<digits>-<dv>` group anywhere in the name.
    CheckDigitSuffix,
    /// A bare 8-10 digit run with no supporting marker.
    BareRun,
}

impl std::fmt::Display for ExtractionPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marker => write!(f, "marker"),
            Self::CheckDigitSuffix => write!(f, "check-digit"),
            Self::BareRun => write!(f, "bare-run"),
        }
    }
}

/// The identifier substring pulled out of a candidate filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedNit {
    /// Normalized digits (check digit already stripped).
    pub digits: String,
    /// The rule that found it.
    pub pattern: ExtractionPattern,
}

/// A filename from the archive listing, together with the identifier
/// extracted from it (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Filename as it appeared in the listing (base name only).
    pub name: String,

    /// Extracted identifier, when one of the extraction rules fired.
    pub nit: Option<ExtractedNit>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, nit: Option<ExtractedNit>) -> Self {
        Self {
            name: name.into(),
            nit,
        }
    }

    /// Normalized digits of the extracted identifier, if any.
    #[must_use]
    pub fn digits(&self) -> Option<&str> {
        self.nit.as_ref().map(|n| n.digits.as_str())
    }
}
