use serde::{Deserialize, Serialize};

/// One strategy level in the matching cascade, from strictest to loosest.
///
/// Tiers are tried strictly in this order and the cascade stops at the first
/// tier that produces files: a non-empty `Exact` result is always returned
/// alone, and a result at any lower tier implies every stricter tier came up
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Normalized digit strings are identical.
    Exact,
    /// Full-length equality after formatting tolerance: mirror keys
    /// (embedded check digit) or leading zeros.
    MirrorNormalized,
    /// One identifier contains the other. The over-matching tier; never
    /// runs silently.
    Substring,
    /// Loose textual match between the company name and filename tokens.
    CompanyName,
}

impl MatchTier {
    /// Whether a match at this tier is a fallback that must carry a warning.
    #[must_use]
    pub fn is_fallback(self) -> bool {
        self != Self::Exact
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::MirrorNormalized => write!(f, "mirror-normalized"),
            Self::Substring => write!(f, "substring"),
            Self::CompanyName => write!(f, "company-name"),
        }
    }
}

/// A warning attached to a fallback match, surfaced to the report and the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchWarning {
    /// Files were found only after tolerating formatting variants.
    MirrorNormalized { nit: String, files: usize },
    /// Files were accepted on digit containment alone. This is the tier
    /// historically responsible for over-matching.
    Substring { nit: String, files: usize },
    /// Files were accepted on company-name token overlap; weakest evidence.
    CompanyName {
        nit: String,
        name: String,
        files: usize,
    },
}

impl std::fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MirrorNormalized { nit, files } => write!(
                f,
                "NIT {nit}: {files} file(s) matched only after normalizing formatting variants"
            ),
            Self::Substring { nit, files } => write!(
                f,
                "NIT {nit}: {files} file(s) matched by digit containment only, verify before sending"
            ),
            Self::CompanyName { nit, name, files } => write!(
                f,
                "NIT {nit}: {files} file(s) matched only by company name '{name}', verify before sending"
            ),
        }
    }
}

/// Why two identifiers in the same batch were flagged as confusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SimilarReason {
    /// One NIT is a proper prefix of the other and the length difference is
    /// small (a trailing check digit or truncation slip).
    PrefixOverlap { extra_digits: usize },
    /// Same tail, one extra leading digit.
    LeadingDigit,
}

/// Two distinct identifiers in a batch that are easy to confuse.
///
/// Detected once per loaded batch and reported as advisory warnings; never
/// alters matching behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarPair {
    pub a: String,
    pub b: String,
    pub reason: SimilarReason,
}

impl std::fmt::Display for SimilarPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            SimilarReason::PrefixOverlap { extra_digits } => write!(
                f,
                "NITs {} and {} differ only by {} trailing digit(s)",
                self.a, self.b, extra_digits
            ),
            SimilarReason::LeadingDigit => write!(
                f,
                "NITs {} and {} differ only by a leading digit",
                self.a, self.b
            ),
        }
    }
}
