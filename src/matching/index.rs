use std::collections::HashMap;

use crate::core::candidate::CandidateFile;
use crate::core::nit::MAX_NIT_DIGITS;

/// Candidate files indexed by the identifier extracted from their names.
///
/// Two maps are kept: `by_nit` holds the extracted digits verbatim, and
/// `by_mirror` additionally indexes 10-digit extractions under their first 9
/// digits (the embedded-check-digit "mirror key"). Keeping them separate lets
/// the exact tier stay strict while the mirror tier gains tolerance.
#[derive(Debug, Default)]
pub struct CandidateIndex {
    files: Vec<CandidateFile>,
    by_nit: HashMap<String, Vec<usize>>,
    by_mirror: HashMap<String, Vec<usize>>,
}

impl CandidateIndex {
    #[must_use]
    pub fn from_files(files: Vec<CandidateFile>) -> Self {
        let mut index = Self {
            files,
            by_nit: HashMap::new(),
            by_mirror: HashMap::new(),
        };

        for (i, file) in index.files.iter().enumerate() {
            if let Some(digits) = file.digits() {
                index.by_nit.entry(digits.to_string()).or_default().push(i);
                if digits.len() == MAX_NIT_DIGITS {
                    index
                        .by_mirror
                        .entry(digits[..MAX_NIT_DIGITS - 1].to_string())
                        .or_default()
                        .push(i);
                }
            }
        }

        index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateFile> {
        self.files.iter()
    }

    /// Files whose extracted digits equal `digits` verbatim.
    #[must_use]
    pub fn exact(&self, digits: &str) -> Vec<&CandidateFile> {
        self.resolve(self.by_nit.get(digits))
    }

    /// Files reachable from `key` through either map. Used by the mirror
    /// tier, never by the exact tier.
    #[must_use]
    pub fn mirror(&self, key: &str) -> Vec<&CandidateFile> {
        let mut out = self.resolve(self.by_nit.get(key));
        out.extend(self.resolve(self.by_mirror.get(key)));
        out
    }

    /// Files with no extracted identifier at all.
    #[must_use]
    pub fn unextracted(&self) -> Vec<&CandidateFile> {
        self.files.iter().filter(|f| f.nit.is_none()).collect()
    }

    fn resolve(&self, indices: Option<&Vec<usize>>) -> Vec<&CandidateFile> {
        indices
            .map(|ids| ids.iter().map(|&i| &self.files[i]).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::filename::extract_nit;

    fn index_of(names: &[&str]) -> CandidateIndex {
        CandidateIndex::from_files(
            names
                .iter()
                .map(|n| CandidateFile::new(*n, extract_nit(n)))
                .collect(),
        )
    }

    #[test]
    fn test_exact_lookup_is_strict() {
        let index = index_of(&["12345678.pdf", "123456789.pdf"]);
        let hits = index.exact("12345678");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "12345678.pdf");
    }

    #[test]
    fn test_mirror_key_for_ten_digit_extraction() {
        // A 10-digit filename NIT is also reachable under its first 9 digits.
        let index = index_of(&["NIT._9001234567 ACME.pdf"]);
        assert!(index.exact("900123456").is_empty());
        let hits = index.mirror("900123456");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_unextracted() {
        let index = index_of(&["sin_nit.pdf", "NIT._900123456.pdf"]);
        assert_eq!(index.unextracted().len(), 1);
        assert_eq!(index.len(), 2);
    }
}
