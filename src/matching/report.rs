use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::core::types::{MatchTier, MatchWarning, SimilarPair};
use crate::matching::engine::{MatchConfig, MatchEngine};
use crate::matching::index::CandidateIndex;
use crate::matching::similarity::detect_similar_nits;
use crate::parsing::roster::RowError;

/// One roster row with its matching result attached.
#[derive(Debug, Clone, Serialize)]
pub struct ClientOutcome {
    pub nit: String,
    pub name: String,
    pub emails: Vec<String>,
    /// 1-based source row, for operator-facing messages.
    pub row: usize,
    pub files: Vec<String>,
    pub tier: Option<MatchTier>,
    pub warnings: Vec<MatchWarning>,
}

/// A candidate file no client row claimed.
#[derive(Debug, Clone, Serialize)]
pub struct OrphanFile {
    pub name: String,
    /// Digits extracted from the filename, when extraction succeeded. An
    /// orphan with an extracted identifier usually means the roster is
    /// missing a row.
    pub nit: Option<String>,
}

/// Headline counts for the batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub clients: usize,
    pub candidates: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub ambiguous: usize,
    pub fallback_matches: usize,
    pub orphans: usize,
}

/// The full result of matching a roster against a candidate set.
///
/// Everything downstream consumes this: the text renderer, the JSON/TSV
/// output, and the exit status. Building it never fails once the inputs are
/// loaded; unmatched rows and orphan files are data, not errors.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ClientOutcome>,
    pub similar: Vec<SimilarPair>,
    pub orphans: Vec<OrphanFile>,
    pub row_errors: Vec<RowError>,
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Match every roster row, then account for leftovers.
    #[must_use]
    pub fn build(
        roster: &crate::parsing::roster::Roster,
        index: &CandidateIndex,
        config: MatchConfig,
    ) -> Self {
        let engine = MatchEngine::with_config(index, config);

        let nits: Vec<_> = roster.clients.iter().map(|c| c.nit.clone()).collect();
        let similar = detect_similar_nits(&nits);

        let mut matched_files: HashSet<&str> = HashSet::new();
        let mut outcomes = Vec::with_capacity(roster.clients.len());
        for client in &roster.clients {
            let outcome = engine.match_client(client);
            outcomes.push(ClientOutcome {
                nit: client.nit.digits().to_string(),
                name: client.name.clone(),
                emails: client.emails.clone(),
                row: client.row,
                files: outcome.files,
                tier: outcome.tier,
                warnings: outcome.warnings,
            });
        }
        for outcome in &outcomes {
            for file in &outcome.files {
                matched_files.insert(file.as_str());
            }
        }

        let orphans: Vec<OrphanFile> = index
            .iter()
            .filter(|f| !matched_files.contains(f.name.as_str()))
            .map(|f| OrphanFile {
                name: f.name.clone(),
                nit: f.digits().map(str::to_string),
            })
            .collect();

        let matched = outcomes.iter().filter(|o| !o.files.is_empty()).count();
        let summary = BatchSummary {
            clients: outcomes.len(),
            candidates: index.len(),
            matched,
            unmatched: outcomes.len() - matched,
            ambiguous: outcomes.iter().filter(|o| o.files.len() > 1).count(),
            fallback_matches: outcomes
                .iter()
                .filter(|o| o.tier.is_some_and(|t| t.is_fallback()))
                .count(),
            orphans: orphans.len(),
        };

        info!(
            clients = summary.clients,
            matched = summary.matched,
            unmatched = summary.unmatched,
            orphans = summary.orphans,
            "batch matched"
        );

        Self {
            outcomes,
            similar,
            orphans,
            row_errors: roster.errors.clone(),
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::candidate::CandidateFile;
    use crate::core::client::Client;
    use crate::core::nit::Nit;
    use crate::parsing::filename::extract_nit;
    use crate::parsing::roster::Roster;

    fn roster_of(rows: &[(&str, &str)]) -> Roster {
        Roster {
            clients: rows
                .iter()
                .enumerate()
                .map(|(i, (nit, name))| {
                    Client::new(Nit::parse(nit).unwrap(), *name, Vec::new(), i + 2)
                })
                .collect(),
            errors: Vec::new(),
        }
    }

    fn index_of(names: &[&str]) -> CandidateIndex {
        CandidateIndex::from_files(
            names
                .iter()
                .map(|n| CandidateFile::new(*n, extract_nit(n)))
                .collect(),
        )
    }

    #[test]
    fn test_summary_counts() {
        let roster = roster_of(&[("900123456", "ACME"), ("800111222", "Globex")]);
        let index = index_of(&["NIT._900123456 enero.pdf", "sin_nit.pdf"]);

        let report = BatchReport::build(&roster, &index, MatchConfig::default());
        assert_eq!(report.summary.clients, 2);
        assert_eq!(report.summary.matched, 1);
        assert_eq!(report.summary.unmatched, 1);
        assert_eq!(report.summary.orphans, 1);
        assert_eq!(report.orphans[0].name, "sin_nit.pdf");
        assert_eq!(report.orphans[0].nit, None);
    }

    #[test]
    fn test_orphan_with_extracted_nit() {
        let roster = roster_of(&[("900123456", "ACME")]);
        let index = index_of(&["NIT._900123456.pdf", "NIT._812345678 otros.pdf"]);

        let report = BatchReport::build(&roster, &index, MatchConfig::default());
        assert_eq!(report.orphans.len(), 1);
        assert_eq!(report.orphans[0].nit.as_deref(), Some("812345678"));
    }

    #[test]
    fn test_similar_pairs_surface_in_report() {
        let roster = roster_of(&[("12345678", "A"), ("123456789", "B")]);
        let index = index_of(&["12345678.pdf"]);

        let report = BatchReport::build(&roster, &index, MatchConfig::default());
        assert_eq!(report.similar.len(), 1);
    }

    #[test]
    fn test_file_claimed_by_two_rows_is_not_an_orphan() {
        // Substring tier lets two overlapping identifiers claim one file.
        let roster = roster_of(&[("12345678", "A"), ("123456789", "B")]);
        let index = index_of(&["NIT._123456789.pdf"]);

        let report = BatchReport::build(&roster, &index, MatchConfig::default());
        assert_eq!(report.summary.matched, 2);
        assert!(report.orphans.is_empty());
    }
}
