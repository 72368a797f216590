use serde::Serialize;
use tracing::{debug, warn};

use crate::core::client::Client;
use crate::core::nit::Nit;
use crate::core::types::{MatchTier, MatchWarning};
use crate::matching::index::CandidateIndex;
use crate::utils::text::normalize_text;

/// Default fraction of company-name tokens that must appear in a filename
/// for the company-name tier to accept it.
pub const DEFAULT_NAME_THRESHOLD: f64 = 0.5;

/// Legal-form and filler words ignored when tokenizing company names.
const NAME_STOPWORDS: &[&str] = &[
    "sas",
    "ltda",
    "limitada",
    "sociedad",
    "por",
    "acciones",
    "simplificada",
    "comercializadora",
    "distribuidora",
    "inversiones",
    "productos",
    "servicios",
    "empresa",
    "compania",
    "cia",
    "de",
    "del",
    "la",
    "el",
    "y",
    "e",
    "los",
    "las",
];

/// Configuration for the matching cascade.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Whether the company-name tier (tier 4) runs at all.
    pub name_fallback: bool,
    /// Token-overlap threshold for the company-name tier, 0.0-1.0.
    pub name_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            name_fallback: true,
            name_threshold: DEFAULT_NAME_THRESHOLD,
        }
    }
}

/// Result of matching one identifier against the candidate index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    /// Matched filenames. Multiple files at the same tier are all returned;
    /// the report surfaces them for manual review rather than the matcher
    /// silently picking one.
    pub files: Vec<String>,

    /// The tier that produced the files, `None` when nothing matched.
    pub tier: Option<MatchTier>,

    /// Warnings emitted by fallback tiers. Empty for exact matches and for
    /// the no-match case (no tier ever fired).
    pub warnings: Vec<MatchWarning>,
}

impl MatchOutcome {
    fn empty() -> Self {
        Self {
            files: Vec::new(),
            tier: None,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.files.is_empty()
    }

    /// More than one file at the winning tier.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.files.len() > 1
    }
}

/// The graduated matcher: exact first, then progressively looser tiers,
/// stopping at the first non-empty result.
///
/// A pure function of the index and its inputs; warnings go both into the
/// outcome and onto the `tracing` side channel.
pub struct MatchEngine<'a> {
    index: &'a CandidateIndex,
    config: MatchConfig,
}

impl<'a> MatchEngine<'a> {
    #[must_use]
    pub fn new(index: &'a CandidateIndex) -> Self {
        Self::with_config(index, MatchConfig::default())
    }

    #[must_use]
    pub fn with_config(index: &'a CandidateIndex, config: MatchConfig) -> Self {
        Self { index, config }
    }

    /// Match one client row (identifier plus company name for tier 4).
    #[must_use]
    pub fn match_client(&self, client: &Client) -> MatchOutcome {
        self.match_nit(&client.nit, Some(&client.name))
    }

    /// Run the cascade for one identifier.
    ///
    /// The tiers form an ordered list tried in sequence; the first tier that
    /// yields files wins and lower tiers are never consulted. An empty
    /// outcome with no tier and no warnings means no tier ever fired, which
    /// is a normal, reportable result rather than an error.
    #[must_use]
    pub fn match_nit(&self, nit: &Nit, company_name: Option<&str>) -> MatchOutcome {
        let tiers: Vec<(MatchTier, Box<dyn Fn() -> Vec<String> + '_>)> = vec![
            (MatchTier::Exact, Box::new(|| self.tier_exact(nit))),
            (
                MatchTier::MirrorNormalized,
                Box::new(|| self.tier_mirror(nit)),
            ),
            (MatchTier::Substring, Box::new(|| self.tier_substring(nit))),
            (
                MatchTier::CompanyName,
                Box::new(|| self.tier_company_name(company_name)),
            ),
        ];

        for (tier, run) in tiers {
            let files = run();
            if files.is_empty() {
                continue;
            }

            debug!(nit = %nit, %tier, files = files.len(), "cascade stopped");
            let warnings = self.warn_for(tier, nit, company_name, files.len());
            return MatchOutcome {
                files,
                tier: Some(tier),
                warnings,
            };
        }

        MatchOutcome::empty()
    }

    /// Tier 1: strict normalized-digit equality.
    fn tier_exact(&self, nit: &Nit) -> Vec<String> {
        dedup_names(self.index.exact(nit.digits()).into_iter().map(|f| &f.name))
    }

    /// Tier 2: full-length equality after formatting tolerance, covering
    /// mirror keys (embedded check digit) and leading zeros.
    fn tier_mirror(&self, nit: &Nit) -> Vec<String> {
        let mut names: Vec<&String> = Vec::new();

        for key in nit.mirror_keys() {
            names.extend(self.index.mirror(&key).into_iter().map(|f| &f.name));
        }

        // Leading-zero variants still require full-length equality after the
        // zeros are gone.
        let target = nit.digits().trim_start_matches('0');
        for file in self.index.iter() {
            if let Some(digits) = file.digits() {
                if digits != nit.digits() && digits.trim_start_matches('0') == target {
                    names.push(&file.name);
                }
            }
        }

        // The exact tier already came up empty, but a mirror lookup can
        // still return the verbatim key; drop those to keep tiers disjoint.
        let exact: Vec<String> = self.tier_exact(nit);
        dedup_names(names.into_iter().filter(|n| !exact.contains(*n)))
    }

    /// Tier 3: digit containment either way, including against the raw
    /// filename for candidates where extraction failed. The over-matching
    /// tier; it never runs silently.
    fn tier_substring(&self, nit: &Nit) -> Vec<String> {
        let target = nit.digits();
        let names = self.index.iter().filter_map(|file| {
            let by_digits = file
                .digits()
                .is_some_and(|d| d.contains(target) || target.contains(d));
            if by_digits || file.name.contains(target) {
                Some(&file.name)
            } else {
                None
            }
        });
        dedup_names(names)
    }

    /// Tier 4: loose textual match between company-name tokens and the
    /// filename. Disabled via config or when no name is available.
    fn tier_company_name(&self, company_name: Option<&str>) -> Vec<String> {
        if !self.config.name_fallback {
            return Vec::new();
        }
        let Some(name) = company_name else {
            return Vec::new();
        };

        let normalized = normalize_text(name);
        let mut tokens: Vec<&str> = normalized
            .split_whitespace()
            .filter(|t| t.len() >= 4 && !NAME_STOPWORDS.contains(t))
            .collect();
        if tokens.is_empty() {
            tokens = normalized.split_whitespace().take(3).collect();
        }
        if tokens.is_empty() {
            return Vec::new();
        }

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let required = ((tokens.len() as f64) * self.config.name_threshold).floor() as usize;
        let required = required.max(1);

        let mut scored: Vec<(&String, usize)> = self
            .index
            .iter()
            .filter_map(|file| {
                let file_norm = normalize_text(&file.name);
                let score = tokens.iter().filter(|t| file_norm.contains(*t)).count();
                (score >= required).then_some((&file.name, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored.into_iter().map(|(name, _)| name.clone()).collect()
    }

    fn warn_for(
        &self,
        tier: MatchTier,
        nit: &Nit,
        company_name: Option<&str>,
        files: usize,
    ) -> Vec<MatchWarning> {
        let warning = match tier {
            MatchTier::Exact => return Vec::new(),
            MatchTier::MirrorNormalized => MatchWarning::MirrorNormalized {
                nit: nit.digits().to_string(),
                files,
            },
            MatchTier::Substring => MatchWarning::Substring {
                nit: nit.digits().to_string(),
                files,
            },
            MatchTier::CompanyName => MatchWarning::CompanyName {
                nit: nit.digits().to_string(),
                name: company_name.unwrap_or_default().to_string(),
                files,
            },
        };

        warn!("{warning}");
        vec![warning]
    }
}

fn dedup_names<'s>(names: impl Iterator<Item = &'s String>) -> Vec<String> {
    let mut out: Vec<String> = names.cloned().collect();
    out.sort();
    out.dedup();
    out
}
