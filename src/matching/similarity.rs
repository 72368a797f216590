use tracing::warn;

use crate::core::nit::Nit;
use crate::core::types::{SimilarPair, SimilarReason};

/// Maximum length difference for the prefix-overlap rule.
const MAX_PREFIX_EXTRA: usize = 3;

/// Pairwise pre-pass over a batch's identifiers, flagging pairs that are
/// easy to confuse: one a proper prefix of the other with at most
/// [`MAX_PREFIX_EXTRA`] extra digits, or the same digits with one extra
/// leading digit.
///
/// Runs once when a batch is loaded. Purely advisory (the warnings go to the
/// report and the log); it never changes what the matcher does.
#[must_use]
pub fn detect_similar_nits(nits: &[Nit]) -> Vec<SimilarPair> {
    let mut digits: Vec<&str> = nits.iter().map(Nit::digits).collect();
    digits.sort_unstable();
    digits.dedup();

    let mut pairs = Vec::new();
    for i in 0..digits.len() {
        for j in (i + 1)..digits.len() {
            if let Some(reason) = compare(digits[i], digits[j]) {
                let pair = SimilarPair {
                    a: digits[i].to_string(),
                    b: digits[j].to_string(),
                    reason,
                };
                warn!("{pair}");
                pairs.push(pair);
            }
        }
    }

    pairs
}

fn compare(a: &str, b: &str) -> Option<SimilarReason> {
    if a == b {
        return None;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let extra = long.len() - short.len();

    if extra > 0 && extra <= MAX_PREFIX_EXTRA && long.starts_with(short) {
        return Some(SimilarReason::PrefixOverlap {
            extra_digits: extra,
        });
    }
    if extra == 1 && long.ends_with(short) {
        return Some(SimilarReason::LeadingDigit);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nit(s: &str) -> Nit {
        Nit::parse(s).unwrap()
    }

    #[test]
    fn test_trailing_digit_pair_is_flagged() {
        let pairs = detect_similar_nits(&[nit("12345678"), nit("123456789")]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].a, "12345678");
        assert_eq!(pairs[0].b, "123456789");
        assert_eq!(
            pairs[0].reason,
            SimilarReason::PrefixOverlap { extra_digits: 1 }
        );
    }

    #[test]
    fn test_leading_digit_pair_is_flagged() {
        let pairs = detect_similar_nits(&[nit("912345678"), nit("12345678")]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].reason, SimilarReason::LeadingDigit);
    }

    #[test]
    fn test_unrelated_nits_are_not_flagged() {
        let pairs = detect_similar_nits(&[nit("12345678"), nit("87654321")]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_duplicates_are_not_similar() {
        let pairs = detect_similar_nits(&[nit("12345678"), nit("12345678")]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_prefix_overlap_respects_limit() {
        // 8 vs 10 digits sharing a prefix: within the limit.
        assert!(compare("12345678", "1234567890").is_some());
        // No shared prefix at all.
        assert!(compare("12345678", "9934567890").is_none());
    }
}
