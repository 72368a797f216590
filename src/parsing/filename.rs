//! Identifier extraction from receipt filenames.
//!
//! Receipt PDFs name their client in wildly inconsistent ways:
//! `NIT._900123456 ACME S.A.S.pdf`, `Comprobante N.I.T 900123456-7.pdf`,
//! `900123456 factura enero.pdf`. Extraction combines several rules and
//! records which one fired so downstream matching can weigh the evidence:
//!
//! 1. digits adjacent to an explicit `NIT` / `N.I.T` marker
//! 2. a `<digits>-<check digit>` group anywhere in the name
//! 3. a bare 8-10 digit run
//!
//! Digit runs that merely restate an invoice number (an `FF_`/`ORF_` style
//! prefix carrying the same digits) are discarded unless nothing else is
//! available. When several candidates survive, the one closest to the `NIT`
//! marker wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::candidate::{ExtractedNit, ExtractionPattern};
use crate::core::nit::{MAX_NIT_DIGITS, MIN_NIT_DIGITS};

static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// `NIT`, `N.I.T`, `N I T` with a non-alphanumeric (or start) boundary before
/// the `N`. The marker itself is capture group 1.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[^A-Za-z0-9])(N\.?\s*I\.?\s*T\.?)").unwrap());

/// Invoice-number prefixes (`FF`, `FRF`, `OF`, `ORF`) directly before a digit
/// run, allowing zero padding. Anchored at the end so it can be applied to
/// the text preceding a run.
static INVOICE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[FO]R?F[_\s]+0*$").unwrap());

#[derive(Debug, Clone, Copy)]
struct RunCandidate<'a> {
    digits: &'a str,
    start: usize,
    end: usize,
    pattern: ExtractionPattern,
    invoice_like: bool,
}

/// Extract the identifier embedded in a candidate filename.
///
/// Works on the base name with the extension stripped; returns `None` when
/// no 8-10 digit run is present at all.
#[must_use]
pub fn extract_nit(filename: &str) -> Option<ExtractedNit> {
    let stem = file_stem(filename);
    let marker_starts: Vec<usize> = MARKER_RE
        .captures_iter(stem)
        .filter_map(|c| c.get(1).map(|m| m.start()))
        .collect();

    let runs: Vec<RunCandidate<'_>> = DIGIT_RUN_RE
        .find_iter(stem)
        .filter(|m| (MIN_NIT_DIGITS..=MAX_NIT_DIGITS).contains(&m.as_str().len()))
        .map(|m| RunCandidate {
            digits: m.as_str(),
            start: m.start(),
            end: m.end(),
            pattern: classify(stem, m.start(), m.end(), &marker_starts),
            invoice_like: invoice_prefixed(stem, m.start()),
        })
        .collect();

    if runs.is_empty() {
        return None;
    }

    // Prefer runs that are not just invoice numbers; fall back to all of
    // them when every run is invoice-like.
    let survivors: Vec<&RunCandidate<'_>> = {
        let kept: Vec<&RunCandidate<'_>> = runs.iter().filter(|r| !r.invoice_like).collect();
        if kept.is_empty() {
            runs.iter().collect()
        } else {
            kept
        }
    };

    let best = survivors
        .into_iter()
        .min_by_key(|r| (marker_distance(r.start, &marker_starts), r.start))?;

    Some(ExtractedNit {
        digits: best.digits.to_string(),
        pattern: best.pattern,
    })
}

/// Base name with the final extension removed.
fn file_stem(filename: &str) -> &str {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    match base.rfind('.') {
        Some(pos) if pos > 0 => &base[..pos],
        _ => base,
    }
}

fn classify(stem: &str, start: usize, end: usize, marker_starts: &[usize]) -> ExtractionPattern {
    if marker_adjacent(stem, start, marker_starts) {
        ExtractionPattern::Marker
    } else if has_check_digit_suffix(stem, end) {
        ExtractionPattern::CheckDigitSuffix
    } else {
        ExtractionPattern::BareRun
    }
}

/// A run is marker-adjacent when some `NIT` marker ends before it with only
/// filler characters (`. _ - space`) in between.
fn marker_adjacent(stem: &str, run_start: usize, marker_starts: &[usize]) -> bool {
    marker_starts.iter().any(|&mstart| {
        if mstart >= run_start {
            return false;
        }
        let between = &stem[mstart..run_start];
        // Skip over the marker letters themselves, then require filler only.
        between
            .chars()
            .all(|c| matches!(c, 'n' | 'i' | 't' | 'N' | 'I' | 'T' | '.' | '_' | '-' | ' '))
    })
}

/// `<run>-<single digit>` with nothing numeric after the check digit.
fn has_check_digit_suffix(stem: &str, run_end: usize) -> bool {
    let bytes = stem.as_bytes();
    if run_end + 1 >= bytes.len() || bytes[run_end] != b'-' {
        return false;
    }
    if !bytes[run_end + 1].is_ascii_digit() {
        return false;
    }
    match bytes.get(run_end + 2) {
        None => true,
        Some(b) => !b.is_ascii_digit(),
    }
}

/// Whether the text right before a run is an invoice-number prefix that
/// carries the run's digits (e.g. `FF_0900123456`).
fn invoice_prefixed(stem: &str, run_start: usize) -> bool {
    let prefix = &stem[..run_start];
    let Some(m) = INVOICE_PREFIX_RE.find(prefix) else {
        return false;
    };
    // The prefix letters must start at a word boundary, otherwise company
    // names ending in F would trip the veto.
    let before = &prefix[..m.start()];
    before
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_ascii_alphanumeric())
}

fn marker_distance(run_start: usize, marker_starts: &[usize]) -> usize {
    marker_starts
        .iter()
        .map(|&m| run_start.abs_diff(m))
        .min()
        .unwrap_or(999)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits_of(name: &str) -> Option<String> {
        extract_nit(name).map(|e| e.digits)
    }

    #[test]
    fn test_strict_marker_at_start() {
        let e = extract_nit("NIT._900123456 ACME SAS.pdf").unwrap();
        assert_eq!(e.digits, "900123456");
        assert_eq!(e.pattern, ExtractionPattern::Marker);
    }

    #[test]
    fn test_flexible_marker_anywhere() {
        let e = extract_nit("Comprobante N.I.T 900123456 enero.pdf").unwrap();
        assert_eq!(e.digits, "900123456");
        assert_eq!(e.pattern, ExtractionPattern::Marker);
    }

    #[test]
    fn test_marker_with_check_digit() {
        assert_eq!(
            digits_of("NIT._900123456-7 ACME.pdf"),
            Some("900123456".to_string())
        );
    }

    #[test]
    fn test_check_digit_suffix_without_marker() {
        let e = extract_nit("comprobante 900123456-7 enero.pdf").unwrap();
        assert_eq!(e.digits, "900123456");
        assert_eq!(e.pattern, ExtractionPattern::CheckDigitSuffix);
    }

    #[test]
    fn test_bare_run() {
        let e = extract_nit("12345678.pdf").unwrap();
        assert_eq!(e.digits, "12345678");
        assert_eq!(e.pattern, ExtractionPattern::BareRun);
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(digits_of("comprobante_enero.pdf"), None);
    }

    #[test]
    fn test_run_too_short_or_too_long() {
        assert_eq!(digits_of("recibo_1234567.pdf"), None); // 7 digits
        assert_eq!(digits_of("recibo_12345678901.pdf"), None); // 11 digits
    }

    #[test]
    fn test_marker_proximity_wins_over_other_runs() {
        // Two plausible runs; the one next to the NIT marker must win.
        let e = extract_nit("FF_87654321 NIT._900123456 ACME.pdf").unwrap();
        assert_eq!(e.digits, "900123456");
    }

    #[test]
    fn test_invoice_prefix_vetoed_when_alternative_exists() {
        let e = extract_nit("ORF_99887766 N.I.T 900123456.pdf").unwrap();
        assert_eq!(e.digits, "900123456");
    }

    #[test]
    fn test_invoice_prefix_kept_when_nothing_else() {
        // All runs are invoice-like; better a weak candidate than none.
        assert_eq!(digits_of("FF_900123456.pdf"), Some("900123456".to_string()));
    }

    #[test]
    fn test_nit_inside_word_is_not_a_marker() {
        let e = extract_nit("monitorear 900123456.pdf").unwrap();
        assert_eq!(e.pattern, ExtractionPattern::BareRun);
    }

    #[test]
    fn test_listing_entry_with_directory() {
        assert_eq!(
            digits_of("recibos/enero/NIT._900123456.pdf"),
            Some("900123456".to_string())
        );
    }
}
