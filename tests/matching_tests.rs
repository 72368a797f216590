//! Library-level walkthrough of a whole batch: roster text in, report out,
//! exercising the tier cascade end to end without touching the filesystem.

use nit_match::core::candidate::CandidateFile;
use nit_match::core::nit::Nit;
use nit_match::core::types::{MatchTier, MatchWarning};
use nit_match::matching::engine::{MatchConfig, MatchEngine};
use nit_match::matching::index::CandidateIndex;
use nit_match::matching::report::BatchReport;
use nit_match::matching::similarity::detect_similar_nits;
use nit_match::parsing::filename::extract_nit;
use nit_match::parsing::roster::parse_delimited_text;

fn index_of(names: &[&str]) -> CandidateIndex {
    CandidateIndex::from_files(
        names
            .iter()
            .map(|n| CandidateFile::new(*n, extract_nit(n)))
            .collect(),
    )
}

#[test]
fn test_batch_end_to_end() {
    let csv = "nit,nombre,email\n\
               900.123.456-7,ACME S.A.S,facturas@acme.co\n\
               811222333,Distribuidora Norte,pagos@norte.co\n\
               16123456,Andres Perez,aperez@gmail.com\n\
               700999888,Textiles Bogota SAS,pagos@textiles.co\n";
    let roster = parse_delimited_text(csv, ',').expect("roster parses");
    assert_eq!(roster.clients.len(), 4);

    let index = index_of(&[
        "NIT._900123456 ACME S.A.S.pdf",  // exact for row 2
        "NIT._8112223334 NORTE.pdf",      // embedded check digit for row 3
        "comprobante 016123456 enero.pdf", // leading zero for row 4
        "recibo textiles bogota.pdf",      // name-only for row 5
        "otros_documentos.pdf",            // orphan
    ]);

    let report = BatchReport::build(&roster, &index, MatchConfig::default());

    assert_eq!(report.outcomes[0].tier, Some(MatchTier::Exact));
    assert!(report.outcomes[0].warnings.is_empty());

    assert_eq!(report.outcomes[1].tier, Some(MatchTier::MirrorNormalized));
    assert_eq!(report.outcomes[1].files, vec!["NIT._8112223334 NORTE.pdf"]);

    assert_eq!(report.outcomes[2].tier, Some(MatchTier::MirrorNormalized));
    assert_eq!(
        report.outcomes[2].files,
        vec!["comprobante 016123456 enero.pdf"]
    );

    assert_eq!(report.outcomes[3].tier, Some(MatchTier::CompanyName));
    assert!(matches!(
        report.outcomes[3].warnings[0],
        MatchWarning::CompanyName { .. }
    ));

    assert_eq!(report.summary.matched, 4);
    assert_eq!(report.summary.fallback_matches, 3);
    assert_eq!(report.summary.orphans, 1);
    assert_eq!(report.orphans[0].name, "otros_documentos.pdf");
}

#[test]
fn test_cascade_never_mixes_tiers() {
    // An exact file and a looser variant for the same client: only the
    // exact one comes back, silently.
    let index = index_of(&[
        "NIT._900123456 enero.pdf",
        "NIT._9001234567 febrero.pdf",
        "900123456 interno.pdf",
    ]);
    let engine = MatchEngine::new(&index);

    let outcome = engine.match_nit(&Nit::parse("900123456").unwrap(), Some("ACME"));
    assert_eq!(outcome.tier, Some(MatchTier::Exact));
    assert_eq!(
        outcome.files,
        vec!["900123456 interno.pdf", "NIT._900123456 enero.pdf"]
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_no_match_is_quiet() {
    let index = index_of(&["NIT._900123456 enero.pdf"]);
    let engine = MatchEngine::new(&index);

    let outcome = engine.match_nit(&Nit::parse("811222333").unwrap(), None);
    assert!(outcome.files.is_empty());
    assert_eq!(outcome.tier, None);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_similarity_prepass_matches_spec_example() {
    let nits = vec![
        Nit::parse("12345678").unwrap(),
        Nit::parse("123456789").unwrap(),
        Nit::parse("811222333").unwrap(),
    ];
    let pairs = detect_similar_nits(&nits);
    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].a.as_str(), pairs[0].b.as_str()), ("12345678", "123456789"));
}
