//! End-to-end tests for the nit-match binary: roster matching, roster
//! checking, filename scanning, and version management.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nit_match() -> Command {
    Command::cargo_bin("nit-match").expect("binary builds")
}

/// A small but realistic batch: one exact match, one mirror match, one
/// unmatched client, one orphan file.
fn write_batch(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let roster = dir.path().join("clientes.csv");
    fs::write(
        &roster,
        "nit,nombre,email\n\
         900123456-7,ACME S.A.S,facturas@acme.co\n\
         811222333,Distribuidora Norte,pagos@norte.co\n\
         700999888,Comercial Andina Ltda,pagos@andina.co\n",
    )
    .expect("write roster");

    let listing = dir.path().join("archivos.txt");
    fs::write(
        &listing,
        "NIT._900123456 ACME enero.pdf\n\
         NIT._8112223334 NORTE.pdf\n\
         recibo_sin_identificador.pdf\n",
    )
    .expect("write listing");

    (roster, listing)
}

#[test]
fn test_match_text_output() {
    let dir = TempDir::new().expect("tempdir");
    let (roster, listing) = write_batch(&dir);

    nit_match()
        .arg("match")
        .arg(&roster)
        .arg(&listing)
        .assert()
        .success()
        .stdout(predicate::str::contains("900123456 ACME S.A.S (exact)"))
        .stdout(predicate::str::contains("NIT._900123456 ACME enero.pdf"))
        .stdout(predicate::str::contains("mirror-normalized"))
        .stdout(predicate::str::contains("recibo_sin_identificador.pdf"))
        .stdout(predicate::str::contains("3 clients: 2 matched, 1 unmatched"));
}

#[test]
fn test_match_json_output() {
    let dir = TempDir::new().expect("tempdir");
    let (roster, listing) = write_batch(&dir);

    let output = nit_match()
        .arg("match")
        .arg(&roster)
        .arg(&listing)
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let outcomes = report["outcomes"].as_array().expect("outcomes array");
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["tier"], "exact");
    assert_eq!(outcomes[1]["tier"], "mirror_normalized");
    assert_eq!(outcomes[2]["tier"], serde_json::Value::Null);
    assert_eq!(report["summary"]["matched"], 2);
    assert_eq!(report["summary"]["orphans"], 1);
    assert_eq!(report["orphans"][0]["name"], "recibo_sin_identificador.pdf");
}

#[test]
fn test_match_against_directory() {
    let dir = TempDir::new().expect("tempdir");
    let (roster, _) = write_batch(&dir);

    let pdf_dir = dir.path().join("recibos");
    fs::create_dir(&pdf_dir).expect("mkdir");
    fs::write(pdf_dir.join("NIT._900123456 ACME.pdf"), b"%PDF-1.4").expect("write pdf");
    fs::write(pdf_dir.join("notas.txt"), b"not a pdf").expect("write txt");

    nit_match()
        .arg("match")
        .arg(&roster)
        .arg(&pdf_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("NIT._900123456 ACME.pdf"))
        .stdout(predicate::str::contains("notas.txt").not());
}

#[test]
fn test_match_no_name_fallback() {
    let dir = TempDir::new().expect("tempdir");
    let roster = dir.path().join("clientes.csv");
    fs::write(
        &roster,
        "nit,nombre,email\n999888777,ACME S.A.S,facturas@acme.co\n",
    )
    .expect("write roster");
    let listing = dir.path().join("archivos.txt");
    fs::write(&listing, "comprobante ACME enero.pdf\n").expect("write listing");

    nit_match()
        .arg("match")
        .arg(&roster)
        .arg(&listing)
        .assert()
        .success()
        .stdout(predicate::str::contains("company-name"));

    nit_match()
        .arg("match")
        .arg(&roster)
        .arg(&listing)
        .arg("--no-name-fallback")
        .assert()
        .success()
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn test_match_missing_roster_fails() {
    let dir = TempDir::new().expect("tempdir");
    let listing = dir.path().join("archivos.txt");
    fs::write(&listing, "a.pdf\n").expect("write listing");

    nit_match()
        .arg("match")
        .arg(dir.path().join("no_such.csv"))
        .arg(&listing)
        .assert()
        .failure();
}

#[test]
fn test_check_reports_duplicates_and_similar() {
    let dir = TempDir::new().expect("tempdir");
    let roster = dir.path().join("clientes.csv");
    fs::write(
        &roster,
        "nit,nombre,email\n\
         12345678,ACME,a@acme.co\n\
         12345678,ACME otra vez,b@acme.co\n\
         123456789,Confusable SAS,c@conf.co\n\
         bad-nit,Rota,d@rota.co\n\
         900123456-0,DV Errado SAS,e@dv.co\n",
    )
    .expect("write roster");

    nit_match()
        .arg("check")
        .arg(&roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 valid client rows"))
        .stdout(predicate::str::contains("Duplicate NITs"))
        .stdout(predicate::str::contains("12345678 in rows 2, 3"))
        .stdout(predicate::str::contains("trailing digit"))
        .stdout(predicate::str::contains("row 5"))
        .stdout(predicate::str::contains("Check digit mismatches"))
        .stdout(predicate::str::contains("row 6"));
}

#[test]
fn test_scan_shows_extraction() {
    let dir = TempDir::new().expect("tempdir");
    let listing = dir.path().join("archivos.txt");
    fs::write(
        &listing,
        "NIT._900123456 ACME.pdf\n900123456-7 NORTE.pdf\nsin_digitos.pdf\n",
    )
    .expect("write listing");

    nit_match()
        .arg("scan")
        .arg(&listing)
        .assert()
        .success()
        .stdout(predicate::str::contains("900123456 (marker)"))
        .stdout(predicate::str::contains("900123456 (check-digit)"))
        .stdout(predicate::str::contains("sin_digitos.pdf\t-"));
}

#[test]
fn test_version_show_and_bump() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("VERSION");
    fs::write(&file, "1.4.12\n").expect("write version");

    nit_match()
        .arg("version")
        .arg("--show")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1.4.12"));

    nit_match()
        .arg("version")
        .arg("--patch")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1.4.13"));

    assert_eq!(fs::read_to_string(&file).expect("read").trim(), "1.4.13");
    let history = fs::read_to_string(dir.path().join("VERSION_HISTORY.md")).expect("history");
    assert!(history.contains("## 1.4.13"));
}

#[test]
fn test_version_rejects_non_increasing() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("VERSION");
    fs::write(&file, "1.4.12\n").expect("write version");

    nit_match()
        .arg("version")
        .arg("1.4.12")
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not greater"));

    // Nothing was written.
    assert_eq!(fs::read_to_string(&file).expect("read").trim(), "1.4.12");
    assert!(!dir.path().join("VERSION_HISTORY.md").exists());
}

#[test]
fn test_version_explicit_jump() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("VERSION");
    fs::write(&file, "1.4.12\n").expect("write version");

    nit_match()
        .arg("version")
        .arg("2.0.0")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("2.0.0"));
}
