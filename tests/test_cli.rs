//! Tests for argument parsing and the non-interactive commands

mod common;

use assert_cmd::Command;
use clap::Parser;
use file_converter::cli::{Cli, Commands};
use predicates::prelude::*;
use tempfile::TempDir;

use common::{page_count, pdf_with_pages, png_with_alpha, write_fixture};

fn bin() -> Command {
    Command::cargo_bin("file-converter").unwrap()
}

#[test]
fn test_cli_defaults() {
    let cli = Cli::parse_from(["file-converter", "a.png", "b.pdf"]);
    assert!(cli.command.is_none());
    assert_eq!(cli.files.len(), 2);

    let settings = cli.settings();
    assert_eq!(settings.quality, 85);
    assert_eq!(settings.max_size, None);
    assert_eq!(cli.log_filter(), "warn");
}

#[test]
fn test_cli_convert_args() {
    let cli = Cli::parse_from([
        "file-converter",
        "convert",
        "photo.png",
        "--to",
        "webp",
        "-o",
        "out",
        "--quality",
        "60",
        "-vv",
    ]);
    match &cli.command {
        Some(Commands::Convert { input, to, output, .. }) => {
            assert_eq!(input.to_str(), Some("photo.png"));
            assert_eq!(to, "webp");
            assert_eq!(output.as_deref().and_then(|p| p.to_str()), Some("out"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.settings().quality, 60);
    assert_eq!(cli.log_filter(), "debug");
}

#[test]
fn test_cli_rejects_out_of_range_quality() {
    assert!(Cli::try_parse_from(["file-converter", "convert", "a.png", "--to", "jpg", "--quality", "0"]).is_err());
    assert!(Cli::try_parse_from(["file-converter", "convert", "a.png", "--to", "jpg", "--quality", "101"]).is_err());
}

#[test]
fn test_inspect_lists_offered_formats() {
    let dir = TempDir::new().unwrap();
    let png = write_fixture(dir.path(), "logo.png", &png_with_alpha());
    let txt = write_fixture(dir.path(), "notes.txt", b"hello");

    bin()
        .arg("inspect")
        .arg(&png)
        .arg(&txt)
        .assert()
        .success()
        .stdout(predicate::str::contains("logo.png (PNG Image,"))
        .stdout(predicate::str::contains("PNG, JPG, BMP, WebP"))
        .stdout(predicate::str::contains("notes.txt (Text Document, 5 B)"))
        .stdout(predicate::str::contains("--No conversions available--"));
}

#[test]
fn test_inspect_json() {
    let dir = TempDir::new().unwrap();
    let pdf = write_fixture(dir.path(), "doc.pdf", &pdf_with_pages(1));

    let output = bin().arg("inspect").arg("--json").arg(&pdf).output().unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["file_type"], "PDF Document");
    assert_eq!(
        rows[0]["formats"],
        serde_json::json!(["PDF (Optimize)", "DOCX", "TXT"])
    );
}

#[test]
fn test_convert_forces_extension() {
    let dir = TempDir::new().unwrap();
    let pdf = write_fixture(dir.path(), "doc.pdf", &pdf_with_pages(3));
    let requested = dir.path().join("rewritten");

    bin()
        .arg("convert")
        .arg(&pdf)
        .args(["--to", "pdf", "--quiet", "-o"])
        .arg(&requested)
        .assert()
        .success();

    assert_eq!(page_count(&dir.path().join("rewritten.pdf")), 3);
}

#[test]
fn test_convert_json_report() {
    let dir = TempDir::new().unwrap();
    let png = write_fixture(dir.path(), "logo.png", &png_with_alpha());

    let output = bin()
        .arg("convert")
        .arg(&png)
        .args(["--to", "JPG", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["format"], "JPG");
    assert!(dir.path().join("logo_converted.jpg").exists());
}

#[test]
fn test_convert_rejects_placeholder_format() {
    let dir = TempDir::new().unwrap();
    let png = write_fixture(dir.path(), "logo.png", &png_with_alpha());

    bin()
        .arg("convert")
        .arg(&png)
        .args(["--to", "N/A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid output format"));
}

#[test]
fn test_convert_pdf_to_txt_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let pdf = write_fixture(dir.path(), "doc.pdf", &pdf_with_pages(1));

    bin()
        .arg("convert")
        .arg(&pdf)
        .args(["--to", "TXT", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported conversion"));

    assert!(!dir.path().join("doc_converted.txt").exists());
}

#[test]
fn test_convert_missing_input() {
    bin()
        .args(["convert", "/definitely/not/here.png", "--to", "jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be found"));
}
