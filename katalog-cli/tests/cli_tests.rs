//! Integration tests for the Katalog CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ISSUE: &str = "2021_02";

const MANDATORY: [&str; 9] = [
    "sachbuch",
    "ab14",
    "ab12",
    "ab10",
    "ab8",
    "ab6",
    "vorlesebuch",
    "bilderbuch",
    "toddler",
];

fn katalog(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("katalog-cli").unwrap();
    cmd.env_remove("KATALOG_ISSUE")
        .env_remove("KATALOG_ROOT")
        .env_remove("KATALOG_PUBLISHER_CASE")
        .arg("--root")
        .arg(root)
        .args(["--issue", ISSUE]);
    cmd
}

fn issue_dir(root: &Path) -> PathBuf {
    root.join("issues").join(ISSUE)
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project root with empty mandatory spreadsheets plus the given ones
fn project(sources: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let src = issue_dir(dir.path()).join("src").join("csv");

    for slug in MANDATORY {
        write(&src.join(format!("{}.csv", slug)), "");
    }
    for (slug, content) in sources {
        write(&src.join(format!("{}.csv", slug)), content);
    }

    dir
}

fn prepared_project() -> TempDir {
    let dir = project(&[
        (
            "ab8",
            "Funke, Cornelia;Tintenherz;Dressler;9783791504650;Gebunden;22,00;;;;;;;ab 10 Jahren\n\
             Boie, Kirsten;Möwenweg;Oetinger;9783789131479;Gebunden;13,00;;;;;;;ab 8 Jahren\n",
        ),
        (
            "ab6",
            "Boie, Kirsten;Möwenweg;Oetinger;9783789131479;Gebunden;13,00;;;;;;;ab 8 Jahren\n",
        ),
    ]);

    for step in ["csv2json", "check", "process"] {
        katalog(dir.path()).arg(step).assert().success();
    }

    dir
}

fn edited_layout(root: &Path, isbns: &[(&str, i32)]) {
    let mut xml = String::from("<SCRIBUSUTF8NEW><DOCUMENT>");
    for (isbn, page) in isbns {
        xml.push_str(&format!(
            r#"<PAGEOBJECT OwnPage="{page}">
                 <PAGEOBJECT OwnPage="{page}"><StoryText><ITEXT CH="Titel"/></StoryText></PAGEOBJECT>
                 <PAGEOBJECT OwnPage="{page}"><StoryText>
                   <ITEXT CH="Text"/><ITEXT CH="ISBN {isbn}"/><ITEXT CH="13 €"/>
                 </StoryText></PAGEOBJECT>
               </PAGEOBJECT>"#
        ));
    }
    xml.push_str("</DOCUMENT></SCRIBUSUTF8NEW>");

    write(
        &issue_dir(root).join("dist").join("templates").join("edited.sla"),
        &xml,
    );
}

// =============================================================================
// Arguments
// =============================================================================

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("katalog-cli").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("csv2json"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("optimize"))
        .stdout(predicate::str::contains("mails"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("katalog-cli").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("katalog"));
}

#[test]
fn test_missing_issue() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("katalog-cli").unwrap();
    cmd.env_remove("KATALOG_ISSUE")
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No issue selected"));
}

#[test]
fn test_invalid_issue() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("katalog-cli").unwrap();
    cmd.env_remove("KATALOG_ISSUE")
        .arg("--root")
        .arg(dir.path())
        .args(["--issue", "spring", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid issue 'spring'"));
}

#[test]
fn test_invalid_publisher_case() {
    let dir = TempDir::new().unwrap();
    katalog(dir.path())
        .args(["--publisher-case", "upper", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown publisher case"));
}

// =============================================================================
// Data preparation
// =============================================================================

#[test]
fn test_check_without_findings_prints_sentinels() {
    let dir = project(&[(
        "ab8",
        "Funke, Cornelia;Tintenherz;Dressler;9783791504650;Gebunden;22,00;;;;;;;ab 10 Jahren\n",
    )]);

    katalog(dir.path()).arg("csv2json").assert().success();
    katalog(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found!"))
        .stdout(predicate::str::contains("No improper age ratings found!"));

    let report = fs::read_to_string(issue_dir(dir.path()).join("meta").join("duplicates.txt")).unwrap();
    assert_eq!(report, "No duplicates found!\n");
}

#[test]
fn test_check_without_converted_sources_fails() {
    let dir = project(&[]);

    katalog(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to check source data"));
}

#[test]
fn test_process_blocks_duplicates() {
    let dir = prepared_project();

    katalog(dir.path())
        .arg("process")
        .assert()
        .success()
        .stdout(predicate::str::contains("blocked"));

    let ab8: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(issue_dir(dir.path()).join("dist").join("json").join("ab8.json")).unwrap(),
    )
    .unwrap();
    let ab6: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(issue_dir(dir.path()).join("dist").join("json").join("ab6.json")).unwrap(),
    )
    .unwrap();

    let total = ab8.as_array().unwrap().len() + ab6.as_array().unwrap().len();
    assert_eq!(total, 2);
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_verify_mismatch_fails_with_both_counts() {
    let dir = prepared_project();
    edited_layout(dir.path(), &[("9783791504650", 3)]);

    katalog(dir.path())
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("You shall not pass!"))
        .stderr(predicate::str::contains("2 books in source data"))
        .stderr(predicate::str::contains("1 books in layout document"));
}

#[test]
fn test_verify_match_passes() {
    let dir = prepared_project();
    edited_layout(dir.path(), &[("9783791504650", 3), ("9783789131479", 5)]);

    katalog(dir.path())
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("you may pass"));
}

#[test]
fn test_summary_and_extract() {
    let dir = prepared_project();
    edited_layout(dir.path(), &[("9783791504650", 3), ("9783789131479", 5)]);

    katalog(dir.path()).arg("summary").assert().success();
    katalog(dir.path()).arg("extract").assert().success();

    let summary = fs::read_to_string(issue_dir(dir.path()).join("meta").join("summary.txt")).unwrap();
    assert!(summary.contains("Dressler:\n"));
    assert!(summary.contains("Cornelia Funke - \"Tintenherz\" auf Seite 4"));
    assert!(summary.contains("Kirsten Boie - \"Möwenweg\" auf Seite 6"));

    let data: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(issue_dir(dir.path()).join("config").join("data.json")).unwrap(),
    )
    .unwrap();
    assert!(data.is_object());
}

#[test]
fn test_mails_are_drafted_per_publisher() {
    let dir = prepared_project();
    edited_layout(dir.path(), &[("9783791504650", 3), ("9783789131479", 5)]);

    katalog(dir.path())
        .arg("mails")
        .assert()
        .success()
        .stdout(predicate::str::contains("Drafted 2 mails"));

    let mails = issue_dir(dir.path()).join("dist").join("documents").join("mails");
    assert!(mails.join("dressler.eml").is_file());
    assert!(mails.join("oetinger.eml").is_file());
}

// =============================================================================
// External tools
// =============================================================================

#[test]
fn test_optimize_dry_run_lists_outputs() {
    let dir = TempDir::new().unwrap();

    katalog(dir.path())
        .args(["--dry-run", "optimize", "--resolutions", "50,100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Optimized 2 copies"))
        .stdout(predicate::str::contains("buchempfehlungen_50.pdf"))
        .stdout(predicate::str::contains("buchempfehlungen_100.pdf"));
}

#[test]
fn test_optimize_without_document_fails() {
    let dir = TempDir::new().unwrap();

    katalog(dir.path())
        .arg("optimize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `build` first"));
}

#[test]
fn test_base_dry_run_keeps_existing_base() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("assets").join("templates").join("main.sla"), "<MAIN/>");
    let base = issue_dir(dir.path()).join("dist").join("templates").join("base.sla");
    write(&base, "<EXTENDED/>");

    katalog(dir.path())
        .args(["--dry-run", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(fs::read_to_string(&base).unwrap(), "<EXTENDED/>");
    assert!(!issue_dir(dir.path())
        .join("dist")
        .join("templates")
        .join("edited.sla")
        .exists());
}
