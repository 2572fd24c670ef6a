//! Data preparation commands: csv2json, check, process

use crate::Session;
use anyhow::{Context, Result};
use katalog_core::check::run_checks;
use katalog_core::source::csv_to_json;

/// Convert raw spreadsheets of the issue to JSON
pub fn csv2json(session: &Session) -> Result<()> {
    let written = csv_to_json(&session.edition).context("Failed to convert raw sources")?;

    if written.is_empty() {
        println!("No raw sources found in {}", session.edition.src_dir().display());
        return Ok(());
    }

    println!("Converted {} categories:", written.len());
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}

/// Report duplicate ISBNs and improper age ratings
pub fn check(session: &Session) -> Result<()> {
    let edition = &session.edition;
    let outcome = run_checks(edition).context("Failed to check source data")?;

    for line in outcome.duplicates.report_lines() {
        println!("{}", line);
    }
    for line in outcome.age_ratings.report_lines() {
        println!("{}", line);
    }

    println!();
    println!("Duplicates:  {}", edition.duplicates_report().display());
    println!("Age ratings: {}", edition.age_ratings_report().display());

    Ok(())
}

/// Block duplicates and write the processed data
pub fn process(session: &Session) -> Result<()> {
    let summary =
        katalog_core::process::process(&session.edition).context("Failed to process data")?;

    println!("Processed {} categories:", summary.len());
    for category in summary {
        println!(
            "  {:<12} {:>4} kept {:>4} blocked",
            category.category, category.kept, category.blocked
        );
    }

    Ok(())
}
