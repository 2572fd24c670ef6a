//! Pre-layout gates over the source records of an edition
//!
//! Each check yields a JSON artifact under `config/` (consumed by later
//! steps) and a plaintext report under `meta/` meant for humans.

mod age_rating;
mod duplicates;

pub use age_rating::{
    find_improper_age_ratings, is_improper, AgeRatingFlag, AgeRatings, MISSING_RATING,
    NO_IMPROPER_RATINGS,
};
pub use duplicates::{find_duplicates, DuplicateEntry, Duplicates, NO_DUPLICATES};

use crate::edition::EditionContext;
use crate::error::Result;
use crate::report::{write_json, write_lines};
use crate::source::{RecordStore, Stage};
use std::collections::BTreeMap;
use std::fs;

/// Findings of both checks over one edition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub duplicates: Duplicates,
    pub age_ratings: AgeRatings,
}

/// Run both checks over the source stage and persist their artifacts
///
/// JSON files are always written, even when empty.
pub fn run_checks(edition: &EditionContext) -> Result<CheckOutcome> {
    let records = RecordStore::new(edition, Stage::Source).load_all()?;

    let duplicates = find_duplicates(&records);
    write_json(&edition.duplicates_json(), &duplicates)?;
    write_lines(&edition.duplicates_report(), &duplicates.report_lines())?;
    tracing::info!("Found {} duplicate ISBNs", duplicates.len());

    let age_ratings = find_improper_age_ratings(&records);
    write_json(&edition.age_ratings_json(), &age_ratings)?;
    write_lines(&edition.age_ratings_report(), &age_ratings.report_lines())?;
    tracing::info!("Found {} improper age ratings", age_ratings.len());

    Ok(CheckOutcome {
        duplicates,
        age_ratings,
    })
}

/// Read the persisted duplicates allowlist, empty if it was never written
pub fn load_duplicates(edition: &EditionContext) -> Result<Duplicates> {
    let path = edition.duplicates_json();
    if !path.is_file() {
        return Ok(Duplicates::default());
    }

    let map: BTreeMap<String, Vec<String>> = serde_json::from_str(&fs::read_to_string(&path)?)?;
    Ok(Duplicates::from_map(map))
}

pub(crate) fn lines_or_sentinel(lines: Vec<String>, sentinel: &str) -> Vec<String> {
    if lines.is_empty() {
        vec![sentinel.to_string()]
    } else {
        lines
    }
}
