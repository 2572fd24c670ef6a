//! Age ratings that need a human decision
//!
//! A proper rating names a single recommendation ("ab 8 Jahren"). Missing
//! ratings and ranges ("von 6 bis 8 Jahren") are flagged.

use crate::types::CategoryRecords;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Report line written when every rating is fine
pub const NO_IMPROPER_RATINGS: &str = "No improper age ratings found!";

/// Placeholder recorded for books without any age rating
pub const MISSING_RATING: &str = "Keine Altersangabe";

static IMPROPER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)angabe|bis").expect("age rating marker pattern is valid")
});

/// A book whose age rating is not a single definitive value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeRatingFlag {
    pub isbn: String,
    pub rating: String,
}

/// Flagged ratings in first-seen order, serialized as an ISBN -> rating object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeRatings {
    flags: Vec<AgeRatingFlag>,
}

impl AgeRatings {
    pub fn flags(&self) -> &[AgeRatingFlag] {
        &self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Flagged rating of an ISBN
    pub fn rating_of(&self, isbn: &str) -> Option<&str> {
        self.flags
            .iter()
            .find(|flag| flag.isbn == isbn)
            .map(|flag| flag.rating.as_str())
    }

    /// One `<isbn>: <rating>` line per flag, or the sentinel line
    pub fn report_lines(&self) -> Vec<String> {
        super::lines_or_sentinel(
            self.flags
                .iter()
                .map(|flag| format!("{}: {}", flag.isbn, flag.rating))
                .collect(),
            NO_IMPROPER_RATINGS,
        )
    }
}

impl Serialize for AgeRatings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.flags.len()))?;
        for flag in &self.flags {
            map.serialize_entry(&flag.isbn, &flag.rating)?;
        }
        map.end()
    }
}

/// Whether a rating contains a qualifier instead of one definitive value
pub fn is_improper(rating: &str) -> bool {
    rating.trim().is_empty() || IMPROPER_MARKER.is_match(rating)
}

/// Collect every book whose rating is missing or qualified
///
/// Books listed in several categories are flagged once.
pub fn find_improper_age_ratings(records_by_category: &[CategoryRecords]) -> AgeRatings {
    let mut seen = HashSet::new();
    let mut flags = Vec::new();

    for record in records_by_category.iter().flat_map(|group| &group.records) {
        if !seen.insert(record.isbn.as_str()) {
            continue;
        }

        let rating = record.age_rating.as_deref().unwrap_or("").trim();
        if is_improper(rating) {
            flags.push(AgeRatingFlag {
                isbn: record.isbn.clone(),
                rating: if rating.is_empty() {
                    MISSING_RATING.to_string()
                } else {
                    rating.to_string()
                },
            });
        }
    }

    AgeRatings { flags }
}
