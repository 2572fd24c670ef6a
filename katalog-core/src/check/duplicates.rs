//! Cross-category ISBN collisions

use crate::types::CategoryRecords;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Report line written when no ISBN appears in more than one category
pub const NO_DUPLICATES: &str = "No duplicates found!";

/// An ISBN listed in two or more distinct categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub isbn: String,

    /// Distinct categories, in first-seen order
    pub categories: Vec<String>,
}

impl DuplicateEntry {
    /// Human-readable report line, `<isbn>: <category> & <category>`
    pub fn report_line(&self) -> String {
        format!("{}: {}", self.isbn, self.categories.join(" & "))
    }
}

/// All duplicates of an edition, in first-seen order of their ISBNs
///
/// Serializes as a JSON object mapping each ISBN to its categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Duplicates {
    entries: Vec<DuplicateEntry>,
}

impl Duplicates {
    pub fn entries(&self) -> &[DuplicateEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Categories an ISBN was found in, if it is a duplicate
    pub fn categories_of(&self, isbn: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.isbn == isbn)
            .map(|entry| entry.categories.as_slice())
    }

    /// One line per duplicate, or the sentinel line
    pub fn report_lines(&self) -> Vec<String> {
        super::lines_or_sentinel(
            self.entries.iter().map(DuplicateEntry::report_line).collect(),
            NO_DUPLICATES,
        )
    }

    /// Rebuild from a persisted allowlist (entries end up ordered by ISBN)
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(isbn, categories)| DuplicateEntry { isbn, categories })
                .collect(),
        }
    }
}

impl Serialize for Duplicates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.isbn, &entry.categories)?;
        }
        map.end()
    }
}

/// Find every ISBN that occurs in at least two distinct categories
pub fn find_duplicates(records_by_category: &[CategoryRecords]) -> Duplicates {
    let mut seen: Vec<DuplicateEntry> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for group in records_by_category {
        let slug = &group.category.slug;

        for record in &group.records {
            let position = *positions.entry(record.isbn.as_str()).or_insert_with(|| {
                seen.push(DuplicateEntry {
                    isbn: record.isbn.clone(),
                    categories: Vec::new(),
                });
                seen.len() - 1
            });

            let categories = &mut seen[position].categories;
            if !categories.contains(slug) {
                categories.push(slug.clone());
            }
        }
    }

    Duplicates {
        entries: seen
            .into_iter()
            .filter(|entry| entry.categories.len() > 1)
            .collect(),
    }
}
