//! Turning source records into the processed data the layout is built from

use crate::check::{load_duplicates, Duplicates};
use crate::edition::EditionContext;
use crate::error::Result;
use crate::report::write_json;
use crate::source::{write_records_csv, RecordStore, Stage};
use crate::types::{BibliographicRecord, CategoryRecords};
use std::collections::HashSet;

/// Summary of processing one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedCategory {
    pub category: String,
    pub kept: usize,
    pub blocked: usize,
}

/// Drop repeated and cross-listed records, then sort by sort key
///
/// A repeated ISBN within the category keeps its first occurrence. An ISBN
/// listed in the duplicates allowlist is kept only in the first category
/// recorded for it.
pub fn process_category(group: &CategoryRecords, duplicates: &Duplicates) -> (Vec<BibliographicRecord>, usize) {
    let slug = &group.category.slug;
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(group.records.len());
    let mut blocked = 0;

    for record in &group.records {
        if !seen.insert(record.isbn.as_str()) {
            tracing::warn!("Blocking repeated ISBN {} in {}", record.isbn, slug);
            blocked += 1;
            continue;
        }

        if let Some(categories) = duplicates.categories_of(&record.isbn) {
            if categories.first().is_some_and(|first| first != slug) {
                tracing::warn!(
                    "Blocking ISBN {} in {}, already listed in {}",
                    record.isbn,
                    slug,
                    categories[0]
                );
                blocked += 1;
                continue;
            }
        }

        kept.push(record.clone());
    }

    kept.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    (kept, blocked)
}

/// Process every source category and write `dist/json` and `dist/csv`
pub fn process(edition: &EditionContext) -> Result<Vec<ProcessedCategory>> {
    let duplicates = load_duplicates(edition)?;
    let groups = RecordStore::new(edition, Stage::Source).load_all()?;
    let mut summary = Vec::with_capacity(groups.len());

    for group in &groups {
        let (records, blocked) = process_category(group, &duplicates);

        write_json(&edition.processed_json(&group.category), &records)?;
        write_records_csv(&edition.processed_csv(&group.category), &records)?;
        tracing::info!(
            "Processed {}: {} kept, {} blocked",
            group.category.slug,
            records.len(),
            blocked
        );

        summary.push(ProcessedCategory {
            category: group.category.slug.clone(),
            kept: records.len(),
            blocked,
        });
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn record(isbn: &str, author: &str) -> BibliographicRecord {
        BibliographicRecord::new(isbn, author, "Titel", "Verlag")
    }

    #[test]
    fn test_process_category_blocks_and_sorts() {
        let group = CategoryRecords::new(
            Category::new("ab8", "Bücher ab 8", 9, true),
            vec![
                record("3", "Zweig, Stefan"),
                record("1", "Funke, Cornelia"),
                record("3", "Zweig, Stefan"),
                record("2", "Boie, Kirsten"),
            ],
        );
        let duplicates = Duplicates::from_map(BTreeMap::from([(
            "2".to_string(),
            vec!["ab6".to_string(), "ab8".to_string()],
        )]));

        let (kept, blocked) = process_category(&group, &duplicates);

        let isbns: Vec<_> = kept.iter().map(|r| r.isbn.as_str()).collect();
        assert_eq!(isbns, vec!["1", "3"]);
        assert_eq!(blocked, 2);
    }

    #[test]
    fn test_first_listed_category_keeps_duplicate() {
        let group = CategoryRecords::new(
            Category::new("ab6", "Erstleser", 8, true),
            vec![record("2", "Boie, Kirsten")],
        );
        let duplicates = Duplicates::from_map(BTreeMap::from([(
            "2".to_string(),
            vec!["ab6".to_string(), "ab8".to_string()],
        )]));

        let (kept, blocked) = process_category(&group, &duplicates);
        assert_eq!(kept.len(), 1);
        assert_eq!(blocked, 0);
    }

    #[test]
    fn test_process_writes_dist_files() {
        let dir = TempDir::new().unwrap();
        let edition = EditionContext::new(dir.path(), "2021_01").unwrap();
        for category in edition.categories.iter().filter(|c| c.mandatory) {
            let path = edition.source_json(category);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "[]").unwrap();
        }
        let ab8 = edition.category("ab8").unwrap().clone();
        fs::write(
            edition.source_json(&ab8),
            r#"[{"ISBN": "9783791504650", "AutorIn": "Funke, Cornelia", "Titel": "Tintenherz", "Verlag": "Dressler"}]"#,
        )
        .unwrap();

        let summary = process(&edition).unwrap();

        assert_eq!(summary.len(), 9);
        let json = fs::read_to_string(edition.processed_json(&ab8)).unwrap();
        assert!(json.contains("\"Tintenherz\""));
        let csv = fs::read_to_string(edition.processed_csv(&ab8)).unwrap();
        assert!(csv.starts_with("AutorIn;Titel;Verlag;ISBN"));
        assert!(csv.contains("Funke, Cornelia;Tintenherz;Dressler;9783791504650"));
    }
}
