//! Record store: per-category bibliographic records of one edition

mod author;
mod spreadsheet;

pub use spreadsheet::{
    csv_to_json, decode_source, parse_source_csv, read_source_csv, write_records_csv,
    SOURCE_COLUMNS,
};
pub use author::normalize_author;

use crate::edition::EditionContext;
use crate::error::{KatalogError, ParseError, Result};
use crate::types::{BibliographicRecord, Category, CategoryRecords};
use std::fs;
use std::path::{Path, PathBuf};

/// Which generation of JSON data files the store reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `src/json`, converted straight from the raw spreadsheets
    Source,

    /// `dist/json`, deduplicated and sorted for layout
    Processed,
}

/// Loads the records of an edition's categories
pub struct RecordStore<'a> {
    edition: &'a EditionContext,
    stage: Stage,
}

impl<'a> RecordStore<'a> {
    pub fn new(edition: &'a EditionContext, stage: Stage) -> Self {
        Self { edition, stage }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Data file of a category for this store's stage
    pub fn path_for(&self, category: &Category) -> PathBuf {
        match self.stage {
            Stage::Source => self.edition.source_json(category),
            Stage::Processed => self.edition.processed_json(category),
        }
    }

    /// Load the records of one category
    ///
    /// Returns `Ok(None)` for an optional category without data file and
    /// fails with [`KatalogError::MissingSource`] for a mandatory one.
    pub fn load_category(&self, slug: &str) -> Result<Option<CategoryRecords>> {
        let category = self
            .edition
            .category(slug)
            .ok_or_else(|| KatalogError::UnknownCategory(slug.to_string()))?;

        let path = self.path_for(category);
        if !path.is_file() {
            if category.mandatory {
                return Err(KatalogError::MissingSource {
                    category: category.slug.clone(),
                    path,
                });
            }
            tracing::debug!("Skipping optional category {} (no {:?})", slug, path);
            return Ok(None);
        }

        let records = load_records(&path, category)?;
        tracing::debug!("Loaded {} records for {}", records.len(), slug);

        Ok(Some(CategoryRecords::new(category.clone(), records)))
    }

    /// Load every available category, in reading order
    pub fn load_all(&self) -> Result<Vec<CategoryRecords>> {
        let mut all = Vec::new();

        for category in self.edition.categories_in_reading_order() {
            if let Some(records) = self.load_category(&category.slug)? {
                all.push(records);
            }
        }

        Ok(all)
    }
}

/// Read a JSON data file, validating every record
pub fn load_records(path: &Path, category: &Category) -> Result<Vec<BibliographicRecord>> {
    let data = fs::read_to_string(path)?;

    let mut records: Vec<BibliographicRecord> =
        serde_json::from_str(&data).map_err(|e| ParseError::Json {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    for (index, record) in records.iter_mut().enumerate() {
        record.isbn = record.isbn.trim().to_string();
        if record.isbn.is_empty() {
            return Err(ParseError::InvalidRecord {
                category: category.slug.clone(),
                message: format!("record {} has no ISBN", index + 1),
            }
            .into());
        }
        if record.sort_key.is_empty() {
            record.sort_key = record.author.clone();
        }
    }

    Ok(records)
}

/// Total number of records across categories
pub fn total_records(categories: &[CategoryRecords]) -> usize {
    categories.iter().map(CategoryRecords::len).sum()
}
