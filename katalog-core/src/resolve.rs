//! Joining records against the layout document

use crate::edition::EditionContext;
use crate::error::{KatalogError, Result};
use crate::layout::LayoutIndex;
use crate::source::{total_records, RecordStore, Stage};
use crate::types::{CategoryRecords, ResolvedBook};
use std::cmp::Ordering;

/// Resolve every record of every category against the layout
///
/// Records without a matching text run are kept with an absent page number.
/// The result is one combined list, sorted by [`compare_books`].
pub fn resolve(records_by_category: &[CategoryRecords], index: &LayoutIndex) -> Vec<ResolvedBook> {
    let mut books = Vec::with_capacity(total_records(records_by_category));

    for group in records_by_category {
        for record in &group.records {
            let found = index.find(&record.isbn);
            if found.is_none() {
                tracing::warn!(
                    "ISBN {} ({}) not found in layout document",
                    record.isbn,
                    group.category.slug
                );
            }

            books.push(ResolvedBook {
                isbn: record.isbn.clone(),
                author: record.display_author(),
                title: record.title.clone(),
                publisher: record.publisher.clone(),
                category: group.category.slug.clone(),
                heading: group.category.heading.clone(),
                page_number: found.and_then(|m| m.page_number()),
                sort_key: record.sort_key.clone(),
                header: found.map(|m| m.header_lines()).unwrap_or_default(),
                body: found.map(|m| m.body_lines()).unwrap_or_default(),
            });
        }
    }

    sort_books(&mut books);
    books
}

/// Page number, publisher, author, title (unplaced books first)
pub fn compare_books(a: &ResolvedBook, b: &ResolvedBook) -> Ordering {
    a.page_number
        .cmp(&b.page_number)
        .then_with(|| a.publisher.cmp(&b.publisher))
        .then_with(|| a.author.cmp(&b.author))
        .then_with(|| a.title.cmp(&b.title))
}

/// Stable sort by [`compare_books`]
pub fn sort_books(books: &mut [ResolvedBook]) {
    books.sort_by(compare_books);
}

/// Gate: the source data and the layout must agree on the number of books
pub fn check_counts(records_by_category: &[CategoryRecords], index: &LayoutIndex) -> Result<()> {
    let records = total_records(records_by_category);
    let layout = index.entry_count();

    if records != layout {
        return Err(KatalogError::CountMismatch { records, layout });
    }

    tracing::info!("Book counts match ({} books), you may pass", records);
    Ok(())
}

/// Books of an edition as placed in its edited layout
#[derive(Debug, Clone)]
pub struct ResolvedEdition {
    /// Processed records, in reading order of their categories
    pub records: Vec<CategoryRecords>,
    pub books: Vec<ResolvedBook>,
}

/// Load the processed records and the edited layout, pass the count gate
/// and resolve
pub fn resolve_edition(edition: &EditionContext) -> Result<ResolvedEdition> {
    let records = RecordStore::new(edition, Stage::Processed).load_all()?;
    let index = LayoutIndex::from_path(&edition.edited_template())?;

    check_counts(&records, &index)?;
    let books = resolve(&records, &index);

    Ok(ResolvedEdition { records, books })
}
