//! Projections of resolved books into report and mail artifacts

mod extract;
mod mail;
mod slug;
mod summary;

pub use extract::{extract_data, ExtractedData, ExtractedEntry};
pub use mail::{compose_mails, MailDraft, MailTemplate, SENDER};
pub use slug::slugify;
pub use summary::{book_line, render_summary};

use crate::edition::{casefold, PublisherCase};
use crate::error::Result;
use crate::types::ResolvedBook;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Books of one publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherGroup {
    /// Spelling of the publisher as first seen
    pub publisher: String,

    /// Books ordered by page, author and title
    pub books: Vec<ResolvedBook>,
}

/// Group books by publisher
///
/// Groups are ordered case-insensitively; how names are merged depends on
/// the grouping mode.
pub fn group_by_publisher(books: &[ResolvedBook], case: PublisherCase) -> Vec<PublisherGroup> {
    let mut groups: Vec<PublisherGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for book in books {
        let key = case.key(&book.publisher);
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push(PublisherGroup {
                publisher: book.publisher.clone(),
                books: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].books.push(book.clone());
    }

    groups.sort_by(|a, b| {
        casefold(&a.publisher)
            .cmp(&casefold(&b.publisher))
            .then_with(|| a.publisher.cmp(&b.publisher))
    });
    for group in &mut groups {
        group.books.sort_by(|a, b| {
            a.page_number
                .cmp(&b.page_number)
                .then_with(|| a.author.cmp(&b.author))
                .then_with(|| a.title.cmp(&b.title))
        });
    }

    groups
}

/// Write a value as pretty JSON (four-space indent, trailing newline)
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');

    create_parent(path)?;
    fs::write(path, buffer)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Write lines of text, each terminated by a newline
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut text = String::new();
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }

    create_parent(path)?;
    fs::write(path, text)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

pub(crate) fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
