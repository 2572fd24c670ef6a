//! Plaintext summary of all books, grouped by publisher

use super::PublisherGroup;
use crate::types::ResolvedBook;

/// `<author> - "<title>" auf Seite <page>`
pub fn book_line(book: &ResolvedBook) -> String {
    format!(
        "{} - \"{}\" auf Seite {}",
        book.author,
        book.title,
        book.page_label()
    )
}

/// One block per publisher, each followed by a blank line
pub fn render_summary(groups: &[PublisherGroup]) -> String {
    let mut text = String::new();

    for group in groups {
        text.push_str(&group.publisher);
        text.push_str(":\n");
        for book in &group.books {
            text.push_str(&book_line(book));
            text.push('\n');
        }
        text.push('\n');
    }

    text
}
