//! Katalog Core Library
//!
//! This crate provides the data model and production logic for the seasonal
//! book recommendation catalog. Bibliographic records are loaded per category,
//! checked, laid out with external desktop-publishing tools and finally
//! cross-referenced against the edited layout document to produce reports
//! and publisher mails.

pub mod assemble;
pub mod check;
pub mod edition;
pub mod error;
pub mod layout;
pub mod process;
pub mod report;
pub mod resolve;
pub mod source;
pub mod template;
pub mod tools;
pub mod types;

pub use edition::{EditionContext, PublisherCase};
pub use error::{KatalogError, ParseError, Result, ToolError};
pub use layout::{LayoutIndex, MatchContext};
pub use resolve::{check_counts, resolve, resolve_edition, ResolvedEdition};
pub use source::{normalize_author, RecordStore, Stage};
pub use types::{BibliographicRecord, Category, CategoryRecords, ResolvedBook, Season};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edition_creation() {
        let edition = EditionContext::new("/catalog", "2022_02").unwrap();
        assert_eq!(edition.season, Season::Autumn);
        assert_eq!(edition.category("kalender").unwrap().heading, "Kalender für 2023");
    }
}
