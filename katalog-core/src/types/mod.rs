//! Core types shared by every pipeline stage

mod book;
mod category;
mod record;

pub use book::ResolvedBook;
pub use category::{Category, Season};
pub use record::{BibliographicRecord, CategoryRecords};
