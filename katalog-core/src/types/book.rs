//! A book cross-referenced against the layout document

use serde::{Deserialize, Serialize};

/// A bibliographic record joined with its placement in the layout document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedBook {
    pub isbn: String,

    /// Author names in reading order, empty if the source had none
    pub author: String,

    pub title: String,

    pub publisher: String,

    /// Slug of the category the record came from
    pub category: String,

    /// Localized category heading
    pub heading: String,

    /// 1-based page number, `None` if the ISBN was not found in the layout
    pub page_number: Option<u32>,

    /// Sort key within the category
    pub sort_key: String,

    /// Text runs of the frame holding the book's heading
    pub header: Vec<String>,

    /// Descriptive text runs, without the ISBN/age rating/price footer
    pub body: Vec<String>,
}

impl ResolvedBook {
    /// Whether the book was found in the layout document
    pub fn is_placed(&self) -> bool {
        self.page_number.is_some()
    }

    /// Page number as printed in reports (`?` for unplaced books)
    pub fn page_label(&self) -> String {
        match self.page_number {
            Some(page) => page.to_string(),
            None => "?".to_string(),
        }
    }
}
