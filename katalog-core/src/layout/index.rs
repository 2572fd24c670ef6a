//! ISBN lookup over a parsed layout document

use super::{read_layout, LayoutDocument};
use crate::error::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// A 13-digit ISBN, optionally hyphenated
static ISBN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"97[89](?:-?\d){10}").expect("ISBN token pattern is valid")
});

/// Index over the text runs of a layout document, built once per invocation
#[derive(Debug, Clone)]
pub struct LayoutIndex {
    document: LayoutDocument,
    entry_count: usize,
}

/// Where and in which context an ISBN was found
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    document: &'a LayoutDocument,
    run: usize,
}

impl LayoutIndex {
    pub fn build(document: LayoutDocument) -> Self {
        let entry_count = document
            .runs
            .iter()
            .filter(|run| ISBN_TOKEN.is_match(&run.content))
            .count();

        Self {
            document,
            entry_count,
        }
    }

    /// Parse a layout document from disk and index it
    pub fn from_path(path: &Path) -> Result<Self> {
        let document = read_layout(path)?;
        tracing::debug!(
            "Indexed {} text runs in {} frames of {:?}",
            document.runs.len(),
            document.frames.len(),
            path
        );
        Ok(Self::build(document))
    }

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    /// Number of book entries placed in the layout (runs carrying an ISBN)
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// First text run whose content contains the ISBN
    pub fn find(&self, isbn: &str) -> Option<MatchContext<'_>> {
        if isbn.is_empty() {
            return None;
        }

        self.document
            .runs
            .iter()
            .position(|run| run.content.contains(isbn))
            .map(|run| MatchContext {
                document: &self.document,
                run,
            })
    }
}

impl<'a> MatchContext<'a> {
    /// Content of the matched run
    pub fn content(&self) -> &'a str {
        &self.document.runs[self.run].content
    }

    fn frame(&self) -> usize {
        self.document.runs[self.run].frame
    }

    /// 1-based page number, `None` for frames outside the page area
    pub fn page_number(&self) -> Option<u32> {
        let own_page = self.document.frames[self.frame()].own_page;
        u32::try_from(own_page).ok().map(|page| page + 1)
    }

    /// All runs of the matched frame
    pub fn frame_lines(&self) -> Vec<String> {
        self.document.frame_text(self.frame())
    }

    /// Descriptive text: the matched frame without its two footer runs
    pub fn body_lines(&self) -> Vec<String> {
        let mut lines = self.frame_lines();
        lines.truncate(lines.len().saturating_sub(2));
        lines
    }

    /// Runs of the frame holding the book's heading
    ///
    /// That is the sibling frame right before the matched one, or the one
    /// right after it when the previous sibling is missing or empty.
    pub fn header_lines(&self) -> Vec<String> {
        let frame = self.frame();
        let siblings = self.document.siblings(frame);
        let Some(position) = siblings.iter().position(|&sibling| sibling == frame) else {
            return Vec::new();
        };

        let previous = position
            .checked_sub(1)
            .map(|p| self.document.frame_text(siblings[p]))
            .unwrap_or_default();
        if !previous.is_empty() {
            return previous;
        }

        siblings
            .get(position + 1)
            .map(|&next| self.document.frame_text(next))
            .unwrap_or_default()
    }
}
