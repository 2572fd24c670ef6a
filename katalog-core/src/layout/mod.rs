//! Layout document model and the ISBN lookup index built over it
//!
//! The layout document is the Scribus file edited by hand between pipeline
//! steps. Only the text content of page objects is of interest here:
//! `PAGEOBJECT -> StoryText -> ITEXT`, where each page object carries the
//! zero-based page it sits on. Page objects may nest (groups), so every
//! frame remembers its enclosing frame.

mod index;
mod parse;

pub use index::{LayoutIndex, MatchContext};
pub use parse::{parse_layout, read_layout};

/// A text run with its literal character content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,

    /// Index of the owning frame in [`LayoutDocument::frames`]
    pub frame: usize,
}

/// A page object holding a story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Zero-based page the frame is placed on, negative for the scratch area
    pub own_page: i32,

    /// Enclosing frame when the page object is part of a group
    pub parent: Option<usize>,

    /// Indices of the frame's own text runs, in document order
    pub runs: Vec<usize>,
}

/// Flattened text content of a layout document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDocument {
    pub frames: Vec<Frame>,
    pub runs: Vec<TextRun>,
}

impl LayoutDocument {
    /// Contents of a frame's runs
    pub fn frame_text(&self, frame: usize) -> Vec<String> {
        self.frames
            .get(frame)
            .map(|frame| {
                frame
                    .runs
                    .iter()
                    .map(|&run| self.runs[run].content.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Frames sharing the given frame's parent, in document order
    pub fn siblings(&self, frame: usize) -> Vec<usize> {
        let parent = self.frames[frame].parent;
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.parent == parent)
            .map(|(index, _)| index)
            .collect()
    }
}
