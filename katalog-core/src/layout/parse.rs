//! Pull parser for the text skeleton of a layout document

use super::{Frame, LayoutDocument, TextRun};
use crate::error::{ParseError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// Elements currently open, innermost last
enum Open {
    Frame(usize),
    Story(usize),
    Other,
}

/// Read and parse a layout document from disk
pub fn read_layout(path: &Path) -> Result<LayoutDocument> {
    let xml = fs::read_to_string(path)?;
    parse_layout(&xml).map_err(|e| match e {
        ParseError::Layout(message) => {
            ParseError::Layout(format!("{}: {}", path.display(), message))
        }
        other => other,
    })
    .map_err(Into::into)
}

/// Parse the frames and text runs of a layout document
///
/// Only runs sitting directly in the story of a page object are kept. Text
/// on master pages is ignored.
pub fn parse_layout(xml: &str) -> std::result::Result<LayoutDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut document = LayoutDocument::default();
    let mut stack: Vec<Open> = Vec::new();
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            ParseError::Layout(format!(
                "malformed markup at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => {
                saw_root = true;
                let open = open_element(&e, &stack, &mut document)?;
                stack.push(open);
            }
            Event::Empty(e) => {
                saw_root = true;
                open_element(&e, &stack, &mut document)?;
            }
            Event::End(_) => {
                if stack.pop().is_none() {
                    return Err(ParseError::Layout("unbalanced closing tag".to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ParseError::Layout("document has no root element".to_string()));
    }
    if !stack.is_empty() {
        return Err(ParseError::Layout(format!(
            "{} element(s) left unclosed",
            stack.len()
        )));
    }

    Ok(document)
}

/// Record an element in the document and report how it nests
fn open_element(
    e: &BytesStart<'_>,
    stack: &[Open],
    document: &mut LayoutDocument,
) -> std::result::Result<Open, ParseError> {
    let open = match (e.name().as_ref(), stack.last()) {
        (b"PAGEOBJECT", _) => {
            let own_page = attribute(e, b"OwnPage")?
                .ok_or_else(|| ParseError::Layout("PAGEOBJECT without OwnPage".to_string()))?;
            let own_page = own_page.trim().parse::<i32>().map_err(|_| {
                ParseError::Layout(format!("invalid OwnPage value '{}'", own_page))
            })?;

            let parent = stack.iter().rev().find_map(|open| match open {
                Open::Frame(index) => Some(*index),
                _ => None,
            });

            document.frames.push(Frame {
                own_page,
                parent,
                runs: Vec::new(),
            });
            Open::Frame(document.frames.len() - 1)
        }
        (b"StoryText", Some(Open::Frame(frame))) => Open::Story(*frame),
        (b"ITEXT", Some(Open::Story(frame))) => {
            let content = attribute(e, b"CH")?.unwrap_or_default();
            document.runs.push(TextRun {
                content,
                frame: *frame,
            });
            let run = document.runs.len() - 1;
            document.frames[*frame].runs.push(run);
            Open::Other
        }
        _ => Open::Other,
    };

    Ok(open)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> std::result::Result<Option<String>, ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::Layout(format!("invalid attribute: {}", e)))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::Layout(format!("invalid attribute value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
