//! Per-publisher mail drafts
//!
//! Every publisher gets a short HTML mail listing their books and the pages
//! they appear on. Drafts are saved as single-part `.eml` files to be opened
//! and sent from a regular mail client.

use super::{book_line, create_parent, slugify, PublisherGroup};
use crate::edition::EditionContext;
use crate::error::Result;
use crate::types::Season;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Sender address of all drafts
pub const SENDER: &str = "info@fundevogel.de";

const SPRING_PREAMBLE: &str = "<p>Liebes Verlagsteam,</p>\n<p>unsere Empfehlungsliste für das Frühjahr ist fertig! Folgende Titel aus Ihrem Programm haben wir aufgenommen:</p>\n";
const AUTUMN_PREAMBLE: &str = "<p>Liebes Verlagsteam,</p>\n<p>unsere Empfehlungsliste für den Herbst ist fertig! Folgende Titel aus Ihrem Programm haben wir aufgenommen:</p>\n";
const SIGNATURE: &str = "<p>Herzliche Grüße<br>\nIhr Team der Kinder- und Jugendbuchhandlung Fundevogel</p>\n";

/// Fixed text around the book list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailTemplate {
    /// Season-specific introduction
    pub preamble: String,
    pub signature: String,
}

impl MailTemplate {
    /// Load `assets/mails/<season>.html` and `assets/mails/signature.html`
    ///
    /// Missing files fall back to built-in texts.
    pub fn load(edition: &EditionContext) -> Result<Self> {
        let mails = edition.assets_dir().join("mails");
        let builtin = Self::builtin(edition);

        Ok(Self {
            preamble: read_or(&mails.join(format!("{}.html", edition.season)), builtin.preamble)?,
            signature: read_or(&mails.join("signature.html"), builtin.signature)?,
        })
    }

    pub fn builtin(edition: &EditionContext) -> Self {
        let preamble = match edition.season {
            Season::Spring => SPRING_PREAMBLE,
            Season::Autumn => AUTUMN_PREAMBLE,
        };
        Self {
            preamble: preamble.to_string(),
            signature: SIGNATURE.to_string(),
        }
    }

    /// Wrap book lines into the HTML body
    pub fn render(&self, lines: &[String]) -> String {
        let block = lines
            .iter()
            .map(|line| format!("{}\n", line))
            .collect::<Vec<_>>()
            .join("<br>");

        format!(
            "<html><head></head><body>{}<p>{}</p>{}</body></html>",
            self.preamble, block, self.signature
        )
    }
}

fn read_or(path: &Path, fallback: String) -> Result<String> {
    if path.is_file() {
        Ok(fs::read_to_string(path)?)
    } else {
        tracing::debug!("No {:?}, using built-in text", path);
        Ok(fallback)
    }
}

/// A mail ready to be serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub publisher: String,
    pub subject: String,
    pub html: String,

    /// File name inside the mail directory, `<publisher slug>.eml`
    pub filename: String,
}

impl MailDraft {
    /// Serialize as a single-part `text/html` message
    pub fn to_eml(&self, date: DateTime<FixedOffset>) -> String {
        let body = STANDARD.encode(self.html.as_bytes());
        let mut wrapped = String::with_capacity(body.len() + body.len() / 76 + 1);
        for chunk in body.as_bytes().chunks(76) {
            // base64 output is ASCII
            wrapped.push_str(&String::from_utf8_lossy(chunk));
            wrapped.push('\n');
        }

        format!(
            "Content-Type: text/html; charset=\"utf-8\"\n\
             MIME-Version: 1.0\n\
             Content-Transfer-Encoding: base64\n\
             Subject: {}\n\
             From: {}\n\
             Date: {}\n\
             \n\
             {}",
            encode_header(&self.subject),
            SENDER,
            date.to_rfc2822(),
            wrapped
        )
    }

    /// Write the `.eml` file into a directory
    pub fn write_to(&self, dir: &Path, date: DateTime<FixedOffset>) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        create_parent(&path)?;
        fs::write(&path, self.to_eml(date))?;
        Ok(path)
    }
}

/// RFC 2047 encoded-word for non-ASCII header values
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?utf-8?b?{}?=", STANDARD.encode(value.as_bytes()))
    }
}

/// One draft per publisher group
///
/// Publishers whose names collapse to the same slug get numbered file names.
pub fn compose_mails(
    groups: &[PublisherGroup],
    edition: &EditionContext,
    template: &MailTemplate,
) -> Vec<MailDraft> {
    let subject = edition.mail_subject();
    let mut taken = HashSet::new();

    groups
        .iter()
        .map(|group| {
            let lines: Vec<String> = group.books.iter().map(book_line).collect();

            let mut stem = slugify(&group.publisher);
            if stem.is_empty() {
                stem = "verlag".to_string();
            }
            let mut filename = format!("{}.eml", stem);
            let mut counter = 2;
            while !taken.insert(filename.clone()) {
                filename = format!("{}-{}.eml", stem, counter);
                counter += 1;
            }

            MailDraft {
                publisher: group.publisher.clone(),
                subject: subject.clone(),
                html: template.render(&lines),
                filename,
            }
        })
        .collect()
}
