//! Raw category spreadsheets
//!
//! Source spreadsheets come as headerless, semicolon-separated files in a
//! legacy single-byte encoding. They are converted once to UTF-8 JSON, which
//! every later stage reads.

use crate::edition::EditionContext;
use crate::error::{ParseError, Result};
use crate::types::{BibliographicRecord, Category};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Column order of raw source files
pub const SOURCE_COLUMNS: [&str; 13] = [
    "AutorIn",
    "Titel",
    "Verlag",
    "ISBN",
    "Einband",
    "Preis",
    "Meldenummer",
    "SortRabatt",
    "Gewicht",
    "Informationen",
    "Zusatz",
    "Kommentar",
    "Altersangabe",
];

/// Decode raw bytes, preferring UTF-8 and falling back to Windows-1252 (a superset of ISO-8859-1)
pub fn decode_source(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return text;
    }

    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text
}

/// Parse the contents of a raw source file
///
/// `origin` names the input in error messages.
pub fn parse_source_csv(
    text: &str,
    origin: &str,
    category: &Category,
) -> std::result::Result<Vec<BibliographicRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let row = result.map_err(|e| ParseError::Csv {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        if row.len() < 4 {
            return Err(ParseError::InvalidRecord {
                category: category.slug.clone(),
                message: format!("row {} has {} columns, expected at least 4", line + 1, row.len()),
            });
        }

        let field = |index: usize| row.get(index).map(str::trim).unwrap_or("").to_string();

        let isbn = field(3);
        if isbn.is_empty() {
            return Err(ParseError::InvalidRecord {
                category: category.slug.clone(),
                message: format!("row {} has no ISBN", line + 1),
            });
        }

        let author = field(0);
        let age_rating = Some(field(12)).filter(|rating| !rating.is_empty());

        records.push(BibliographicRecord {
            isbn,
            sort_key: author.clone(),
            author,
            title: field(1),
            publisher: field(2),
            binding: field(4),
            price: field(5),
            notification_code: field(6),
            sort_discount: field(7),
            weight: field(8),
            information: field(9),
            addition: field(10),
            comment: field(11),
            age_rating,
        });
    }

    Ok(records)
}

/// Read and parse a raw source file
pub fn read_source_csv(path: &Path, category: &Category) -> Result<Vec<BibliographicRecord>> {
    let bytes = fs::read(path)?;
    let text = decode_source(&bytes);
    Ok(parse_source_csv(&text, &path.display().to_string(), category)?)
}

/// Convert every raw source of the edition to its JSON form
///
/// Returns the written JSON files. Categories without a raw source are skipped.
pub fn csv_to_json(edition: &EditionContext) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for category in &edition.categories {
        let source = edition.source_csv(category);
        if !source.is_file() {
            tracing::debug!("No raw source for {}, skipping", category.slug);
            continue;
        }

        let records = read_source_csv(&source, category)?;
        let target = edition.source_json(category);
        crate::report::write_json(&target, &records)?;

        tracing::info!(
            "Converted {} records: {:?} -> {:?}",
            records.len(),
            source,
            target
        );
        written.push(target);
    }

    Ok(written)
}

/// Write records as a UTF-8 spreadsheet with header row, as consumed by the template generator
pub fn write_records_csv(path: &Path, records: &[BibliographicRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(|e| csv_write_error(path, e))?;

    writer
        .write_record(SOURCE_COLUMNS)
        .map_err(|e| csv_write_error(path, e))?;

    for record in records {
        writer
            .write_record([
                record.author.as_str(),
                record.title.as_str(),
                record.publisher.as_str(),
                record.isbn.as_str(),
                record.binding.as_str(),
                record.price.as_str(),
                record.notification_code.as_str(),
                record.sort_discount.as_str(),
                record.weight.as_str(),
                record.information.as_str(),
                record.addition.as_str(),
                record.comment.as_str(),
                record.age_rating.as_deref().unwrap_or(""),
            ])
            .map_err(|e| csv_write_error(path, e))?;
    }

    writer.flush()?;
    Ok(())
}

fn csv_write_error(path: &Path, error: csv::Error) -> ParseError {
    ParseError::Csv {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        Category::new("ab8", "Bücher ab 8", 9, true)
    }

    #[test]
    fn test_parse_source_csv() {
        let text = "Funke, Cornelia;Tintenherz;Dressler;9783791504650;Gebunden;22,00;;;;;;\n\
                    Lindgren, Astrid;Ronja Räubertochter;Oetinger;9783789129407;Gebunden;16,00;;;;;;;ab 8 Jahren\n";
        let records = parse_source_csv(text, "ab8.csv", &category()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].isbn, "9783791504650");
        assert_eq!(records[0].author, "Funke, Cornelia");
        assert_eq!(records[0].sort_key, "Funke, Cornelia");
        assert_eq!(records[0].price, "22,00");
        assert_eq!(records[0].age_rating, None);
        assert_eq!(records[1].age_rating.as_deref(), Some("ab 8 Jahren"));
    }

    #[test]
    fn test_decode_legacy_encoding() {
        // "Bücher" in ISO-8859-1
        let bytes = [0x42, 0xFC, 0x63, 0x68, 0x65, 0x72];
        assert_eq!(decode_source(&bytes), "Bücher");
        assert_eq!(decode_source("Bücher".as_bytes()), "Bücher");
    }

    #[test]
    fn test_row_without_isbn_is_rejected() {
        let text = "Funke, Cornelia;Tintenherz;Dressler;;Gebunden\n";
        let err = parse_source_csv(text, "ab8.csv", &category()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidRecord { .. }));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let err = parse_source_csv("Funke, Cornelia;Tintenherz\n", "ab8.csv", &category()).unwrap_err();
        assert!(err.to_string().contains("expected at least 4"));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let text = "Funke, Cornelia;Tintenherz;Dressler;9783791504650\n;;;\n";
        let records = parse_source_csv(text, "ab8.csv", &category()).unwrap();
        assert_eq!(records.len(), 1);
    }
}
