//! Bibliographic records as delivered per category

use super::Category;
use serde::{Deserialize, Deserializer, Serialize};

/// One book as listed in a category source file
///
/// Field names follow the column vocabulary of the source spreadsheets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BibliographicRecord {
    #[serde(rename = "ISBN", deserialize_with = "lenient_string")]
    pub isbn: String,

    /// Raw author field, `Last, First` with `;` between multiple authors
    #[serde(rename = "AutorIn", default, deserialize_with = "lenient_string")]
    pub author: String,

    #[serde(rename = "Titel", default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(rename = "Verlag", default, deserialize_with = "lenient_string")]
    pub publisher: String,

    #[serde(rename = "Einband", default, deserialize_with = "lenient_string")]
    pub binding: String,

    #[serde(rename = "Preis", default, deserialize_with = "lenient_string")]
    pub price: String,

    #[serde(rename = "Meldenummer", default, deserialize_with = "lenient_string")]
    pub notification_code: String,

    #[serde(rename = "SortRabatt", default, deserialize_with = "lenient_string")]
    pub sort_discount: String,

    #[serde(rename = "Gewicht", default, deserialize_with = "lenient_string")]
    pub weight: String,

    #[serde(rename = "Informationen", default, deserialize_with = "lenient_string")]
    pub information: String,

    #[serde(rename = "Zusatz", default, deserialize_with = "lenient_string")]
    pub addition: String,

    #[serde(rename = "Kommentar", default, deserialize_with = "lenient_string")]
    pub comment: String,

    #[serde(
        rename = "Altersangabe",
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub age_rating: Option<String>,

    /// Sort key within a category, defaults to the raw author field
    #[serde(rename = "order", default, deserialize_with = "lenient_string")]
    pub sort_key: String,
}

impl BibliographicRecord {
    pub fn new(
        isbn: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        let author = author.into();
        Self {
            isbn: isbn.into(),
            sort_key: author.clone(),
            author,
            title: title.into(),
            publisher: publisher.into(),
            ..Default::default()
        }
    }

    /// Set the age rating
    pub fn with_age_rating(mut self, rating: impl Into<String>) -> Self {
        self.age_rating = Some(rating.into());
        self
    }

    /// Author names in reading order (`First Last & First Last`)
    pub fn display_author(&self) -> String {
        crate::source::normalize_author(&self.author)
    }
}

/// All records of one category, in source order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRecords {
    pub category: Category,
    pub records: Vec<BibliographicRecord>,
}

impl CategoryRecords {
    pub fn new(category: Category, records: Vec<BibliographicRecord>) -> Self {
        Self { category, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Accept strings, numbers and nulls, since spreadsheet exports are not picky about types
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Like [`lenient_string`], keeping null as `None`
fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
