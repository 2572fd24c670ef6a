//! Structured book data recovered from the finished layout

use crate::types::{CategoryRecords, ResolvedBook};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Text of one book as laid out
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct ExtractedEntry {
    #[serde(rename = "ISBN")]
    pub isbn: String,

    #[serde(rename = "order")]
    pub sort_key: String,

    #[serde(rename = "AutorIn")]
    pub author: String,

    pub header: Vec<String>,

    pub body: Vec<String>,
}

impl From<&ResolvedBook> for ExtractedEntry {
    fn from(book: &ResolvedBook) -> Self {
        Self {
            isbn: book.isbn.clone(),
            sort_key: book.sort_key.clone(),
            author: book.author.clone(),
            header: book.header.clone(),
            body: book.body.clone(),
        }
    }
}

/// Entries per category heading, serialized as a heading -> entries object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedData {
    sections: Vec<(String, Vec<ExtractedEntry>)>,
}

impl ExtractedData {
    pub fn sections(&self) -> &[(String, Vec<ExtractedEntry>)] {
        &self.sections
    }

    /// Entries under a heading
    pub fn get(&self, heading: &str) -> Option<&[ExtractedEntry]> {
        self.sections
            .iter()
            .find(|(h, _)| h == heading)
            .map(|(_, entries)| entries.as_slice())
    }
}

impl Serialize for ExtractedData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (heading, entries) in &self.sections {
            map.serialize_entry(heading, entries)?;
        }
        map.end()
    }
}

/// Bucket resolved books by category heading
///
/// Headings follow the order of `records_by_category`; entries are sorted by
/// sort key, keeping source order for equal keys.
pub fn extract_data(records_by_category: &[CategoryRecords], books: &[ResolvedBook]) -> ExtractedData {
    let sections = records_by_category
        .iter()
        .map(|group| {
            let mut entries: Vec<ExtractedEntry> = group
                .records
                .iter()
                .filter_map(|record| {
                    books.iter().find(|book| {
                        book.isbn == record.isbn && book.category == group.category.slug
                    })
                })
                .map(ExtractedEntry::from)
                .collect();
            entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));

            (group.category.heading.clone(), entries)
        })
        .collect();

    ExtractedData { sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{parse_layout, LayoutIndex};
    use crate::resolve::resolve;
    use crate::types::{BibliographicRecord, Category};

    #[test]
    fn test_extract_data() {
        let index = LayoutIndex::build(
            parse_layout(
                r#"<DOC><PAGEOBJECT OwnPage="4">
                    <PAGEOBJECT OwnPage="4"><StoryText><ITEXT CH="Mira Lobe"/><ITEXT CH="Das kleine Ich bin ich"/></StoryText></PAGEOBJECT>
                    <PAGEOBJECT OwnPage="4"><StoryText><ITEXT CH="Ein Klassiker."/><ITEXT CH="ISBN 9783702659127"/><ITEXT CH="ab 4 Jahren, 15 €"/></StoryText></PAGEOBJECT>
                </PAGEOBJECT></DOC>"#,
            )
            .unwrap(),
        );
        let groups = vec![
            CategoryRecords::new(
                Category::new("toddler", "Für die Kleinsten", 5, true),
                vec![
                    BibliographicRecord::new("9783702659127", "Lobe, Mira", "Das kleine Ich bin ich", "Jungbrunnen"),
                    BibliographicRecord::new("9783551557414", "Funke, Cornelia", "Tintenherz", "Dressler"),
                ],
            ),
            CategoryRecords::new(Category::new("ab6", "Erstleser", 8, true), Vec::new()),
        ];
        let books = resolve(&groups, &index);

        let data = extract_data(&groups, &books);

        let toddler = data.get("Für die Kleinsten").unwrap();
        assert_eq!(toddler.len(), 2);
        assert_eq!(toddler[0].sort_key, "Funke, Cornelia");
        assert!(toddler[0].body.is_empty());
        assert_eq!(toddler[1].header, vec!["Mira Lobe", "Das kleine Ich bin ich"]);
        assert_eq!(toddler[1].body, vec!["Ein Klassiker."]);
        assert_eq!(data.get("Erstleser").unwrap().len(), 0);

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.starts_with(r#"{"Für die Kleinsten":[{"ISBN":"9783551557414","order":"Funke, Cornelia","AutorIn":"Cornelia Funke""#));
        assert!(json.ends_with(r#""Erstleser":[]}"#));
    }
}
