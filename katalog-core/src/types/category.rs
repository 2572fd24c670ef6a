//! Catalog categories and the season they belong to

use serde::{Deserialize, Serialize};

/// Publishing season of an edition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// First issue of the year (`YYYY_01`)
    Spring,

    /// Every other issue
    Autumn,
}

impl Season {
    /// Derive the season from an issue number (`01` is spring)
    pub fn from_issue_number(number: &str) -> Self {
        if number == "01" {
            Season::Spring
        } else {
            Season::Autumn
        }
    }

    /// Identifier used in file and master page names
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Autumn => "autumn",
        }
    }

    /// Localized name printed in the catalog and in mails
    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Frühjahr",
            Season::Autumn => "Herbst",
        }
    }

    /// Page of the base template holding the intro that does not apply to this season
    pub fn unsuitable_intro_page(&self) -> u32 {
        match self {
            Season::Spring => 4,
            Season::Autumn => 3,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content bucket (age group or special theme) of one edition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// File stem of the category's data and template files
    pub slug: String,

    /// Human-readable heading printed in the catalog
    pub heading: String,

    /// Page of the base document after which the category partial is imported
    pub import_page: u32,

    /// Whether every edition must provide a source for this category
    pub mandatory: bool,
}

impl Category {
    pub fn new(
        slug: impl Into<String>,
        heading: impl Into<String>,
        import_page: u32,
        mandatory: bool,
    ) -> Self {
        Self {
            slug: slug.into(),
            heading: heading.into(),
            import_page,
            mandatory,
        }
    }

    /// The category vocabulary of a season, in import order (highest import page first)
    pub fn vocabulary(season: Season, next_year: i32) -> Vec<Category> {
        let mut categories = Vec::with_capacity(16);

        if season == Season::Autumn {
            categories.push(Category::new(
                "kalender",
                format!("Kalender für {}", next_year),
                20,
                false,
            ));
            categories.push(Category::new("weihnachten", "Weihnachten Spezial", 19, false));
        }
        if season == Season::Spring {
            categories.push(Category::new("ostern", "Ostern Spezial", 18, false));
        }

        categories.extend([
            Category::new("hoerbuch", "Hörbuch Spezial", 17, false),
            Category::new("besonderes", "Besonderes", 16, false),
            Category::new("kreatives", "Kreatives Gestalten", 15, false),
            Category::new("sachbuch", "Sachbuch", 14, true),
            Category::new("comic", "Graphic Novel", 13, false),
            Category::new("ab14", "Junge Erwachsene", 12, true),
            Category::new("ab12", "Bücher ab 12", 11, true),
            Category::new("ab10", "Bücher ab 10", 10, true),
            Category::new("ab8", "Bücher ab 8", 9, true),
            Category::new("ab6", "Erstleser", 8, true),
            Category::new("vorlesebuch", "Vorlesegeschichten", 7, true),
            Category::new("bilderbuch", "Bilderbuch", 6, true),
            Category::new("toddler", "Für die Kleinsten", 5, true),
        ]);

        categories
    }
}
