//! Edition context: everything that varies between two catalog issues
//!
//! An [`EditionContext`] is built once per invocation and handed to every
//! component. It owns the category vocabulary and knows where each artifact
//! of the issue lives on disk.

use crate::error::ParseError;
use crate::types::{Category, Season};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How publisher names are compared when grouping books for reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublisherCase {
    /// Only identical strings form a group; groups are still ordered case-insensitively
    Exact,

    /// Names differing only in case form one group
    Lowercase,

    /// Like `Lowercase`, additionally folding `ß` to `ss`
    #[default]
    Casefold,
}

impl PublisherCase {
    /// Grouping key for a publisher name
    pub fn key(&self, publisher: &str) -> String {
        match self {
            PublisherCase::Exact => publisher.to_string(),
            PublisherCase::Lowercase => publisher.to_lowercase(),
            PublisherCase::Casefold => casefold(publisher),
        }
    }
}

impl FromStr for PublisherCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(PublisherCase::Exact),
            "lowercase" | "lower" => Ok(PublisherCase::Lowercase),
            "casefold" => Ok(PublisherCase::Casefold),
            other => Err(format!(
                "unknown publisher case '{}' (expected exact, lowercase or casefold)",
                other
            )),
        }
    }
}

impl std::fmt::Display for PublisherCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PublisherCase::Exact => "exact",
            PublisherCase::Lowercase => "lowercase",
            PublisherCase::Casefold => "casefold",
        })
    }
}

/// Caseless comparison key
pub fn casefold(text: &str) -> String {
    text.to_lowercase().replace('ß', "ss")
}

/// Immutable configuration of one catalog issue
#[derive(Debug, Clone, PartialEq)]
pub struct EditionContext {
    /// Project root holding `issues/` and `assets/`
    pub root: PathBuf,

    /// Issue identifier, e.g. `2021_02`
    pub issue: String,

    pub season: Season,

    pub year: i32,

    /// Categories of this edition, in import order
    pub categories: Vec<Category>,

    pub publisher_case: PublisherCase,
}

impl EditionContext {
    /// Create the context for an issue identifier of the form `YYYY_NN`
    pub fn new(root: impl Into<PathBuf>, issue: impl Into<String>) -> Result<Self, ParseError> {
        let issue = issue.into();
        let (year, number) = issue
            .split_once('_')
            .ok_or_else(|| ParseError::InvalidIssue(issue.clone()))?;

        if year.len() != 4 || number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidIssue(issue.clone()));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| ParseError::InvalidIssue(issue.clone()))?;

        let season = Season::from_issue_number(number);

        Ok(Self {
            root: root.into(),
            categories: Category::vocabulary(season, year + 1),
            issue,
            season,
            year,
            publisher_case: PublisherCase::default(),
        })
    }

    /// Set the publisher grouping mode
    pub fn with_publisher_case(mut self, case: PublisherCase) -> Self {
        self.publisher_case = case;
        self
    }

    pub fn next_year(&self) -> i32 {
        self.year + 1
    }

    /// Look up a category of this edition by slug
    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Categories in the order they appear in the printed catalog
    pub fn categories_in_reading_order(&self) -> Vec<&Category> {
        let mut categories: Vec<_> = self.categories.iter().collect();
        categories.sort_by_key(|c| c.import_page);
        categories
    }

    /// Subject line of publisher mails
    pub fn mail_subject(&self) -> String {
        format!("Empfehlungsliste {} {}", self.season.label(), self.year)
    }

    // Directories

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    pub fn home_dir(&self) -> PathBuf {
        self.root.join("issues").join(&self.issue)
    }

    pub fn src_dir(&self) -> PathBuf {
        self.home_dir().join("src")
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.home_dir().join("dist")
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.home_dir().join("meta")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home_dir().join("config")
    }

    pub fn mail_dir(&self) -> PathBuf {
        self.dist_dir().join("documents").join("mails")
    }

    pub fn partials_dir(&self) -> PathBuf {
        self.dist_dir().join("templates").join("partials")
    }

    // Per-category files

    pub fn source_csv(&self, category: &Category) -> PathBuf {
        category_file(&self.src_dir(), "csv", category)
    }

    pub fn source_json(&self, category: &Category) -> PathBuf {
        category_file(&self.src_dir(), "json", category)
    }

    pub fn processed_json(&self, category: &Category) -> PathBuf {
        category_file(&self.dist_dir(), "json", category)
    }

    pub fn processed_csv(&self, category: &Category) -> PathBuf {
        category_file(&self.dist_dir(), "csv", category)
    }

    pub fn partial(&self, category: &Category) -> PathBuf {
        self.partials_dir().join(format!("{}.sla", category.slug))
    }

    // Documents

    pub fn base_template(&self) -> PathBuf {
        self.dist_dir().join("templates").join("base.sla")
    }

    pub fn edited_template(&self) -> PathBuf {
        self.dist_dir().join("templates").join("edited.sla")
    }

    pub fn document(&self) -> PathBuf {
        self.dist_dir()
            .join("documents")
            .join("pdf")
            .join("final.pdf")
    }

    /// Optimized distribution copy of the document at the given image resolution
    pub fn optimized_document(&self, resolution: u32) -> PathBuf {
        self.home_dir().join(format!(
            "{}-{}-buchempfehlungen_{}.pdf",
            self.year,
            crate::report::slugify(self.season.label()),
            resolution
        ))
    }

    // Reports

    pub fn duplicates_json(&self) -> PathBuf {
        self.config_dir().join("duplicates.json")
    }

    pub fn duplicates_report(&self) -> PathBuf {
        self.meta_dir().join("duplicates.txt")
    }

    pub fn age_ratings_json(&self) -> PathBuf {
        self.config_dir().join("age-ratings.json")
    }

    pub fn age_ratings_report(&self) -> PathBuf {
        self.meta_dir().join("age-ratings.txt")
    }

    pub fn summary_report(&self) -> PathBuf {
        self.meta_dir().join("summary.txt")
    }

    pub fn data_json(&self) -> PathBuf {
        self.config_dir().join("data.json")
    }
}

fn category_file(base: &Path, extension: &str, category: &Category) -> PathBuf {
    base.join(extension)
        .join(format!("{}.{}", category.slug, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_edition() {
        let edition = EditionContext::new("/catalog", "2021_01").unwrap();
        assert_eq!(edition.season, Season::Spring);
        assert_eq!(edition.year, 2021);
        assert_eq!(edition.next_year(), 2022);
        assert!(edition.category("ostern").is_some());
        assert_eq!(edition.mail_subject(), "Empfehlungsliste Frühjahr 2021");
    }

    #[test]
    fn test_autumn_edition_paths() {
        let edition = EditionContext::new("/catalog", "2021_02").unwrap();
        let calendar = edition.category("kalender").unwrap();

        assert_eq!(edition.season, Season::Autumn);
        assert_eq!(
            edition.source_csv(calendar),
            PathBuf::from("/catalog/issues/2021_02/src/csv/kalender.csv")
        );
        assert_eq!(
            edition.processed_json(calendar),
            PathBuf::from("/catalog/issues/2021_02/dist/json/kalender.json")
        );
        assert_eq!(
            edition.optimized_document(75),
            PathBuf::from("/catalog/issues/2021_02/2021-herbst-buchempfehlungen_75.pdf")
        );
    }

    #[test]
    fn test_invalid_issue() {
        assert!(EditionContext::new("/catalog", "2021").is_err());
        assert!(EditionContext::new("/catalog", "21_01").is_err());
        assert!(EditionContext::new("/catalog", "2021_xx").is_err());
    }

    #[test]
    fn test_reading_order() {
        let edition = EditionContext::new("/catalog", "2021_01").unwrap();
        let order: Vec<_> = edition
            .categories_in_reading_order()
            .into_iter()
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(order.first(), Some(&"toddler"));
        assert_eq!(order.last(), Some(&"ostern"));
    }

    #[test]
    fn test_publisher_case_keys() {
        assert_eq!(PublisherCase::Exact.key("Ravensburger"), "Ravensburger");
        assert_eq!(PublisherCase::Lowercase.key("Ravensburger"), "ravensburger");
        assert_eq!(PublisherCase::Casefold.key("Straße Verlag"), "strasse verlag");
        assert_eq!("casefold".parse::<PublisherCase>(), Ok(PublisherCase::Casefold));
        assert!("upper".parse::<PublisherCase>().is_err());
    }
}
