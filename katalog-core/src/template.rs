//! Layout template selection and in-place text substitution

use crate::edition::EditionContext;
use crate::error::Result;
use crate::types::{Category, Season};
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Generic partial template used when a category has none of its own
pub const GENERIC_TEMPLATE: &str = "dataList.sla";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%([A-Z_]+)%%").expect("placeholder pattern is valid")
});

/// Master pages that exist in a spring and an autumn variant
static SPRING_MASTER_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"MNAM="(cover|toc|section|category)_spring"#)
        .expect("master page pattern is valid")
});

/// Template a category partial is generated from
///
/// Tried in order: the issue's own category template, the issue's generic
/// template, the shared category template, the shared generic template.
pub fn resolve_partial_template(edition: &EditionContext, category: &Category) -> Option<PathBuf> {
    let own = format!("{}.sla", category.slug);
    let issue_templates = edition.src_dir().join("templates");
    let shared_templates = edition.assets_dir().join("templates");

    [
        issue_templates.join(&own),
        issue_templates.join(GENERIC_TEMPLATE),
        shared_templates.join(&own),
        shared_templates.join(GENERIC_TEMPLATE),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}

/// Main template of the catalog, preferring the issue's own copy
pub fn resolve_main_template(edition: &EditionContext) -> Option<PathBuf> {
    [
        edition.src_dir().join("templates").join("main.sla"),
        edition.assets_dir().join("templates").join("main.sla"),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}

/// Replace `%%NAME%%` placeholders; unknown names stay untouched
pub fn substitute_placeholders(text: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Values of the edition-wide placeholders
pub fn edition_placeholder(edition: &EditionContext, name: &str) -> Option<String> {
    match name {
        "SEASON" => Some(edition.season.label().to_string()),
        "YEAR" => Some(edition.year.to_string()),
        "NEXT_YEAR" => Some(edition.next_year().to_string()),
        _ => None,
    }
}

/// Point spring master page references to their autumn variants
pub fn apply_season(text: &str, season: Season) -> String {
    match season {
        Season::Spring => text.to_string(),
        Season::Autumn => SPRING_MASTER_PAGE
            .replace_all(text, r#"MNAM="${1}_autumn"#)
            .into_owned(),
    }
}

/// Rewrite a file through a text transformation
pub fn replace_in_file(path: &Path, transform: impl FnOnce(&str) -> String) -> Result<()> {
    let text = fs::read_to_string(path)?;
    let replaced = transform(&text);
    if replaced != text {
        fs::write(path, replaced)?;
    }
    Ok(())
}

/// Fill in the category heading of a generated partial
pub fn label_partial(path: &Path, category: &Category) -> Result<()> {
    replace_in_file(path, |text| {
        substitute_placeholders(text, |name| {
            (name == "CATEGORY").then(|| category.heading.clone())
        })
    })
}

/// Make the assembled base ready for manual editing
///
/// Applies the season's master pages and edition placeholders to the base
/// template, then copies it to the edited template.
pub fn steady_base(edition: &EditionContext) -> Result<PathBuf> {
    let base = edition.base_template();
    replace_in_file(&base, |text| {
        let seasoned = apply_season(text, edition.season);
        substitute_placeholders(&seasoned, |name| edition_placeholder(edition, name))
    })?;

    let edited = edition.edited_template();
    fs::copy(&base, &edited)?;
    tracing::info!("Base template ready for editing: {:?}", edited);

    Ok(edited)
}
