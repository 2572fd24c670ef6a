//! Assembling the catalog document with the external layout tools
//!
//! The steps run in order: category partials are generated from the
//! processed CSV files, the base document is created from the main template
//! and extended with the partials, then (after manual editing) rendered and
//! optimized.

use crate::edition::EditionContext;
use crate::error::{KatalogError, Result};
use crate::report::create_parent;
use crate::template::{label_partial, resolve_main_template, resolve_partial_template};
use crate::tools::{ToolRunner, Toolchain};
use std::fs;
use std::path::PathBuf;

/// Image resolutions (dpi) of the optimized distribution copies
pub const RESOLUTIONS: [u32; 7] = [50, 75, 100, 175, 200, 225, 250];

/// What happened to a category while extending the base document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendStep {
    /// Partial imported after the category's page
    Imported { category: String, page: u32 },

    /// No partial, so the category's cover page was removed
    CoverRemoved { category: String, page: u32 },
}

/// Generate one partial per category with processed data
pub fn generate_partials(
    edition: &EditionContext,
    toolchain: &Toolchain,
    runner: &dyn ToolRunner,
) -> Result<Vec<PathBuf>> {
    let mut partials = Vec::new();
    let output_dir = edition.partials_dir();

    for category in &edition.categories {
        let csv = edition.processed_csv(category);
        if !csv.is_file() {
            tracing::debug!("No processed data for {}, skipping partial", category.slug);
            continue;
        }

        let template = resolve_partial_template(edition, category)
            .ok_or_else(|| KatalogError::MissingTemplate(format!("category '{}'", category.slug)))?;
        tracing::info!("Generating partial for {} from {:?}", category.slug, template);

        fs::create_dir_all(&output_dir)?;
        runner.run(&toolchain.generate_partial(&csv, &output_dir, &category.slug, &template))?;

        let partial = edition.partial(category);
        if runner.executes() {
            label_partial(&partial, category)?;
        }
        partials.push(partial);
    }

    Ok(partials)
}

/// Copy the main template to the base document and drop the off-season intro
///
/// A runner that does not execute leaves an existing base document alone.
pub fn create_base(
    edition: &EditionContext,
    toolchain: &Toolchain,
    runner: &dyn ToolRunner,
) -> Result<PathBuf> {
    let main = resolve_main_template(edition)
        .ok_or_else(|| KatalogError::MissingTemplate("main document".to_string()))?;
    let base = edition.base_template();

    if runner.executes() {
        create_parent(&base)?;
        fs::copy(&main, &base)?;
        tracing::info!("Created base template from {:?}", main);
    } else {
        tracing::info!("Would copy {:?} to {:?}", main, base);
    }

    runner.run(&toolchain.delete_page(&base, edition.season.unsuitable_intro_page()))?;
    Ok(base)
}

/// Import every category partial into the base document
///
/// Categories are handled from the highest import page down, so earlier
/// imports never shift the pages of later ones.
pub fn extend_base(
    edition: &EditionContext,
    toolchain: &Toolchain,
    runner: &dyn ToolRunner,
) -> Result<Vec<ExtendStep>> {
    let base = edition.base_template();
    if runner.executes() && !base.is_file() {
        return Err(KatalogError::MissingTemplate(format!("base document {:?}", base)));
    }

    let master_page = format!("category_{}", edition.season);
    let mut categories: Vec<_> = edition.categories.iter().collect();
    categories.sort_by(|a, b| b.import_page.cmp(&a.import_page));

    let mut steps = Vec::with_capacity(categories.len());
    for category in categories {
        let partial = edition.partial(category);
        let page = category.import_page;

        if partial.is_file() {
            runner.run(&toolchain.import_pages(&base, &partial, page, &master_page))?;
            steps.push(ExtendStep::Imported {
                category: category.slug.clone(),
                page,
            });
        } else {
            tracing::info!("No partial for {}, removing its cover page", category.slug);
            runner.run(&toolchain.delete_page(&base, page))?;
            steps.push(ExtendStep::CoverRemoved {
                category: category.slug.clone(),
                page,
            });
        }
    }

    Ok(steps)
}

/// Render the edited template to the final PDF
pub fn build_pdf(
    edition: &EditionContext,
    toolchain: &Toolchain,
    runner: &dyn ToolRunner,
) -> Result<PathBuf> {
    let edited = edition.edited_template();
    if !edited.is_file() {
        return Err(KatalogError::MissingTemplate(format!("edited document {:?}", edited)));
    }

    let document = edition.document();
    create_parent(&document)?;
    runner.run(&toolchain.build_pdf(&edited, &document))?;

    Ok(document)
}

/// Write the optimized copy of the final PDF at one resolution
pub fn optimize_at(
    edition: &EditionContext,
    toolchain: &Toolchain,
    runner: &dyn ToolRunner,
    resolution: u32,
) -> Result<PathBuf> {
    let document = edition.document();
    let output = edition.optimized_document(resolution);

    runner.run(&toolchain.optimize_pdf(&document, &output, resolution))?;
    Ok(output)
}

/// Write optimized copies of the final PDF at every resolution
pub fn optimize_document(
    edition: &EditionContext,
    toolchain: &Toolchain,
    runner: &dyn ToolRunner,
    resolutions: &[u32],
) -> Result<Vec<PathBuf>> {
    if !edition.document().is_file() && runner.executes() {
        return Err(KatalogError::MissingTemplate(format!(
            "final document {:?}",
            edition.document()
        )));
    }

    resolutions
        .iter()
        .map(|&resolution| optimize_at(edition, toolchain, runner, resolution))
        .collect()
}
