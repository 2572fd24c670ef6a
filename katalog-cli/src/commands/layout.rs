//! Layout assembly commands: partials, base

use super::spinner;
use crate::Session;
use anyhow::{Context, Result};
use katalog_core::assemble::{create_base, extend_base, generate_partials, ExtendStep};
use katalog_core::template::steady_base;

/// Generate one partial per processed category
pub fn partials(session: &Session) -> Result<()> {
    let pb = spinner("Generating partials");
    let result = generate_partials(&session.edition, &session.toolchain, session.runner.as_ref());
    pb.finish_and_clear();

    let partials = result.context("Failed to generate partials")?;
    if partials.is_empty() {
        println!("No processed data found, run `process` first");
        return Ok(());
    }

    println!("Generated {} partials:", partials.len());
    for partial in partials {
        println!("  {}", partial.display());
    }

    Ok(())
}

/// Create the base document, import all partials and prepare it for editing
pub fn base(session: &Session) -> Result<()> {
    let edition = &session.edition;
    let runner = session.runner.as_ref();

    let pb = spinner("Creating base document");
    let created = create_base(edition, &session.toolchain, runner);
    pb.finish_and_clear();
    let base = created.context("Failed to create base document")?;

    let pb = spinner("Importing partials");
    let extended = extend_base(edition, &session.toolchain, runner);
    pb.finish_and_clear();
    let steps = extended.context("Failed to extend base document")?;

    for step in &steps {
        match step {
            ExtendStep::Imported { category, page } => {
                println!("  imported {:<12} after page {}", category, page)
            }
            ExtendStep::CoverRemoved { category, page } => {
                println!("  removed  {:<12} cover page {}", category, page)
            }
        }
    }

    if !runner.executes() {
        println!("Dry run, leaving {} untouched", base.display());
        return Ok(());
    }

    let edited = steady_base(edition).context("Failed to prepare base document")?;
    println!("Ready for editing: {}", edited.display());

    Ok(())
}
