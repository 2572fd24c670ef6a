//! PDF commands: build, optimize

use super::spinner;
use crate::Session;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use katalog_core::assemble::{build_pdf, optimize_at};

/// Render the edited layout document
pub fn build(session: &Session) -> Result<()> {
    let pb = spinner("Rendering PDF");
    let result = build_pdf(&session.edition, &session.toolchain, session.runner.as_ref());
    pb.finish_and_clear();

    let document = result.context("Failed to build PDF")?;
    println!("Built {}", document.display());

    Ok(())
}

/// Write optimized copies of the final PDF
pub fn optimize(session: &Session, resolutions: &[u32]) -> Result<()> {
    let edition = &session.edition;
    let runner = session.runner.as_ref();

    if resolutions.is_empty() {
        bail!("No resolutions given");
    }
    if runner.executes() && !edition.document().is_file() {
        bail!(
            "Final document {} not found, run `build` first",
            edition.document().display()
        );
    }

    let pb = ProgressBar::new(resolutions.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let mut written = Vec::with_capacity(resolutions.len());
    for &resolution in resolutions {
        pb.set_message(format!("{} dpi", resolution));
        let output = optimize_at(edition, &session.toolchain, runner, resolution)
            .with_context(|| format!("Failed to optimize at {} dpi", resolution))?;
        written.push(output);
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("Optimized {} copies:", written.len());
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
