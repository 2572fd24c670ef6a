//! CLI command implementations

mod data;
mod layout;
mod render;
mod report;

pub use data::{check, csv2json, process};
pub use layout::{base, partials};
pub use render::{build, optimize};
pub use report::{extract, mails, summary, verify};

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while external tools run
fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
