//! Commands working on the edited layout: verify, summary, mails, extract
//!
//! All of them pass the count gate first and stop on a mismatch.

use crate::Session;
use anyhow::{Context, Result};
use chrono::Local;
use katalog_core::report::{
    compose_mails, extract_data, group_by_publisher, render_summary, write_json, MailTemplate,
};
use katalog_core::{check_counts, resolve_edition, LayoutIndex, RecordStore, ResolvedEdition, Stage};
use std::fs;

fn resolved(session: &Session) -> Result<ResolvedEdition> {
    resolve_edition(&session.edition).with_context(|| {
        format!(
            "Cannot use {}",
            session.edition.edited_template().display()
        )
    })
}

/// Compare the number of books in the processed data and the edited layout
pub fn verify(session: &Session) -> Result<()> {
    let edition = &session.edition;
    let records = RecordStore::new(edition, Stage::Processed)
        .load_all()
        .context("Failed to load processed data")?;
    let index = LayoutIndex::from_path(&edition.edited_template())
        .context("Failed to read edited layout document")?;

    check_counts(&records, &index).context("You shall not pass!")?;
    println!("Numbers match ({} books), you may pass!", index.entry_count());

    Ok(())
}

/// Write `meta/summary.txt`
pub fn summary(session: &Session) -> Result<()> {
    let edition = &session.edition;
    let resolved = resolved(session)?;

    let groups = group_by_publisher(&resolved.books, edition.publisher_case);
    let path = edition.summary_report();
    fs::create_dir_all(edition.meta_dir())?;
    fs::write(&path, render_summary(&groups))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let unplaced = resolved.books.iter().filter(|b| !b.is_placed()).count();
    println!(
        "Summarized {} books from {} publishers: {}",
        resolved.books.len(),
        groups.len(),
        path.display()
    );
    if unplaced > 0 {
        println!("{} books have no page number (shown as '?')", unplaced);
    }

    Ok(())
}

/// Write one `.eml` draft per publisher
pub fn mails(session: &Session) -> Result<()> {
    let edition = &session.edition;
    let resolved = resolved(session)?;

    let groups = group_by_publisher(&resolved.books, edition.publisher_case);
    let template = MailTemplate::load(edition).context("Failed to load mail texts")?;
    let drafts = compose_mails(&groups, edition, &template);

    let date = Local::now().fixed_offset();
    let dir = edition.mail_dir();
    for draft in &drafts {
        let path = draft
            .write_to(&dir, date)
            .with_context(|| format!("Failed to write mail for {}", draft.publisher))?;
        tracing::debug!("Drafted {:?} for {}", path, draft.publisher);
    }

    println!("Drafted {} mails in {}", drafts.len(), dir.display());
    Ok(())
}

/// Write `config/data.json`
pub fn extract(session: &Session) -> Result<()> {
    let edition = &session.edition;
    let resolved = resolved(session)?;

    let data = extract_data(&resolved.records, &resolved.books);
    let path = edition.data_json();
    write_json(&path, &data).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Extracted {} books: {}", resolved.books.len(), path.display());
    Ok(())
}
