//! Add command - Insert missing keys from an entries file.
//!
//! Each key is inserted into every locale that has a value for it, unless the
//! key already exists there. Existing values are never overwritten.
//!
//! Use `--apply` to actually write the files (default is dry-run mode).

use std::collections::BTreeSet;

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use super::super::{
    args::AddArgs,
    context::CommandContext,
    exit_status::ExitStatus,
    report::{self, FAILURE_MARK},
};
use crate::core::{NewEntrySet, insert_missing};

pub fn add(args: &AddArgs) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&args.common)?;
    let entries = NewEntrySet::load(&args.entries)?;
    let mut locales = ctx.open_locales()?;

    let entry_locales: BTreeSet<&str> = entries
        .entries()
        .iter()
        .flat_map(|e| e.values.keys().map(String::as_str))
        .collect();
    for locale in &entry_locales {
        if locales.get(locale).is_none() && ctx.filter_locales([*locale]).len() == 1 {
            warn!(locale, "entries provide values for a locale with no document");
        }
    }

    let mut added_count = 0;
    let mut kept_count = 0;
    let mut conflict_count = 0;

    for doc in locales.iter_mut() {
        let report = insert_missing(&mut doc.document, entries.values_for(&doc.locale))?;
        if report.added.is_empty() && report.conflicts.is_empty() {
            kept_count += report.kept.len();
            continue;
        }

        report::print_locale_header(&doc.locale, &doc.path);
        for (key, value) in &report.added {
            report::print_added(key, value);
        }
        for err in &report.conflicts {
            report::print_conflict(err);
        }
        println!();

        added_count += report.added.len();
        kept_count += report.kept.len();
        conflict_count += report.conflicts.len();
    }

    if kept_count > 0 {
        println!("Kept {} existing key(s) unchanged.", kept_count);
    }

    if conflict_count > 0 && args.strict {
        println!(
            "{} {} key(s) conflict with existing values. No files were written.",
            FAILURE_MARK.red(),
            conflict_count
        );
        return Ok(ExitStatus::Failure);
    }

    let file_count = locales.changed_count();
    if args.apply {
        locales.save_changed()?;
    }
    report::print_outcome("Added", "Would add", added_count, file_count, args.apply);

    if conflict_count > 0 {
        println!(
            "{} {} key(s) skipped because a parent key holds a value.",
            FAILURE_MARK.red(),
            conflict_count
        );
        Ok(ExitStatus::Failure)
    } else if added_count > 0 && !args.apply {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
