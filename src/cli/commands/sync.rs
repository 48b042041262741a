//! Sync command - Fill keys missing from non-primary locales.
//!
//! Every leaf of the primary locale that is absent from another locale is
//! inserted there, either as a `[AUTO] Readable key` placeholder or, with
//! `--copy-primary`, as a copy of the primary value. Existing values are kept.

use anyhow::{Result, bail};
use serde_json::Value;

use super::super::{
    args::SyncArgs, context::CommandContext, exit_status::ExitStatus, report,
};
use crate::core::{KeyPath, insert_missing, placeholder_for};

pub fn sync(args: &SyncArgs) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&args.common)?;
    let mut locales = ctx.open_with_primary()?;

    let Some(primary) = locales.get(&ctx.primary_locale) else {
        bail!("Primary locale '{}' is not loaded", ctx.primary_locale);
    };
    let fill: Vec<(KeyPath, Value)> = primary
        .document
        .leaves()
        .into_iter()
        .map(|(key, value)| {
            let fill_value = match value {
                Value::String(_) if !args.copy_primary => Value::String(placeholder_for(
                    &key.to_string(),
                    &ctx.config.placeholder_prefix,
                )),
                other => other.clone(),
            };
            (key, fill_value)
        })
        .collect();

    let mut added_count = 0;
    let mut conflict_count = 0;
    for doc in locales.iter_mut().filter(|d| d.locale != ctx.primary_locale) {
        let report = insert_missing(&mut doc.document, fill.iter().map(|(k, v)| (k, v)))?;
        if report.added.is_empty() && report.conflicts.is_empty() {
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
        conflict_count += report.conflicts.len();
    }

    let file_count = locales.changed_count();
    if args.apply {
        locales.save_changed()?;
    }
    report::print_outcome("Added", "Would add", added_count, file_count, args.apply);

    if conflict_count > 0 || (added_count > 0 && !args.apply) {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
