//! Merge command - Deep-merge per-locale subtrees into the locale files.
//!
//! Incoming values replace existing leaves; sections are merged key by key and
//! keys that only exist in the file are kept. With `--at`, each subtree is
//! merged under that key path. With `--at` and `--replace`, the section at that
//! path is swapped for the subtree and keys it no longer carries are removed.

use anyhow::Result;

use super::super::{args::MergeArgs, context::CommandContext, exit_status::ExitStatus, report};
use crate::core::{KeyPath, LocaleSet, SubtreeSet};

pub fn merge(args: &MergeArgs) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&args.common)?;
    let subtrees = SubtreeSet::load(&args.subtrees)?;
    let at = args.at.as_deref().map(KeyPath::parse).transpose()?;
    subtrees.validate(at.as_ref())?;

    let targets = ctx.filter_locales(subtrees.locales());
    let mut locales = LocaleSet::open(&ctx.messages_dir, &targets)?;

    let mut change_count = 0;
    for doc in locales.iter_mut() {
        let Some(subtree) = subtrees.get(&doc.locale) else {
            continue;
        };
        let summary = match (&at, args.replace) {
            (Some(path), true) => doc.document.replace_at(path, subtree.clone()),
            _ => doc.document.merge_at(at.as_ref(), subtree.clone()),
        };
        if !doc.is_changed() {
            continue;
        }

        report::print_locale_header(&doc.locale, &doc.path);
        for key in &summary.added {
            report::print_added_key(key);
        }
        for key in &summary.changed {
            report::print_changed(key);
        }
        for key in &summary.removed {
            report::print_removed(key);
        }
        println!();

        change_count += summary.len().max(1);
    }

    let file_count = locales.changed_count();
    let (verb_done, verb_pending) = if args.replace {
        ("Replaced", "Would replace")
    } else {
        ("Merged", "Would merge")
    };
    if args.apply {
        locales.save_changed()?;
    }
    report::print_outcome(verb_done, verb_pending, change_count, file_count, args.apply);

    if file_count > 0 && !args.apply {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
