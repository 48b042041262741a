//! Check command - Compare locale files against the primary locale.
//!
//! Reports, per locale:
//! - keys present in the primary locale but missing here
//! - keys present here but not in the primary locale
//! - empty values (blank text, empty sections)
//!
//! Ends with each locale's leaf key count and its coverage of the primary locale.
//! Read-only; exits with 1 when anything is found.

use std::collections::HashSet;

use anyhow::{Result, bail};
use colored::Colorize;

use super::super::{
    args::CheckArgs,
    context::CommandContext,
    exit_status::ExitStatus,
    report::{self, SUCCESS_MARK},
};
use crate::core::{KeyPath, LocaleDocument, TranslationDocument};

/// Differences between one locale and the primary locale.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LocaleCheck {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub empty: Vec<String>,
    /// Leaf keys in the compared document.
    pub key_count: usize,
}

impl LocaleCheck {
    pub fn issue_count(&self) -> usize {
        self.missing.len() + self.extra.len() + self.empty.len()
    }
}

/// Compare `doc` with `primary`. When `doc` is the primary itself only empty values are reported.
///
/// Keys are compared by path segments, so `{"a.b": ..}` and `{"a": {"b": ..}}` are different keys.
pub fn compare(primary: &TranslationDocument, doc: &TranslationDocument, is_primary: bool) -> LocaleCheck {
    let empty = doc.blank_entries();
    let doc_keys: Vec<KeyPath> = doc.leaves().into_iter().map(|(k, _)| k).collect();
    if is_primary {
        return LocaleCheck {
            empty,
            key_count: doc_keys.len(),
            ..Default::default()
        };
    }

    let primary_keys: Vec<KeyPath> = primary.leaves().into_iter().map(|(k, _)| k).collect();
    let primary_set: HashSet<&KeyPath> = primary_keys.iter().collect();
    let doc_set: HashSet<&KeyPath> = doc_keys.iter().collect();

    let missing = primary_keys
        .iter()
        .filter(|k| !doc_set.contains(k))
        .map(ToString::to_string)
        .collect();
    let extra = doc_keys
        .iter()
        .filter(|k| !primary_set.contains(k))
        .map(ToString::to_string)
        .collect();

    LocaleCheck {
        missing,
        extra,
        empty,
        key_count: doc_keys.len(),
    }
}

/// Share of the primary locale's keys present in a locale, as a percentage.
pub fn coverage_percent(primary_count: usize, missing: usize) -> f64 {
    if primary_count == 0 {
        return 100.0;
    }
    primary_count.saturating_sub(missing) as f64 / primary_count as f64 * 100.0
}

pub fn check(args: &CheckArgs) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&args.common)?;
    let locales = ctx.open_with_primary()?;
    let Some(primary) = locales.get(&ctx.primary_locale) else {
        bail!("Primary locale '{}' is not loaded", ctx.primary_locale);
    };

    let mut issue_count = 0;
    let mut coverage = Vec::with_capacity(locales.len());
    for doc in locales.iter() {
        let is_primary = doc.locale == ctx.primary_locale;
        let result = compare(&primary.document, &doc.document, is_primary);
        coverage.push((doc.locale.as_str(), is_primary, result.key_count, result.missing.len()));
        if result.issue_count() == 0 {
            continue;
        }
        print_locale_check(doc, &result, &ctx.primary_locale);
        issue_count += result.issue_count();
    }

    let primary_count = primary.document.leaf_count();
    println!("{}", "Coverage:".bold());
    for (locale, is_primary, key_count, missing) in coverage {
        if is_primary {
            println!("  {}: {} keys (primary)", locale, key_count);
        } else {
            let percent = coverage_percent(primary_count, missing);
            let line = format!("{:.1}%", percent);
            let line = if missing == 0 { line.green() } else { line.yellow() };
            println!("  {}: {} keys ({})", locale, key_count, line);
        }
    }

    if issue_count == 0 {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "No issues found in {} locale file(s) ({} keys in {}).",
                locales.len(),
                primary.document.leaf_count(),
                ctx.primary_locale
            )
            .green()
        );
        Ok(ExitStatus::Success)
    } else {
        println!(
            "{} {} issue(s) found.",
            report::FAILURE_MARK.red(),
            issue_count
        );
        Ok(ExitStatus::Failure)
    }
}

fn print_locale_check(doc: &LocaleDocument, result: &LocaleCheck, primary_locale: &str) {
    report::print_locale_header(&doc.locale, &doc.path);
    let missing_note = format!("missing (present in {})", primary_locale);
    let extra_note = format!("not in {}", primary_locale);
    report::print_key_list("Missing keys", &result.missing, Some(&missing_note));
    report::print_key_list("Extra keys", &result.extra, Some(&extra_note));
    report::print_key_list("Empty values", &result.empty, None);
    println!();
}
