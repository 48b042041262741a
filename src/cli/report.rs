//! Report formatting and printing utilities.
//!
//! Separate from the core so locmerge can be used as a library.

use colored::Colorize;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::core::DocumentError;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of keys listed per section before eliding the rest.
const MAX_KEYS_DISPLAY: usize = 20;

/// Render a leaf value the way it appears in the JSON file.
pub fn format_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

pub fn print_locale_header(locale: &str, path: &std::path::Path) {
    println!("{} {}", locale.bold(), format!("({})", path.display()).dimmed());
}

pub fn print_added(key: &str, value: &Value) {
    println!("  {} {} = {}", "+".green(), key, format_value(value));
}

pub fn print_added_key(key: &str) {
    println!("  {} {}", "+".green(), key);
}

pub fn print_changed(key: &str) {
    println!("  {} {}", "~".yellow(), key);
}

pub fn print_removed(key: &str) {
    println!("  {} {}", "-".red(), key);
}

pub fn print_conflict(err: &DocumentError) {
    println!("  {} {}", FAILURE_MARK.red(), err);
}

/// Print a titled list of keys, padded so trailing notes line up.
pub fn print_key_list(title: &str, keys: &[String], note: Option<&str>) {
    if keys.is_empty() {
        return;
    }
    println!("  {} ({}):", title, keys.len());

    let shown = &keys[..keys.len().min(MAX_KEYS_DISPLAY)];
    let width = shown
        .iter()
        .map(|k| UnicodeWidthStr::width(k.as_str()))
        .max()
        .unwrap_or(0);

    for key in shown {
        match note {
            Some(note) => {
                let padding = width - UnicodeWidthStr::width(key.as_str());
                println!("    - {}{:padding$}  {}", key, "", note.dimmed(), padding = padding);
            }
            None => println!("    - {}", key),
        }
    }
    if keys.len() > MAX_KEYS_DISPLAY {
        println!("    ... and {} more", keys.len() - MAX_KEYS_DISPLAY);
    }
}

/// Closing line for a mutating command.
pub fn print_outcome(verb_done: &str, verb_pending: &str, changes: usize, files: usize, apply: bool) {
    if changes == 0 {
        println!("{} {}", SUCCESS_MARK.green(), "Nothing to change.".green());
    } else if apply {
        println!(
            "{} {} change(s) in {} file(s).",
            verb_done.green().bold(),
            changes,
            files
        );
    } else {
        println!(
            "{} {} change(s) in {} file(s).",
            verb_pending.yellow().bold(),
            changes,
            files
        );
        println!("Run with {} to write these changes.", "--apply".cyan());
    }
}
