//! Helper functions for MCP server operations.

use std::path::Path;

use serde_json::Value;

use crate::core::{KeyPath, LocaleDocument, insert_missing, validate_locale_name};

use super::types::{
    KeyAction, KeyActionDetail, LocaleError, LocaleResult, MergeLocaleResult, SubtreeEntry,
    TranslationEntry,
};

/// Insert the keys of one locale entry that the locale file does not have yet.
///
/// Returns `Ok(LocaleResult)` on success, `Err(LocaleError)` on failure.
/// Keys blocked by a parent holding a value are reported as conflicts; the rest are still saved.
pub fn process_locale_insert(
    entry: &TranslationEntry,
    messages_dir: &Path,
) -> Result<LocaleResult, LocaleError> {
    let locale = entry.locale.as_str();
    validate_locale_name(locale).map_err(|msg| LocaleError::new(locale, msg))?;

    if entry.keys.is_empty() {
        return Err(LocaleError::new(locale, "Keys cannot be empty"));
    }

    // Validate the whole batch before touching the file
    let mut pairs = Vec::with_capacity(entry.keys.len());
    for (key, value) in &entry.keys {
        let path = KeyPath::parse(key)
            .map_err(|e| LocaleError::new(locale, format!("Invalid key '{}': {}", key, e)))?;
        validate_value(value).map_err(|msg| {
            LocaleError::new(locale, format!("Invalid value for key '{}': {}", key, msg))
        })?;
        pairs.push((path, value.clone()));
    }

    let mut doc = LocaleDocument::open(messages_dir, locale)
        .map_err(|e| LocaleError::new(locale, format!("Failed to open locale file: {:#}", e)))?;

    let report = insert_missing(&mut doc.document, pairs.iter().map(|(k, v)| (k, v)))
        .map_err(|e| LocaleError::new(locale, e.to_string()))?;

    doc.save_if_changed()
        .map_err(|e| LocaleError::new(locale, format!("Failed to save locale file: {:#}", e)))?;

    let mut details = Vec::new();
    for (key, _) in &report.added {
        details.push(detail(key, KeyAction::Added, None));
    }
    for key in &report.kept {
        details.push(detail(key, KeyAction::Kept, None));
    }
    for err in &report.conflicts {
        let key = match err {
            crate::core::DocumentError::StructuralConflict { path, .. } => path.clone(),
            other => other.to_string(),
        };
        details.push(detail(&key, KeyAction::Conflict, Some(err.to_string())));
    }

    Ok(LocaleResult {
        locale: locale.to_string(),
        success: true,
        file_path: Some(doc.path.to_string_lossy().to_string()),
        added_count: Some(report.added.len()),
        kept_count: Some(report.kept.len()),
        conflict_count: Some(report.conflicts.len()),
        details: Some(details),
        error: None,
    })
}

/// How a subtree is applied to a locale file.
#[derive(Debug, Clone, Copy)]
pub enum SubtreeMode<'a> {
    /// Deep-merge at the root or under a path.
    Merge(Option<&'a KeyPath>),
    /// Swap the section at the path for the subtree.
    Replace(&'a KeyPath),
}

/// Apply one locale subtree to its locale file, creating the file if needed.
pub fn process_locale_merge(
    entry: &SubtreeEntry,
    mode: SubtreeMode<'_>,
    messages_dir: &Path,
) -> Result<MergeLocaleResult, LocaleError> {
    let locale = entry.locale.as_str();
    validate_locale_name(locale).map_err(|msg| LocaleError::new(locale, msg))?;

    if matches!(mode, SubtreeMode::Merge(None)) && !entry.tree.is_object() {
        return Err(LocaleError::new(
            locale,
            "Tree must be an object when merged at the document root",
        ));
    }

    let mut doc = LocaleDocument::open(messages_dir, locale)
        .map_err(|e| LocaleError::new(locale, format!("Failed to open locale file: {:#}", e)))?;

    let summary = match mode {
        SubtreeMode::Merge(at) => doc.document.merge_at(at, entry.tree.clone()),
        SubtreeMode::Replace(at) => doc.document.replace_at(at, entry.tree.clone()),
    };

    doc.save_if_changed()
        .map_err(|e| LocaleError::new(locale, format!("Failed to save locale file: {:#}", e)))?;

    Ok(MergeLocaleResult {
        locale: locale.to_string(),
        success: true,
        file_path: Some(doc.path.to_string_lossy().to_string()),
        added: Some(summary.added),
        changed: Some(summary.changed),
        removed: Some(summary.removed),
        error: None,
    })
}

/// Values inserted through MCP must be a string or an array of strings.
pub fn validate_value(value: &Value) -> Result<(), String> {
    match value {
        Value::String(_) => Ok(()),
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                if !item.is_string() {
                    return Err(format!("Array element at index {} is not a string", i));
                }
            }
            Ok(())
        }
        _ => Err("Value must be a string or an array of strings".to_string()),
    }
}

fn detail(key: &str, action: KeyAction, message: Option<String>) -> KeyActionDetail {
    KeyActionDetail {
        key: key.to_string(),
        action: action.as_str().to_string(),
        message,
    }
}
