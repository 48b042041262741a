//! Batches of translation changes read from JSON input files.
//!
//! Two shapes are supported:
//!
//! - key entries, one dotted key mapped to a value per locale:
//!   `{"common.editTitle": {"fr": "Modifier", "en": "Edit", "he": "ערוך"}}`
//! - subtrees, one locale mapped to a tree to deep-merge:
//!   `{"en": {"users": {"title": "Users"}}, "fr": {"users": {"title": "Utilisateurs"}}}`

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::document::TranslationDocument;
use super::error::DocumentError;
use super::key_path::KeyPath;

/// One key with its value in each locale that provides one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub key: KeyPath,
    pub values: Map<String, Value>,
}

/// Key entries to insert into locale documents without overwriting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntrySet {
    entries: Vec<NewEntry>,
}

impl NewEntrySet {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read entries file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid entries file: {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Failed to parse JSON")?;
        let Value::Object(map) = value else {
            bail!("Entries must be an object of key -> {{locale: value}}");
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, values) in map {
            let key_path = KeyPath::parse(&key)?;
            let Value::Object(values) = values else {
                bail!("Entry '{}' must map locale codes to values", key);
            };
            for (locale, value) in &values {
                if value.is_object() {
                    bail!(
                        "Entry '{}' for locale '{}' must be a leaf value, not an object",
                        key,
                        locale
                    );
                }
            }
            entries.push(NewEntry {
                key: key_path,
                values,
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[NewEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `(key, value)` pairs this set provides for `locale`.
    pub fn values_for<'a>(&'a self, locale: &'a str) -> impl Iterator<Item = (&'a KeyPath, &'a Value)> {
        self.entries
            .iter()
            .filter_map(move |entry| entry.values.get(locale).map(|value| (&entry.key, value)))
    }
}

/// Per-locale subtrees to deep-merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtreeSet {
    subtrees: Map<String, Value>,
}

impl SubtreeSet {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtrees file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid subtrees file: {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Failed to parse JSON")?;
        let Value::Object(subtrees) = value else {
            bail!("Subtrees must be an object of locale -> tree");
        };
        Ok(Self { subtrees })
    }

    /// Ensure each subtree can be placed: without a target path it must be an object.
    pub fn validate(&self, at: Option<&KeyPath>) -> Result<()> {
        if at.is_some() {
            return Ok(());
        }
        for (locale, tree) in &self.subtrees {
            if !tree.is_object() {
                bail!(
                    "Subtree for locale '{}' must be an object when merged at the document root",
                    locale
                );
            }
        }
        Ok(())
    }

    pub fn get(&self, locale: &str) -> Option<&Value> {
        self.subtrees.get(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.subtrees.keys().map(String::as_str)
    }
}

/// Outcome of inserting a batch of keys into one document.
#[derive(Debug, Default)]
pub struct InsertReport {
    /// Keys that were inserted, with their new value.
    pub added: Vec<(String, Value)>,
    /// Keys that already existed and were left as they were.
    pub kept: Vec<String>,
    /// Keys that could not be inserted because a section on their path is a leaf.
    pub conflicts: Vec<DocumentError>,
}

impl InsertReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Insert every pair that is absent from `doc`.
///
/// Existing keys are kept. Conflicting keys are recorded and skipped so the
/// caller can decide whether to keep or drop the rest of the batch.
pub fn insert_missing<'a, I>(doc: &mut TranslationDocument, pairs: I) -> Result<InsertReport, DocumentError>
where
    I: IntoIterator<Item = (&'a KeyPath, &'a Value)>,
{
    let mut report = InsertReport::default();
    for (key, value) in pairs {
        match doc.insert_if_absent(key, value.clone()) {
            Ok(true) => report.added.push((key.to_string(), value.clone())),
            Ok(false) => report.kept.push(key.to_string()),
            Err(err) if err.is_conflict() => {
                warn!(key = %key, "{}", err);
                report.conflicts.push(err);
            }
            Err(err) => return Err(err),
        }
    }
    debug!(
        added = report.added.len(),
        kept = report.kept.len(),
        conflicts = report.conflicts.len(),
        "inserted batch"
    );
    Ok(report)
}
