use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use super::document::TranslationDocument;

/// A translation document together with where it lives and which language it holds.
#[derive(Debug, Clone)]
pub struct LocaleDocument {
    pub locale: String,
    pub path: PathBuf,
    pub document: TranslationDocument,
    loaded: TranslationDocument,
}

impl LocaleDocument {
    /// Open `<messages_root>/<locale>.json`, starting empty if the file is missing.
    pub fn open(messages_root: &Path, locale: &str) -> Result<Self> {
        validate_locale_name(locale).map_err(anyhow::Error::msg)?;
        let path = locale_file_path(messages_root, locale);
        let document = TranslationDocument::load_or_empty(&path)?;
        Ok(Self {
            locale: locale.to_string(),
            path,
            loaded: document.clone(),
            document,
        })
    }

    /// Whether the document differs from what was loaded.
    pub fn is_changed(&self) -> bool {
        self.document != self.loaded
    }

    /// Save if changed. Returns true when the file was written.
    pub fn save_if_changed(&mut self) -> Result<bool> {
        if !self.is_changed() {
            return Ok(false);
        }
        self.document.save(&self.path)?;
        self.loaded = self.document.clone();
        Ok(true)
    }
}

/// Every locale document of a messages directory, sorted by locale code.
#[derive(Debug, Clone, Default)]
pub struct LocaleSet {
    documents: Vec<LocaleDocument>,
}

impl LocaleSet {
    /// Load the given locales from `messages_root` in parallel.
    pub fn open(messages_root: &Path, locales: &[String]) -> Result<Self> {
        let mut documents = locales
            .par_iter()
            .map(|locale| LocaleDocument::open(messages_root, locale))
            .collect::<Result<Vec<_>>>()?;
        documents.sort_by(|a, b| a.locale.cmp(&b.locale));
        documents.dedup_by(|a, b| a.locale == b.locale);
        debug!(count = documents.len(), root = %messages_root.display(), "opened locale set");
        Ok(Self { documents })
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleDocument> {
        self.documents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut LocaleDocument> {
        self.documents.iter_mut()
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleDocument> {
        self.documents.iter().find(|d| d.locale == locale)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn changed_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_changed()).count()
    }

    /// Save every changed document. Returns the number of files written.
    pub fn save_changed(&mut self) -> Result<usize> {
        let mut saved = 0;
        for doc in &mut self.documents {
            if doc.save_if_changed()? {
                saved += 1;
            }
        }
        Ok(saved)
    }
}

pub fn locale_file_path(messages_root: &Path, locale: &str) -> PathBuf {
    messages_root.join(format!("{}.json", locale))
}

/// Locale codes of all `*.json` files directly inside `messages_root`, sorted.
///
/// A missing directory yields no locales.
pub fn discover_locales(messages_root: &Path) -> Result<Vec<String>> {
    if !messages_root.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(messages_root).with_context(|| {
        format!(
            "Failed to read messages directory: {}",
            messages_root.display()
        )
    })?;

    let mut locales = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = path.file_stem().and_then(|s| s.to_str())
            && validate_locale_name(locale).is_ok()
        {
            locales.push(locale.to_string());
        }
    }
    locales.sort();
    Ok(locales)
}

/// Validate locale name for security and correctness.
///
/// Only allows alphanumeric characters, hyphens, and underscores.
/// This prevents path traversal attacks and ensures safe file creation.
pub fn validate_locale_name(locale: &str) -> Result<(), String> {
    if locale.is_empty() {
        return Err("Locale name cannot be empty".to_string());
    }
    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!(
            "Invalid locale '{}': only letters, numbers, hyphens, and underscores are allowed",
            locale
        ));
    }
    Ok(())
}
