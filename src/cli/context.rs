use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::args::CommonArgs;
use crate::{
    config::{Config, load_config},
    core::{LocaleSet, validate_locale_name},
};

/// Effective settings for one command run: config file merged with CLI overrides.
pub struct CommandContext {
    pub config: Config,
    pub messages_dir: PathBuf,
    pub primary_locale: String,
    /// Locales selected with `--locale`, empty when none were given.
    pub selected_locales: Vec<String>,
}

impl CommandContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::from_root(&cwd, args)
    }

    pub fn from_root(project_root: &Path, args: &CommonArgs) -> Result<Self> {
        let config = load_config(project_root)?.config;

        let messages_dir = match &args.messages_root {
            Some(dir) => dir.clone(),
            None => config.messages_dir(project_root),
        };

        let primary_locale = args
            .primary_locale
            .clone()
            .unwrap_or_else(|| config.primary_locale.clone());
        if let Err(msg) = validate_locale_name(&primary_locale) {
            bail!("Invalid --primary-locale: {}", msg);
        }

        for locale in &args.locales {
            if let Err(msg) = validate_locale_name(locale) {
                bail!("Invalid --locale: {}", msg);
            }
        }

        Ok(Self {
            config,
            messages_dir,
            primary_locale,
            selected_locales: args.locales.clone(),
        })
    }

    /// Locales a command should touch: `--locale` if given, else config/discovery.
    pub fn locales(&self) -> Result<Vec<String>> {
        if self.selected_locales.is_empty() {
            self.config.resolve_locales(&self.messages_dir)
        } else {
            let mut locales = self.selected_locales.clone();
            locales.sort();
            locales.dedup();
            Ok(locales)
        }
    }

    /// Keep only the candidates allowed by `--locale`.
    pub fn filter_locales<'a, I>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .filter(|l| self.selected_locales.is_empty() || self.selected_locales.iter().any(|s| s == l))
            .map(String::from)
            .collect()
    }

    /// Open every locale this run operates on.
    pub fn open_locales(&self) -> Result<LocaleSet> {
        let locales = self.locales()?;
        if locales.is_empty() {
            bail!(
                "No locale files found in {} (create one or pass --locale)",
                self.messages_dir.display()
            );
        }
        LocaleSet::open(&self.messages_dir, &locales)
    }

    /// Open the set and make sure the primary locale is part of it.
    pub fn open_with_primary(&self) -> Result<LocaleSet> {
        let mut locales = self.locales()?;
        if !locales.contains(&self.primary_locale) {
            locales.push(self.primary_locale.clone());
        }
        let set = LocaleSet::open(&self.messages_dir, &locales)?;
        match set.get(&self.primary_locale) {
            Some(primary) if primary.path.exists() => Ok(set),
            _ => bail!(
                "Primary locale file not found: {}",
                crate::core::locale_file_path(&self.messages_dir, &self.primary_locale).display()
            ),
        }
    }
}
