use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_PLACEHOLDER_PREFIX, discover_locales, validate_locale_name};

pub const CONFIG_FILE_NAME: &str = ".locmergerc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_messages_root", alias = "messagesDir")]
    pub messages_root: String,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    /// Locales to operate on. Empty means every `*.json` file in `messages_root`.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_placeholder_prefix")]
    pub placeholder_prefix: String,
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_placeholder_prefix() -> String {
    DEFAULT_PLACEHOLDER_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_root: default_messages_root(),
            primary_locale: default_primary_locale(),
            locales: Vec::new(),
            placeholder_prefix: default_placeholder_prefix(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `primaryLocale` or any entry of `locales` is not a safe locale code.
    pub fn validate(&self) -> Result<()> {
        validate_locale_name(&self.primary_locale)
            .map_err(anyhow::Error::msg)
            .context("Invalid 'primaryLocale'")?;

        for locale in &self.locales {
            validate_locale_name(locale)
                .map_err(anyhow::Error::msg)
                .context("Invalid entry in 'locales'")?;
        }

        Ok(())
    }

    /// Messages directory resolved against the project root.
    pub fn messages_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.messages_root)
    }

    /// Locales to operate on: the configured list, or the files found on disk.
    pub fn resolve_locales(&self, messages_dir: &Path) -> Result<Vec<String>> {
        if self.locales.is_empty() {
            discover_locales(messages_dir)
        } else {
            let mut locales = self.locales.clone();
            locales.sort();
            locales.dedup();
            Ok(locales)
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
