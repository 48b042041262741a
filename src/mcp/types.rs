use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root (where .locmergerc.json lives)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalesParams {
    /// Absolute path of the project root (where .locmergerc.json lives)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertMissingKeysParams {
    /// Absolute path of the project root (where .locmergerc.json lives)
    pub project_root_path: String,
    /// One entry per locale file to update
    pub translations: Vec<TranslationEntry>,
}

/// Keys to insert into one locale file
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    /// Locale code, e.g. "en" or "pt-BR"
    pub locale: String,
    /// Dotted key -> string (or string array) value
    pub keys: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeTranslationsParams {
    /// Absolute path of the project root (where .locmergerc.json lives)
    pub project_root_path: String,
    /// Optional dotted key path to merge every subtree under
    #[serde(default)]
    pub at: Option<String>,
    /// Replace the section at `at` instead of merging (requires `at`); keys missing from the subtree are removed
    #[serde(default)]
    pub replace: bool,
    /// One subtree per locale file to update
    pub subtrees: Vec<SubtreeEntry>,
}

/// Subtree to deep-merge into one locale file
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubtreeEntry {
    /// Locale code, e.g. "en" or "pt-BR"
    pub locale: String,
    /// Nested object of translations; incoming leaves replace existing ones
    pub tree: Value,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub messages_root: String,
    pub primary_locale: String,
    pub locales: Vec<String>,
    pub placeholder_prefix: String,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            messages_root: c.messages_root,
            primary_locale: c.primary_locale,
            locales: c.locales,
            placeholder_prefix: c.placeholder_prefix,
        }
    }
}

// ============================================================
// Locales Types (get_locales)
// ============================================================

/// Result of get_locales operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalesResult {
    pub messages_root: String,
    pub primary_locale: String,
    pub locales: Vec<LocaleInfo>,
}

/// Information about a single locale
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub locale: String,
    pub file_path: String,
    pub key_count: usize,
}

// ============================================================
// InsertMissingKeys Types (insert_missing_keys)
// ============================================================

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Kept,
    Conflict,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Kept => "kept",
            KeyAction::Conflict => "conflict",
        }
    }
}

/// Result of insert_missing_keys operation (batch)
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertKeysResult {
    /// True if all locales were processed successfully
    pub success: bool,
    /// Results for each locale
    pub results: Vec<LocaleResult>,
    /// Summary statistics
    pub summary: InsertKeysSummary,
}

/// Result for a single locale
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleResult {
    /// The locale code (e.g., "en", "zh-CN")
    pub locale: String,
    /// Whether this locale was processed successfully
    pub success: bool,
    /// Path to the locale file (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Number of keys added (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_count: Option<usize>,
    /// Number of keys that already existed and were kept (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kept_count: Option<usize>,
    /// Number of keys skipped because a parent key holds a value (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_count: Option<usize>,
    /// Details of each key action (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<KeyActionDetail>>,
    /// Error message (only on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary statistics for the batch operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertKeysSummary {
    /// Total number of locales in the request
    pub total_locales: usize,
    /// Number of locales processed successfully
    pub successful_locales: usize,
    /// Number of locales that failed
    pub failed_locales: usize,
    /// Total keys added across all locales
    pub total_keys_added: usize,
    /// Total keys kept across all locales
    pub total_keys_kept: usize,
    /// Total conflicting keys across all locales
    pub total_conflicts: usize,
}

/// Detail of each key action
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyActionDetail {
    pub key: String,
    pub action: String, // "added", "kept", "conflict"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================
// MergeTranslations Types (merge_translations)
// ============================================================

/// Result of merge_translations operation (batch)
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    pub success: bool,
    pub results: Vec<MergeLocaleResult>,
    pub summary: MergeSummaryDto,
}

/// Merge outcome for a single locale
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeLocaleResult {
    pub locale: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Keys that did not exist before (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<Vec<String>>,
    /// Keys whose value was replaced (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<Vec<String>>,
    /// Keys that were dropped (only on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummaryDto {
    pub total_locales: usize,
    pub successful_locales: usize,
    pub failed_locales: usize,
    pub total_keys_added: usize,
    pub total_keys_changed: usize,
    pub total_keys_removed: usize,
}

/// Error type for locale processing operations.
///
/// This separates the error case from the success case, making the control flow
/// clearer than using `Result<LocaleResult, LocaleResult>`.
#[derive(Debug)]
pub struct LocaleError {
    /// The locale code as given in the request
    pub locale: String,
    /// Error message describing what went wrong
    pub message: String,
}

impl LocaleError {
    pub fn new(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            message: message.into(),
        }
    }

    /// Convert this error into a LocaleResult for serialization
    pub fn into_result(self) -> LocaleResult {
        LocaleResult {
            locale: self.locale,
            success: false,
            file_path: None,
            added_count: None,
            kept_count: None,
            conflict_count: None,
            details: None,
            error: Some(self.message),
        }
    }

    /// Convert this error into a MergeLocaleResult for serialization
    pub fn into_merge_result(self) -> MergeLocaleResult {
        MergeLocaleResult {
            locale: self.locale,
            success: false,
            file_path: None,
            added: None,
            changed: None,
            removed: None,
            error: Some(self.message),
        }
    }
}
