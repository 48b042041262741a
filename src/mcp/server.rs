use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    config::load_config,
    core::{KeyPath, LocaleDocument},
};

use super::helpers::{SubtreeMode, process_locale_insert, process_locale_merge};
use super::types::{
    ConfigDto, ConfigValues, GetConfigParams, GetLocalesParams, InsertKeysResult,
    InsertKeysSummary, InsertMissingKeysParams, LocaleInfo, LocalesResult, MergeResult,
    MergeSummaryDto, MergeTranslationsParams,
};

#[derive(Clone)]
pub struct LocmergeMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for LocmergeMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl LocmergeMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current locmerge configuration
    #[tool(description = "Get the current locmerge configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        };

        to_tool_result(&config_dto)
    }

    /// Get available locales and their file paths
    #[tool(description = "Get available locale files, their paths and leaf key counts.")]
    pub async fn get_locales(
        &self,
        params: Parameters<GetLocalesParams>,
    ) -> Result<CallToolResult, McpError> {
        let root = Path::new(&params.0.project_root_path);

        let config = load_config(root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?
            .config;

        let messages_dir = config.messages_dir(root);
        let locale_names = config.resolve_locales(&messages_dir).map_err(|e| {
            McpError::internal_error(format!("Failed to list locales: {:#}", e), None)
        })?;

        let mut locales = Vec::with_capacity(locale_names.len());
        for locale in &locale_names {
            let doc = LocaleDocument::open(&messages_dir, locale).map_err(|e| {
                McpError::internal_error(format!("Failed to load locale '{}': {:#}", locale, e), None)
            })?;
            locales.push(LocaleInfo {
                locale: doc.locale,
                file_path: doc.path.to_string_lossy().to_string(),
                key_count: doc.document.leaf_count(),
            });
        }

        let result = LocalesResult {
            messages_root: messages_dir.to_string_lossy().to_string(),
            primary_locale: config.primary_locale,
            locales,
        };

        to_tool_result(&result)
    }

    /// Insert keys that are missing from locale files
    #[tool(
        description = "Insert translation keys into locale files without overwriting existing values. \
                       Keys use dot notation (e.g. 'common.submit'); values must be strings or string arrays. \
                       Missing locale files are created. Keys whose parent already holds a value are reported as conflicts."
    )]
    pub async fn insert_missing_keys(
        &self,
        params: Parameters<InsertMissingKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let root = Path::new(&params.0.project_root_path);
        let translations = &params.0.translations;

        if translations.is_empty() {
            return Err(McpError::invalid_params(
                "translations cannot be empty".to_string(),
                None,
            ));
        }

        let config = load_config(root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?
            .config;
        let messages_dir = config.messages_dir(root);

        let mut results = Vec::with_capacity(translations.len());
        let mut successful_locales = 0;
        let mut failed_locales = 0;
        let mut total_keys_added = 0;
        let mut total_keys_kept = 0;
        let mut total_conflicts = 0;

        for entry in translations {
            match process_locale_insert(entry, &messages_dir) {
                Ok(result) => {
                    successful_locales += 1;
                    total_keys_added += result.added_count.unwrap_or(0);
                    total_keys_kept += result.kept_count.unwrap_or(0);
                    total_conflicts += result.conflict_count.unwrap_or(0);
                    results.push(result);
                }
                Err(e) => {
                    failed_locales += 1;
                    tracing::warn!(locale = %e.locale, "{}", e.message);
                    results.push(e.into_result());
                }
            }
        }

        let result = InsertKeysResult {
            success: failed_locales == 0,
            results,
            summary: InsertKeysSummary {
                total_locales: translations.len(),
                successful_locales,
                failed_locales,
                total_keys_added,
                total_keys_kept,
                total_conflicts,
            },
        };

        to_tool_result(&result)
    }

    /// Deep-merge translation subtrees into locale files
    #[tool(
        description = "Deep-merge nested translation subtrees into locale files. Incoming values replace existing ones \
                       at the same key; all other existing keys are kept. Use 'at' (dot notation) to merge every subtree \
                       under a section; add 'replace: true' to swap that section wholesale and drop keys the subtree lacks. \
                       Missing locale files are created."
    )]
    pub async fn merge_translations(
        &self,
        params: Parameters<MergeTranslationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let root = Path::new(&params.0.project_root_path);
        let subtrees = &params.0.subtrees;

        if subtrees.is_empty() {
            return Err(McpError::invalid_params(
                "subtrees cannot be empty".to_string(),
                None,
            ));
        }

        let at = params
            .0
            .at
            .as_deref()
            .map(KeyPath::parse)
            .transpose()
            .map_err(|e| McpError::invalid_params(format!("Invalid 'at': {}", e), None))?;

        let mode = match (&at, params.0.replace) {
            (Some(path), true) => SubtreeMode::Replace(path),
            (None, true) => {
                return Err(McpError::invalid_params(
                    "'replace' requires 'at'".to_string(),
                    None,
                ));
            }
            (_, false) => SubtreeMode::Merge(at.as_ref()),
        };

        let config = load_config(root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?
            .config;
        let messages_dir = config.messages_dir(root);

        let mut results = Vec::with_capacity(subtrees.len());
        let mut successful_locales = 0;
        let mut failed_locales = 0;
        let mut total_keys_added = 0;
        let mut total_keys_changed = 0;
        let mut total_keys_removed = 0;

        for entry in subtrees {
            match process_locale_merge(entry, mode, &messages_dir) {
                Ok(result) => {
                    successful_locales += 1;
                    total_keys_added += result.added.as_ref().map_or(0, Vec::len);
                    total_keys_changed += result.changed.as_ref().map_or(0, Vec::len);
                    total_keys_removed += result.removed.as_ref().map_or(0, Vec::len);
                    results.push(result);
                }
                Err(e) => {
                    failed_locales += 1;
                    tracing::warn!(locale = %e.locale, "{}", e.message);
                    results.push(e.into_merge_result());
                }
            }
        }

        let result = MergeResult {
            success: failed_locales == 0,
            results,
            summary: MergeSummaryDto {
                total_locales: subtrees.len(),
                successful_locales,
                failed_locales,
                total_keys_added,
                total_keys_changed,
                total_keys_removed,
            },
        };

        to_tool_result(&result)
    }
}

fn to_tool_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for LocmergeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Locmerge MCP edits nested JSON translation files (one file per locale) without losing existing work.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. get_locales - Get locale files and their key counts\n\
                 3. insert_missing_keys - Add dotted keys that are not present yet; existing values are never overwritten\n\
                 4. merge_translations - Deep-merge nested subtrees (incoming values win), or replace a section with 'replace'\n\n\
                 Use insert_missing_keys to fill gaps and merge_translations to replace a section with fresh translations."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = LocmergeMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
