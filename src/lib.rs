//! locmerge - maintain nested JSON translation files
//!
//! locmerge is a CLI tool and library for editing per-language JSON message
//! files: inserting missing keys without touching existing translations,
//! deep-merging whole sections, filling gaps with placeholders and reporting
//! keys that drift between locales.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Document model, insert and merge operations, locale sets
//! - `logging`: Diagnostic logging setup
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod mcp;
