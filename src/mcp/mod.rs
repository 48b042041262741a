//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the translation document operations to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `helpers`: Per-locale insert and merge processing
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{LocmergeMcpServer, run_server};
