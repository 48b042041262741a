//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `add`: Insert missing keys from an entries file into every locale
//! - `merge`: Deep-merge per-locale subtrees into the locale files
//! - `sync`: Fill keys missing from non-primary locales with placeholders
//! - `check`: Report missing, extra and empty keys across locales
//! - `init`: Initialize locmerge configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Add(args)) => args.common.verbose,
            Some(Command::Merge(args)) => args.common.verbose,
            Some(Command::Sync(args)) => args.common.verbose,
            Some(Command::Check(args)) => args.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Only touch these locales (default: all configured or discovered)
    /// Can be specified multiple times: --locale en --locale fr
    #[arg(long = "locale")]
    pub locales: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// JSON file mapping dotted keys to per-locale values
    pub entries: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write the files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Abort the whole batch if any key conflicts with an existing value
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// JSON file mapping locale codes to the subtree to merge
    pub subtrees: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Dotted key path to merge each subtree under (default: document root)
    #[arg(long)]
    pub at: Option<String>,

    /// Replace the section at `--at` instead of merging into it (drops keys the subtree lacks)
    #[arg(long, requires = "at")]
    pub replace: bool,

    /// Actually write the files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Copy the primary locale's value instead of writing a placeholder
    #[arg(long)]
    pub copy_primary: bool,

    /// Actually write the files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Insert missing translation keys without overwriting existing values
    Add(AddArgs),
    /// Deep-merge translation subtrees into locale files (incoming values win)
    Merge(MergeArgs),
    /// Add keys missing from non-primary locales using placeholder values
    Sync(SyncArgs),
    /// Check locale files for missing, extra and empty keys
    Check(CheckArgs),
    /// Initialize a new .locmergerc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
