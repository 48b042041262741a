//! Command-line interface layer.
//!
//! - `args`: clap argument definitions
//! - `commands`: one module per subcommand
//! - `context`: config file merged with CLI overrides
//! - `report`: terminal output helpers

pub mod args;
mod commands;
mod context;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use anyhow::Result;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
