use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{add::add, check::check, init::init, merge::merge, sync::sync},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// # Returns
/// - `Ok(ExitStatus)` describing whether work remains
/// - `Err` if the command fails (e.g., unreadable config, invalid JSON)
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Add(args)) => add(&args),
        Some(Command::Merge(args)) => merge(&args),
        Some(Command::Sync(args)) => sync(&args),
        Some(Command::Check(args)) => check(&args),
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            // Serve command is handled in main.rs before calling run()
            anyhow::bail!("Serve command should be handled before run()")
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
