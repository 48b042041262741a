use std::process::ExitCode;

use clap::Parser;
use locmerge::cli::{Arguments, Command, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    locmerge::logging::init(args.verbose());

    if matches!(args.command, Some(Command::Serve)) {
        if let Err(err) = locmerge::mcp::run_server() {
            eprintln!("Error: {}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match locmerge::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
