use std::process::ExitCode;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed, nothing left to do
/// - `Failure` (1): Command completed but found issues or pending changes
/// - `Error` (2): Command failed due to internal error (parse error, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed, nothing left to do.
    Success,
    /// Command completed but found issues, conflicts, or changes not yet applied.
    Failure,
    /// Command failed due to internal error (parse error, config error, etc.).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
