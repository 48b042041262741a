//! Diagnostic logging setup.
//!
//! Events go to stderr so stdout stays free for command output and the MCP
//! stdio transport. `RUST_LOG` takes precedence over the verbosity flag.

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
