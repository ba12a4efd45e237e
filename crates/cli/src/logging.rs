//! Log output setup
//!
//! Logs go to stderr so they never mix into the classification lines and
//! command output on stdout. `RUST_LOG` overrides the level.

use tracing_subscriber::EnvFilter;

const QUIET: &str = "warn";
const VERBOSE: &str = "warn,ontouch=debug,ontouch_core=debug,ontouch_watcher=debug";

pub fn init(verbose: bool) {
    let default = if verbose { VERBOSE } else { QUIET };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
