//! Logging init for the CLI: structured events to stderr.
//!
//! Stdout carries command output (text or JSON), so logs never go there.
//! Filtering follows `RUST_LOG`; without it, only warnings plus this crate's
//! info events are shown. `--verbose` raises this crate to debug.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,picture_sources=info";
const VERBOSE_FILTER: &str = "warn,picture_sources=debug";

/// Pick the filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

/// Initialize logging to stderr.
///
/// Safe to call once per process; a second call is ignored.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_by_verbosity() {
        assert_eq!(default_directive(false), "warn,picture_sources=info");
        assert_eq!(default_directive(true), "warn,picture_sources=debug");
    }

    #[test]
    fn directives_parse() {
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
