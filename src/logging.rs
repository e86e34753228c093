//! Subscriber setup shared by the binaries.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or holds no usable directive.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Builds a filter from `directives` (the `RUST_LOG` syntax). Invalid
/// directives are dropped; an empty result falls back to [`DEFAULT_LEVEL`].
pub fn filter_from(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(DEFAULT_LEVEL.into())
        .parse_lossy(directives)
}

/// Reads `RUST_LOG`, defaulting to [`DEFAULT_LEVEL`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(DEFAULT_LEVEL.into())
        .from_env_lossy()
}

/// Installs the global subscriber. Logs go to stderr; stdout belongs to the
/// game output or the MCP transport.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}
