//! Log filter selection.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Builds the subscriber filter from a raw `RUST_LOG` value.
///
/// A set and valid value is used as-is, so `RUST_LOG=debug` shows the
/// verifier's recompute lines. Anything else falls back to `info`.
#[must_use]
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}
