//! Tracing subscriber installation.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a formatted tracing subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`, falling back to `default_filter`.
/// Stdout is left untouched because it carries the tool transport.
/// Returns `false` when a global subscriber was already installed.
#[must_use]
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILTER, init_tracing};
    use rstest::rstest;

    #[rstest]
    fn only_the_first_installation_succeeds() {
        let _first = init_tracing(DEFAULT_FILTER);
        assert!(!init_tracing("debug"));
    }
}
