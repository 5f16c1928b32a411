//! Logging setup.

use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVES: &str = "info";

/// Install a `fmt` subscriber. `RUST_LOG` wins over `default_level` when set.
/// Calling this again after a subscriber is installed does nothing.
pub fn init_logging(default_level: &str) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = select_directives(env_directives.as_deref(), default_level);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(false)
        .try_init();
}

/// Pick the first usable filter: the environment's, then `default_level`,
/// then `info`. Blank or unparsable candidates are skipped.
pub fn select_directives(env_directives: Option<&str>, default_level: &str) -> String {
    [env_directives, Some(default_level)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty() && EnvFilter::try_new(candidate).is_ok())
        .unwrap_or(FALLBACK_DIRECTIVES)
        .to_string()
}
