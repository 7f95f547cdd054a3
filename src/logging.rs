use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "courtside=debug,nba_api=debug,tower_http=info";

/// Installs the fmt subscriber. `log` records from both crates are forwarded
/// through the subscriber's log bridge. Safe to call more than once.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
