use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Events go to stderr so stdout only ever
/// carries command results. `RUST_LOG` overrides the default level.
pub fn init(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
