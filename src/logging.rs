use tracing_subscriber::EnvFilter;

/// Log to stderr. `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "users=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}
