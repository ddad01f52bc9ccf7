use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a compact console subscriber.
///
/// Used when observability is compiled out or disabled at runtime, and by the
/// CLI. The level comes from `LOG_LEVEL` (default `info`) unless `RUST_LOG`
/// is set. Calling it when a subscriber already exists is harmless.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pickup={log_level},pickup_dismissal={log_level},tower_http=warn,hyper=warn,tonic=warn,h2=warn"
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        eprintln!("ℹ️  Observability disabled - console logging only");
    }
}
