use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::RunMode;

/// `RUST_LOG` when set, otherwise the mode's default level
pub fn env_filter(mode: RunMode) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(mode.default_log_level()))
}

/// Initialize tracing to stderr. DEV shows info and above, PROD errors only.
pub fn init_tracing(mode: RunMode) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(mode))
        .with(fmt_layer)
        .init();

    tracing::debug!(target: "news_export", "Logging initialized in {} mode", mode);
}

