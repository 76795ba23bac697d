//! Tracing subscriber setup.

use crate::config::{Environment, LogFormat, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset.
pub fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "kondate_server=debug,tower_http=debug,info",
        Environment::Staging => "kondate_server=debug,tower_http=info,info",
        // Provider call spans are debug-level; keep prod to request summaries and failures
        Environment::Prod => "kondate_server=info,tower_http=info,warn",
    }
}

pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&settings.env)));

    let verbose = settings.env.is_dev();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(verbose)
        .with_line_number(verbose);

    let registry = tracing_subscriber::registry().with(filter);
    match settings.log_format {
        LogFormat::Json => registry.with(fmt_layer.json()).init(),
        LogFormat::Pretty => registry.with(fmt_layer.pretty()).init(),
    }

    tracing::info!(
        env = ?settings.env,
        format = ?settings.log_format,
        "Logging initialized"
    );
}
