//! Tracing and logging configuration for the relay
//!
//! Development gets human readable output, production emits JSON lines for
//! log aggregation.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Initialize tracing/logging based on the environment
///
/// # Development Mode
/// - Pretty-printed, human-readable logs
/// - Default level: DEBUG
/// - Shows file locations and line numbers
///
/// # Production Mode
/// - JSON-formatted structured logs, flattened, with the current span
///   (request id, method, path)
/// - Default level: INFO
///
/// # Environment Variables
/// - `RUST_LOG`: Override default log level (e.g., `RUST_LOG=debug,tower_http=trace`)
pub fn init_tracing(env: &Environment) {
    if env.is_development() {
        init_development_tracing();
    } else {
        init_production_tracing();
    }
}

fn init_development_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug,tower_http=debug,hyper_util=info,reqwest=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in development mode");
}

fn init_production_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,hyper_util=warn,reqwest=warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in production mode");
}
