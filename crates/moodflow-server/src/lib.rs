//! HTTP API for moodflow accounts and mood entries.
//!
//! `app` builds the router over a shared [`AppState`]; `main` only wires
//! configuration, tracing and the listener around it.

pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;

use axum::Router;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

/// Install the global subscriber. `RUST_LOG` wins over the built-in default
/// and `LOG_JSON` switches to one JSON object per event.
pub fn init_tracing(config: &Config) {
    let filter = config
        .rust_log
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info,tower_http=debug"));

    let layer = if config.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_span_list(false)
            .with_filter(filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_filter(filter).boxed()
    };

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
