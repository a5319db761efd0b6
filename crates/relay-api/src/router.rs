use axum::{
    Json, Router, http::StatusCode, middleware as axum_middleware, response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{metrics, middleware, oauth, state::ApiState};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(oauth::routes())
        .fallback(handler_404)
}

/// Full application as served: routes, `/metrics` and the middleware stack
pub fn app(state: ApiState, metrics_handle: PrometheusHandle) -> Router {
    let environment = state.environment.clone();

    // Headers and query stay out of the span, the callback URL carries the
    // authorization code
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = router()
        .merge(metrics_app)
        .with_state(state)
        .layer(trace_layer)
        .layer(axum_middleware::from_fn(metrics::track_metrics))
        .layer(axum_middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ));

    middleware::security_headers::apply_security_headers(app, environment)
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
