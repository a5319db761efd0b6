use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use super::{
    models::{CallbackQuery, StartQuery},
    service,
};
use crate::{ApiState, error::ApiError, metrics, oauth::state as oauth_state};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/oauth/google/start", get(google_start))
        .route("/oauth/google/callback", get(google_callback))
}

/// `302 Found` to `location`
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// A query that does not deserialize (e.g. a repeated key) is answered with
/// the same JSON body as a missing parameter
fn query_or_missing<T>(
    query: Result<Query<T>, QueryRejection>,
    message: &str,
) -> Result<T, ApiError> {
    query.map(|Query(query)| query).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected query string");
        ApiError::MissingParameter(message.to_string())
    })
}

/// Empty query values count as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn google_start(
    State(state): State<ApiState>,
    query: Result<Query<StartQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = query_or_missing(query, "tenant_id requerido")?;
    let tenant_id = present(query.tenant_id)
        .ok_or_else(|| ApiError::MissingParameter("tenant_id requerido".to_string()))?;

    let signed_state =
        oauth_state::sign_state(&tenant_id, &state.state_secret, state.state_expiry_minutes)?;
    let auth_url = state.google.authorize_url(signed_state);

    tracing::info!(tenant_id = %tenant_id, "Redirecting tenant to Google consent");
    metrics::record_oauth_event("start", true);

    Ok(found(auth_url.as_str()))
}

async fn google_callback(
    State(state): State<ApiState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let result = handle_callback(&state, query).await;
    metrics::record_oauth_event("callback", result.is_ok());
    result?;

    Ok(found(&state.success_redirect))
}

async fn handle_callback(
    state: &ApiState,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<(), ApiError> {
    let query = query_or_missing(query, "code/state faltantes")?;

    if let Some(error) = present(query.error) {
        return Err(ApiError::ProviderDenied(error));
    }

    let (Some(code), Some(raw_state)) = (present(query.code), present(query.state)) else {
        return Err(ApiError::MissingParameter("code/state faltantes".to_string()));
    };

    let claims = oauth_state::verify_state(&raw_state, &state.state_secret)?;

    service::connect_tenant(state, &claims.tenant_id, &code).await
}
