use chrono::Utc;

use crate::{ApiState, error::ApiError, metrics, settings::TenantSettingsPatch};

/// Exchange `code` for tokens and store them on the tenant's settings record
///
/// Runs strictly in order: the settings store is only called once the token
/// exchange succeeded, and at most once. Tokens are dropped if the update
/// fails, a new consent round is needed in that case.
pub async fn connect_tenant(state: &ApiState, tenant_id: &str, code: &str) -> Result<(), ApiError> {
    let tokens = state.google.exchange_code(code).await;
    metrics::record_oauth_event("token_exchange", tokens.is_ok());
    let tokens = tokens?;

    let has_refresh_token = tokens.refresh_token.is_some();
    let patch = TenantSettingsPatch::from_tokens(tokens, Utc::now())?;

    let updated = state.settings.update_tenant_settings(tenant_id, &patch).await;
    metrics::record_oauth_event("settings_update", updated.is_ok());
    updated?;

    tracing::info!(
        tenant_id,
        has_refresh_token,
        expires_at = %patch.google_token_expiry,
        "Google account connected"
    );

    Ok(())
}
