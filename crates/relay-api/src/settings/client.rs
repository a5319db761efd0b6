use reqwest::{Url, header};

use super::models::TenantSettingsPatch;
use crate::error::ApiError;

/// Client for the external tenant settings store
#[derive(Clone)]
pub struct SettingsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl SettingsClient {
    pub fn new(base_url: &str, api_key: String, http: reqwest::Client) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("settings store URL {} cannot be used as a base", base_url);
        }

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// `{base}/tenant-settings/{tenant_id}`, with the tenant id encoded as one segment
    pub fn tenant_url(&self, tenant_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("tenant-settings").push(tenant_id);
        }
        url
    }

    /// PATCH the tenant record, succeeding only on a 2xx answer
    pub async fn update_tenant_settings(
        &self,
        tenant_id: &str,
        patch: &TenantSettingsPatch,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_vec(patch)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize settings patch: {}", e)))?;

        let response = self
            .http
            .patch(self.tenant_url(tenant_id))
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::SettingsUpdateFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read upstream body: {}", e));
            tracing::warn!(tenant_id, status = status.as_u16(), "Settings store rejected the update");
            return Err(ApiError::SettingsUpdateFailed(detail));
        }

        Ok(())
    }
}
