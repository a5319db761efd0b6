use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::{error::ApiError, oauth::google::models::TokenExchange};

/// Partial update sent to the settings store
///
/// The store merges by field presence, so an absent refresh token is left out
/// of the body entirely and the previously stored one survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantSettingsPatch {
    pub google_access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_refresh_token: Option<String>,
    pub google_token_expiry: String,
}

impl TenantSettingsPatch {
    /// Build the patch, turning the relative lifetime into an absolute expiry
    pub fn from_tokens(tokens: TokenExchange, now: DateTime<Utc>) -> Result<Self, ApiError> {
        let expiry = chrono::Duration::try_seconds(tokens.expires_in_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ApiError::TokenExchangeFailed(format!(
                    "expires_in out of range: {}",
                    tokens.expires_in_seconds
                ))
            })?;

        Ok(Self {
            google_access_token: tokens.access_token,
            google_refresh_token: tokens.refresh_token,
            google_token_expiry: expiry.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_patch_with_refresh_token() {
        let tokens = TokenExchange {
            access_token: "A".to_string(),
            refresh_token: Some("R".to_string()),
            expires_in_seconds: 3600,
        };

        let patch = TenantSettingsPatch::from_tokens(tokens, fixed_now()).expect("valid patch");
        let body = serde_json::to_value(&patch).expect("Failed to serialize patch");

        assert_eq!(
            body,
            serde_json::json!({
                "google_access_token": "A",
                "google_refresh_token": "R",
                "google_token_expiry": "2025-01-01T13:00:00.000Z",
            })
        );
    }

    #[test]
    fn test_patch_omits_missing_refresh_token() {
        let tokens = TokenExchange {
            access_token: "A".to_string(),
            refresh_token: None,
            expires_in_seconds: 0,
        };

        let patch = TenantSettingsPatch::from_tokens(tokens, fixed_now()).expect("valid patch");
        let body = serde_json::to_string(&patch).expect("Failed to serialize patch");

        assert!(!body.contains("google_refresh_token"), "body was {}", body);
        assert!(body.contains("\"google_token_expiry\":\"2025-01-01T12:00:00.000Z\""));
    }

    #[test]
    fn test_patch_rejects_absurd_lifetime() {
        let tokens = TokenExchange {
            access_token: "A".to_string(),
            refresh_token: None,
            expires_in_seconds: i64::MAX,
        };

        let result = TenantSettingsPatch::from_tokens(tokens, fixed_now());

        assert!(matches!(result, Err(ApiError::TokenExchangeFailed(_))));
    }
}
