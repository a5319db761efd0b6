//! Signed `state` parameter carried through the provider redirect.
//!
//! The tenant id travels out to the identity provider and back inside this
//! value, so it is an HS256 JWT: the callback only trusts the tenant id once
//! the signature and expiry check out.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateClaims {
    pub tenant_id: String,
    pub nonce: String,
    pub issued_at_millis: i64,
    pub exp: u64,
}

/// Generate the 8 byte hex nonce that makes two states for one tenant differ
fn generate_nonce() -> String {
    let nonce: [u8; 8] = rand::thread_rng().r#gen();
    hex::encode(nonce)
}

/// Sign a state value for `tenant_id`, valid for `expiry_minutes`
pub fn sign_state(tenant_id: &str, secret: &str, expiry_minutes: i64) -> Result<String, ApiError> {
    sign_state_at(tenant_id, secret, expiry_minutes, Utc::now())
}

pub(crate) fn sign_state_at(
    tenant_id: &str,
    secret: &str,
    expiry_minutes: i64,
    issued_at: DateTime<Utc>,
) -> Result<String, ApiError> {
    let expires_at = chrono::Duration::try_minutes(expiry_minutes)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
        .ok_or_else(|| {
            ApiError::Internal(format!("state expiry out of range: {} minutes", expiry_minutes))
        })?;
    let exp = u64::try_from(expires_at.timestamp())
        .map_err(|_| ApiError::Internal(format!("state expiry before epoch: {}", expires_at)))?;

    let claims = StateClaims {
        tenant_id: tenant_id.to_string(),
        nonce: generate_nonce(),
        issued_at_millis: issued_at.timestamp_millis(),
        exp,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify a state value and recover its claims
///
/// Bad signatures, expired or malformed values and an empty tenant id are all
/// reported as [`ApiError::InvalidState`].
pub fn verify_state(state: &str, secret: &str) -> Result<StateClaims, ApiError> {
    let token_data = jsonwebtoken::decode::<StateClaims>(
        state,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ApiError::InvalidState(e.to_string()))?;

    if token_data.claims.tenant_id.is_empty() {
        return Err(ApiError::InvalidState("empty tenant id".to_string()));
    }

    Ok(token_data.claims)
}
