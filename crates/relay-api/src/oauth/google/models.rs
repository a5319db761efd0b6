use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StartQuery {
    pub tenant_id: Option<String>,
}

/// Query parameters Google appends to the redirect URI
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Successful body of Google's token endpoint
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// Tokens obtained for one callback, never stored by this service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenExchange {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in_seconds: i64,
}

impl From<GoogleTokenResponse> for TokenExchange {
    fn from(response: GoogleTokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.filter(|t| !t.is_empty()),
            expires_in_seconds: response.expires_in.unwrap_or(0),
        }
    }
}
