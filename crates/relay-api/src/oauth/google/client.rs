use oauth2::{
    AuthUrl, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet, RedirectUrl, Scope,
    basic::BasicClient, url::Url,
};

use super::models::{GoogleTokenResponse, TokenExchange};
use crate::{config::ApiConfig, error::ApiError};

pub type AuthorizeClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet>;

/// Google OAuth endpoints used by the connect flow
///
/// The authorization URL is built through `oauth2`. The code exchange is a
/// plain form POST so the upstream body can be echoed back when it fails.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    oauth_client: AuthorizeClient,
    http: reqwest::Client,
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_uri: String,
    token_url: reqwest::Url,
    scope: Scope,
}

impl GoogleOAuthClient {
    pub fn new(config: &ApiConfig, http: reqwest::Client) -> anyhow::Result<Self> {
        let client_id = ClientId::new(config.google_client_id.clone());

        let oauth_client = BasicClient::new(client_id.clone())
            .set_auth_uri(AuthUrl::new(config.google_auth_url.clone())?)
            .set_redirect_uri(RedirectUrl::new(config.google_redirect_uri.clone())?);

        Ok(Self {
            oauth_client,
            http,
            client_id,
            client_secret: ClientSecret::new(config.google_client_secret.clone()),
            redirect_uri: config.google_redirect_uri.clone(),
            token_url: reqwest::Url::parse(&config.google_token_url)?,
            scope: Scope::new(config.google_scope.clone()),
        })
    }

    /// Consent page URL carrying `state`
    ///
    /// Requests offline access and forces the consent prompt so Google hands
    /// out a refresh token even when the tenant connected before.
    pub fn authorize_url(&self, state: String) -> Url {
        let (url, _) = self
            .oauth_client
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(self.scope.clone())
            .add_extra_param("access_type", "offline")
            .add_extra_param("include_granted_scopes", "true")
            .add_extra_param("prompt", "consent")
            .url();

        url
    }

    /// Exchange an authorization code at the token endpoint
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchange, ApiError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.secret().as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&params)
            .send()
            .await
            .map_err(|e| ApiError::TokenExchangeFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::TokenExchangeFailed(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Google token endpoint rejected the code");
            return Err(ApiError::TokenExchangeFailed(body));
        }

        let token_response: GoogleTokenResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::TokenExchangeFailed(format!("Invalid token response: {}", e))
        })?;

        Ok(token_response.into())
    }
}
