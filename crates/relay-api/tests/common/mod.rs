use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use relay_api::{
    config::{ApiConfig, DEFAULT_GOOGLE_AUTH_URL, DEFAULT_GOOGLE_SCOPE, DEFAULT_SUCCESS_REDIRECT, Environment},
    router,
    state::ApiState,
};
use serde::Deserialize;
use tower::ServiceExt;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const REDIRECT_URI: &str = "http://localhost:3000/oauth/google/callback";
pub const SETTINGS_API_KEY: &str = "bolt-test-key";
pub const STATE_SECRET: &str = "test_state_secret_minimum_32_characters_long";

/// Test state builder pointing both upstreams at a mock server
pub struct TestStateBuilder {
    config: ApiConfig,
}

impl TestStateBuilder {
    /// `upstream_url` hosts the token endpoint at `/token` and the settings
    /// store at its root
    pub fn new(upstream_url: &str) -> Self {
        Self {
            config: ApiConfig {
                google_client_id: CLIENT_ID.to_string(),
                google_client_secret: CLIENT_SECRET.to_string(),
                google_redirect_uri: REDIRECT_URI.to_string(),
                google_auth_url: DEFAULT_GOOGLE_AUTH_URL.to_string(),
                google_token_url: format!("{}/token", upstream_url),
                google_scope: DEFAULT_GOOGLE_SCOPE.to_string(),
                settings_api_url: upstream_url.to_string(),
                settings_api_key: SETTINGS_API_KEY.to_string(),
                state_secret: STATE_SECRET.to_string(),
                state_expiry_minutes: 10,
                upstream_timeout_secs: 5,
                success_redirect: DEFAULT_SUCCESS_REDIRECT.to_string(),
                env: Environment::Development,
                port: 0,
            },
        }
    }

    pub fn upstream_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upstream_timeout_secs = secs;
        self
    }

    pub fn build(self) -> ApiState {
        ApiState::new(self.config).expect("Failed to create test state")
    }

    /// Router over a freshly built state
    pub fn client(self) -> TestClient {
        TestClient::new(router::router().with_state(self.build()))
    }
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    /// Value of the `Location` header
    pub fn location(&self) -> String {
        self.headers
            .get("location")
            .expect("Response has no Location header")
            .to_str()
            .expect("Location is not valid UTF-8")
            .to_string()
    }

    /// Query parameters of the `Location` header
    pub fn location_params(&self) -> HashMap<String, String> {
        let url = reqwest::Url::parse(&self.location()).expect("Location is not an absolute URL");
        url.query_pairs().into_owned().collect()
    }
}

/// URL-encode a value for use in a test query string
pub fn encode(value: &str) -> String {
    let mut url = reqwest::Url::parse("http://localhost/").expect("valid URL");
    url.query_pairs_mut().append_pair("v", value);
    url.query()
        .and_then(|q| q.strip_prefix("v="))
        .expect("query was just set")
        .to_string()
}
