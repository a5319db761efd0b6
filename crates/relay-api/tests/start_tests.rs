use axum::http::StatusCode;
use relay_api::oauth::state::verify_state;

use crate::common::{self, CLIENT_ID, REDIRECT_URI, STATE_SECRET, TestStateBuilder};

const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn test_start_redirects_to_google_consent() {
    let client = TestStateBuilder::new(UNUSED_UPSTREAM).client();

    let response = client.get("/oauth/google/start?tenant_id=abc123").await;

    response.assert_status(StatusCode::FOUND);
    assert!(
        response
            .location()
            .starts_with("https://accounts.google.com/o/oauth2/v2/auth?"),
        "Unexpected location {}",
        response.location()
    );

    let params = response.location_params();
    assert_eq!(params["client_id"], CLIENT_ID);
    assert_eq!(params["redirect_uri"], REDIRECT_URI);
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["access_type"], "offline");
    assert_eq!(params["include_granted_scopes"], "true");
    assert_eq!(params["prompt"], "consent");

    let claims = verify_state(&params["state"], STATE_SECRET).expect("State should verify");
    assert_eq!(claims.tenant_id, "abc123");
}

#[tokio::test]
async fn test_start_state_carries_unusual_tenant_ids() {
    let client = TestStateBuilder::new(UNUSED_UPSTREAM).client();

    for tenant_id in ["tenant with spaces", "ñandú/42", "a&b=c"] {
        let uri = format!("/oauth/google/start?tenant_id={}", common::encode(tenant_id));
        let response = client.get(&uri).await;

        response.assert_status(StatusCode::FOUND);
        let params = response.location_params();
        let claims = verify_state(&params["state"], STATE_SECRET).expect("State should verify");
        assert_eq!(claims.tenant_id, tenant_id);
    }
}

#[tokio::test]
async fn test_start_without_tenant_id() {
    let client = TestStateBuilder::new(UNUSED_UPSTREAM).client();

    for uri in ["/oauth/google/start", "/oauth/google/start?tenant_id="] {
        let response = client.get(uri).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body, serde_json::json!({ "error": "tenant_id requerido" }));
    }
}

#[tokio::test]
async fn test_start_repeated_tenant_id_is_json_error() {
    let client = TestStateBuilder::new(UNUSED_UPSTREAM).client();

    let response = client
        .get("/oauth/google/start?tenant_id=abc123&tenant_id=victim")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({ "error": "tenant_id requerido" }));
}
