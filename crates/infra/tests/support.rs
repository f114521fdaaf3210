//! Shared wiremock fixtures for gateway integration tests.

use std::time::Duration;

use daasgateway_domain::ClientSettings;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const COGNITO_PATH: &str = "/cognito/";

/// Settings pointing both Cognito and the gateway at `server`.
pub fn settings(server: &MockServer) -> ClientSettings {
    ClientSettings::new()
        .username("shop@example.com")
        .password("correct-password")
        .client_id("client-123")
        .region("ap-northeast-2")
        .environment("beta")
        .base_url(server.uri())
        .identity_endpoint(format!("{}{COGNITO_PATH}", server.uri()))
        .request_timeout(Duration::from_secs(5))
}

fn token_body(id_token: &str, refresh_token: Option<&str>, expires_in: i64) -> serde_json::Value {
    let mut result = json!({"IdToken": id_token, "ExpiresIn": expires_in, "TokenType": "Bearer"});
    if let Some(refresh) = refresh_token {
        result["RefreshToken"] = json!(refresh);
    }
    json!({ "AuthenticationResult": result })
}

/// Accept the password grant and issue `id_token` valid for `expires_in` seconds.
pub async fn mount_login(server: &MockServer, id_token: &str, expires_in: i64) {
    Mock::given(method("POST"))
        .and(path(COGNITO_PATH))
        .and(header("x-amz-target", "AWSCognitoIdentityProviderService.InitiateAuth"))
        .and(body_partial_json(json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "AuthParameters": {"PASSWORD": "correct-password"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(
            id_token,
            Some("refresh-1"),
            expires_in,
        )))
        .mount(server)
        .await;
}

/// Reject any password grant with Cognito's `NotAuthorizedException`.
pub async fn mount_login_rejected(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(COGNITO_PATH))
        .and(body_partial_json(json!({"AuthFlow": "USER_PASSWORD_AUTH"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "NotAuthorizedException",
            "message": "Incorrect username or password."
        })))
        .mount(server)
        .await;
}

/// Accept the refresh grant and issue `id_token` without a new refresh token.
pub async fn mount_refresh(server: &MockServer, id_token: &str, expires_in: i64) {
    Mock::given(method("POST"))
        .and(path(COGNITO_PATH))
        .and(body_partial_json(json!({
            "AuthFlow": "REFRESH_TOKEN_AUTH",
            "AuthParameters": {"REFRESH_TOKEN": "refresh-1"}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_body(id_token, None, expires_in)),
        )
        .mount(server)
        .await;
}

/// Number of requests `server` received with the given auth flow.
pub async fn auth_calls(server: &MockServer, flow: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r: &&Request| r.url.path() == COGNITO_PATH)
        .filter(|r| {
            serde_json::from_slice::<serde_json::Value>(&r.body)
                .map(|b| b["AuthFlow"] == flow)
                .unwrap_or(false)
        })
        .count()
}

/// Requests received on `request_path`.
pub async fn calls_to(server: &MockServer, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == request_path)
        .collect()
}
