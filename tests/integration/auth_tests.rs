use crate::common::{BASIC_AUTH, CLIENT_ID, CLIENT_SECRET};
use serde_json::json;
use vectara_ingest::vectara::{fetch_token, AuthError, OAuthCredentials};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials(server: &MockServer) -> OAuthCredentials {
    OAuthCredentials {
        auth_url: server.uri(),
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
    }
}

#[tokio::test]
async fn test_fetch_token_client_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "eyJhbGciOi.token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = fetch_token(&reqwest::Client::new(), &credentials(&server))
        .await
        .unwrap();

    assert_eq!(token, "eyJhbGciOi.token");
}

#[tokio::test]
async fn test_fetch_token_sends_no_scope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "t" })),
        )
        .mount(&server)
        .await;

    fetch_token(&reqwest::Client::new(), &credentials(&server))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(!body.contains("scope="), "unexpected scope in {}", body);
}

#[tokio::test]
async fn test_fetch_token_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch_token(&reqwest::Client::new(), &credentials(&server))
        .await
        .unwrap_err();

    match err {
        AuthError::Rejected { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid_client");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_token_without_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })),
        )
        .mount(&server)
        .await;

    let err = fetch_token(&reqwest::Client::new(), &credentials(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::MissingToken));
}

#[tokio::test]
async fn test_fetch_token_unreachable_server() {
    let credentials = OAuthCredentials {
        auth_url: "http://127.0.0.1:1".to_string(),
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
    };

    let err = fetch_token(&reqwest::Client::new(), &credentials)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Request { .. }));
}
