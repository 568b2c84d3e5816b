//! Integration tests for the Postdeck client and authorization pipeline

use std::sync::Arc;
use std::time::Duration;

use postdeck_http::client::{
    ClientError, Credential, MemoryTokenStore, TokenStore, TypedClientBuilder,
};
use postdeck_http::types::{LoginRequest, RegisterRequest};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(code: u16, message: &str, data: serde_json::Value) -> serde_json::Value {
    json!({
        "meta": { "code": code, "message": message },
        "data": data,
    })
}

fn user_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": "sam@example.com",
        "fullname": "Sam Example",
        "status": "active",
        "provider": "email",
        "avatar_url": null,
        "org_name": null,
    })
}

fn store_with(access: &str, refresh: Option<&str>) -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_credential(Credential {
        access_token: access.into(),
        refresh_token: refresh.map(Into::into),
    }))
}

fn authenticated_client(
    server: &MockServer,
    tokens: Arc<MemoryTokenStore>,
) -> postdeck_http::AuthenticatedDeckClient {
    TypedClientBuilder::new()
        .base_url(server.uri())
        .build_authenticated(tokens)
        .unwrap()
}

#[tokio::test]
async fn builder_requires_base_url() {
    let result = TypedClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn bearer_header_comes_from_the_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(200, "ok", user_body("u1"))))
        .mount(&server)
        .await;

    let client = authenticated_client(&server, store_with("A1", None));
    let user = client.current_user().await.unwrap();
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn login_returns_the_issued_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            200,
            "ok",
            json!({ "access_token": "A1", "refresh_token": "R1", "user_id": "u1" }),
        )))
        .mount(&server)
        .await;

    let client = TypedClientBuilder::new()
        .base_url(server.uri())
        .build_public()
        .unwrap();

    let tokens = client
        .login(LoginRequest {
            email: "sam@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();
    assert_eq!(tokens.access_token, "A1");
    assert_eq!(tokens.refresh_token, "R1");
}

#[tokio::test]
async fn envelope_401_counts_as_auth_failure_even_on_http_200() {
    let server = MockServer::start().await;

    // Backend reports the rejection inside a transport-level 200
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(401, "token expired", serde_json::Value::Null)),
        )
        .mount(&server)
        .await;

    let tokens = store_with("A1", None);
    let client = authenticated_client(&server, tokens.clone());

    let result = client.current_user().await;
    assert!(matches!(result, Err(ClientError::SessionExpired)));
    // No refresh credential: expiry is terminal and the store is cleared
    assert_eq!(tokens.get(), None);
}

#[tokio::test]
async fn expired_credential_is_renewed_and_the_call_replayed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(envelope(401, "token expired", serde_json::Value::Null)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(200, "ok", user_body("u1"))))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            200,
            "ok",
            json!({ "access_token": "A2", "refresh_token": "R2", "user_id": "u1" }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = store_with("A1", Some("R1"));
    let client = authenticated_client(&server, tokens.clone());

    let user = client.current_user().await.unwrap();
    assert_eq!(user.id, "u1");

    let current = tokens.get().unwrap();
    assert_eq!(current.access_token, "A2");
    assert_eq!(current.refresh_token.as_deref(), Some("R2"));
}

#[tokio::test]
async fn concurrent_failures_share_a_single_renewal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(envelope(401, "token expired", serde_json::Value::Null)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(200, "ok", user_body("u1"))))
        .mount(&server)
        .await;

    // Slow renewal keeps the window open long enough for every
    // concurrent failure to enqueue rather than lead
    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(
                    200,
                    "ok",
                    json!({ "access_token": "A2", "refresh_token": "R2", "user_id": "u1" }),
                ))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tokens = store_with("A1", Some("R1"));
    let client = authenticated_client(&server, tokens);

    let (a, b, c) = futures::join!(
        client.current_user(),
        client.current_user(),
        client.current_user()
    );
    assert_eq!(a.unwrap().id, "u1");
    assert_eq!(b.unwrap().id, "u1");
    assert_eq!(c.unwrap().id, "u1");
}

#[tokio::test]
async fn failed_renewal_expires_every_queued_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(envelope(401, "token expired", serde_json::Value::Null)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(envelope(401, "refresh token revoked", serde_json::Value::Null))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tokens = store_with("A1", Some("R1"));
    let client = authenticated_client(&server, tokens.clone());

    let (a, b) = futures::join!(client.current_user(), client.current_user());
    assert!(matches!(a, Err(ClientError::SessionExpired)));
    assert!(matches!(b, Err(ClientError::SessionExpired)));
    assert_eq!(tokens.get(), None);
}

#[tokio::test]
async fn replayed_call_is_never_retried_twice() {
    let server = MockServer::start().await;

    // The credential is "renewed" but the backend keeps rejecting
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(envelope(401, "token expired", serde_json::Value::Null)),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            200,
            "ok",
            json!({ "access_token": "A2", "refresh_token": "R2", "user_id": "u1" }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = store_with("A1", Some("R1"));
    let client = authenticated_client(&server, tokens.clone());

    let result = client.current_user().await;
    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert_eq!(tokens.get(), None);
}

#[tokio::test]
async fn server_failure_leaves_the_credential_alone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(envelope(500, "boom", serde_json::Value::Null)),
        )
        .mount(&server)
        .await;

    let tokens = store_with("A1", Some("R1"));
    let client = authenticated_client(&server, tokens.clone());

    let result = client.current_user().await;
    assert!(matches!(result, Err(ClientError::ServerError { status: 500, .. })));
    assert!(tokens.get().is_some());
}

#[tokio::test]
async fn validation_errors_surface_field_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "meta": { "code": 400, "message": "validation failed" },
            "data": null,
            "errors": { "email": "already taken" },
        })))
        .mount(&server)
        .await;

    let client = TypedClientBuilder::new()
        .base_url(server.uri())
        .build_public()
        .unwrap();

    let result = client
        .register(RegisterRequest {
            email: "sam@example.com".into(),
            fullname: "Sam".into(),
            password: "hunter2".into(),
        })
        .await;

    match result {
        Err(ClientError::Validation { errors, .. }) => {
            assert_eq!(errors.get("email").map(String::as_str), Some("already taken"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn logout_during_renewal_discards_the_new_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(envelope(401, "token expired", serde_json::Value::Null)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(
                    200,
                    "ok",
                    json!({ "access_token": "A2", "refresh_token": "R2", "user_id": "u1" }),
                ))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let tokens = store_with("A1", Some("R1"));
    let client = authenticated_client(&server, tokens.clone());

    let (result, ()) = futures::join!(client.current_user(), async {
        // Logout lands while the renewal is still in flight
        tokio::time::sleep(Duration::from_millis(50)).await;
        tokens.clear();
    });

    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert_eq!(tokens.get(), None);
}
