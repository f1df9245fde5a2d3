//! Integration tests for the reqwest adapter against a local mock server.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use restprobe_application::{ApiClient, ApplicationError, HttpClient, HttpClientError, UserClient};
use restprobe_domain::{HttpMethod, RequestBody, RequestOptions, RequestSpec, User, UserPatch};
use restprobe_infrastructure::ReqwestHttpClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> Arc<ReqwestHttpClient> {
    Arc::new(ReqwestHttpClient::new().expect("client"))
}

#[tokio::test]
async fn get_returns_status_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Leanne Graham"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let users = UserClient::new(server.uri(), client());
    let response = users.get_user(1).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_json());
    assert_eq!(
        response.json_value().unwrap(),
        json!({"id": 1, "name": "Leanne Graham"})
    );
}

#[tokio::test]
async fn not_found_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/9999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let users = UserClient::new(server.uri(), client());
    let response = users.get_user(9999).await.unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "Not Found");
    assert!(!response.is_success());
}

#[tokio::test]
async fn post_sends_json_body_with_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Test User", "email": "test@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "Test User",
            "email": "test@example.com",
            "id": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = UserClient::new(server.uri(), client());
    let response = users
        .create_user(&User::new("Test User", "test@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    let created: User = response.json().unwrap();
    assert_eq!(created.id, Some(11));
}

#[tokio::test]
async fn put_patch_and_delete_use_their_verbs() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/1"))
        .and(body_json(json!({"email": "newemail@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let users = UserClient::new(server.uri(), client());
    let put = users
        .update_user(1, &User::new("Updated User Name", "updated@example.com"))
        .await
        .unwrap();
    let patch = users
        .patch_user(1, &UserPatch::new().email("newemail@example.com"))
        .await
        .unwrap();
    let delete = users.delete_user(1).await.unwrap();

    assert_eq!(
        [put.status, patch.status, delete.status],
        [200, 200, 200]
    );
}

#[tokio::test]
async fn options_add_query_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/posts"))
        .and(query_param("_limit", "2"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new()
        .with_header("X-Trace", "abc")
        .with_query("_limit", "2");
    let api = ApiClient::new(format!("{}/", server.uri()), client());
    let response = api.get("/users/1/posts", &options).await.unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn explicit_content_type_is_not_overridden() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = RequestSpec::new(HttpMethod::Post, format!("{}/echo", server.uri()))
        .with_body(RequestBody::text("hello"));
    request.headers.set("Content-Type", "text/plain");

    let response = client().execute(&request).await.unwrap();
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let options = RequestOptions::new().with_timeout(Duration::from_millis(50));
    let users = UserClient::new(server.uri(), client()).with_options(options);
    let error = users.get_user(1).await.unwrap_err();

    assert_eq!(
        error,
        ApplicationError::Http(HttpClientError::Timeout { timeout_ms: 50 })
    );
}

#[tokio::test]
async fn closed_port_maps_to_connection_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let request = RequestSpec::get(format!("http://127.0.0.1:{port}/users/1"));
    let error = client().execute(&request).await.unwrap_err();

    assert!(
        matches!(
            error,
            HttpClientError::ConnectionRefused { .. } | HttpClientError::ConnectionFailed(_)
        ),
        "{error:?}"
    );
}
