//! Integration tests driving `ApiClient` against a mock backend.
//!
//! These tests verify:
//! - Bearer token attachment and the 401 token-invalidation rules
//! - Auth unwrapping and token persistence at every nesting depth
//! - List normalization (meta synthesis, published filter, empty fallback)
//! - Image upload, proxy fetch and URL helpers

use client::core::{ApiService, ClientError};
use client::services::api::{ApiClient, ImageUpload};
use client::services::site::{check_api_status, ApiStatus};
use client::services::token_store::{MemoryTokenStore, TokenStore};
use serde_json::json;
use shared::dto::{NotificationRequest, UserStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper creating a client with an in-memory token slot
fn client_for(server: &MockServer, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    });
    let client = ApiClient::with_store(&server.uri(), store.clone()).expect("client");
    (client, store)
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"data": {"id": "u1", "email": "ana@example.com", "status": "active"}},
            "timestamp": "2024-05-01T10:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("abc"));
    let user = client.current_user().await.unwrap();
    assert_eq!(user.data.id, "u1");
    assert!(user.data.is_active());
    assert_eq!(user.timestamp, "2024-05-01T10:00:00.000Z");
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blogs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None);
    client.blogs(1, 10, false).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_login_401_clears_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "invalid credentials"
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, Some("stale"));
    let err = client.login("ana@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { status: 401, .. }));
    assert_eq!(err.user_message(), "invalid credentials");
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_business_401_keeps_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blogs"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "email address invalid"
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, Some("keep-me"));
    let err = client.blogs(1, 10, false).await.unwrap_err();
    assert!(err.is_business());
    assert_eq!(store.get(), Some("keep-me".to_string()));
}

#[tokio::test]
async fn test_email_401_keeps_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/email/admin-notification"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Mail service configuration missing"
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, Some("keep-me"));
    let request = NotificationRequest {
        to: "admin@flighttravel.com".to_string(),
        subject: "New signup".to_string(),
        message: "Ana joined".to_string(),
    };
    let err = client.send_admin_notification(&request).await.unwrap_err();
    assert_eq!(err.user_message(), "Mail service configuration missing");
    assert_eq!(store.get(), Some("keep-me".to_string()));
}

#[tokio::test]
async fn test_login_triple_nested_persists_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ana@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"data": {"data": {
                "access_token": "tok-3",
                "user": {"id": "u1", "email": "ana@example.com", "firstName": "Ana"}
            }}},
            "timestamp": "2024-05-01T10:00:00.000Z"
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, None);
    let auth = client.login("ana@example.com", "secret").await.unwrap();
    assert!(auth.success);
    assert_eq!(auth.data.access_token, "tok-3");
    assert_eq!(auth.data.user.map(|u| u.first_name), Some("Ana".to_string()));
    assert_eq!(store.get(), Some("tok-3".to_string()));
}

#[tokio::test]
async fn test_signup_token_field_single_nested() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"token": "tok-1"}
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, None);
    let request = shared::dto::SignupRequest {
        email: "ana@example.com".to_string(),
        password: "secret".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Silva".to_string(),
        role: None,
    };
    let auth = client.signup(&request).await.unwrap();
    assert_eq!(auth.data.access_token, "tok-1");
    assert!(auth.data.user.is_none());
    assert_eq!(store.get(), Some("tok-1".to_string()));
}

#[tokio::test]
async fn test_login_without_token_fails_and_clears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"user": {"id": "u1"}}
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, Some("previous"));
    let err = client.login("ana@example.com", "secret").await.unwrap_err();
    assert!(matches!(err, ClientError::Authentication(_)));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_authenticated_signup_keeps_caller_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup/authenticated"))
        .and(header("Authorization", "Bearer admin"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"data": {"access_token": "new-user-token"}}
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server, Some("admin"));
    let request = shared::dto::SignupRequest {
        email: "bob@example.com".to_string(),
        password: "secret".to_string(),
        first_name: "Bob".to_string(),
        last_name: "Costa".to_string(),
        role: Some(shared::dto::Role::Manager),
    };
    let auth = client.signup_authenticated(&request).await.unwrap();
    assert_eq!(auth.data.access_token, "new-user-token");
    assert_eq!(store.get(), Some("admin".to_string()));
}

#[tokio::test]
async fn test_users_list_synthesizes_meta() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": "u1"}, {"id": "u2"}]
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None);
    let page = client.users(2, 5).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.limit, 5);
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.meta.total_pages, 1);
    assert!(!page.meta.has_next_page);
}

#[tokio::test]
async fn test_users_unrecognized_body_is_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"unexpected": true}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None);
    let page = client.users(1, 10).await.unwrap();
    assert!(!page.success);
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_published_filter_is_client_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blogs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "success": true,
                "data": [
                    {"id": "b1", "title": "Lisbon", "status": "PUBLISHED"},
                    {"id": "b2", "title": "Porto", "status": "DRAFT"},
                    {"id": "b3", "title": "Faro", "status": "published"}
                ],
                "meta": {"page": 1, "limit": 3, "total": 12, "totalPages": 4,
                         "hasNextPage": true, "hasPreviousPage": false}
            }
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None);
    let page = client.blogs(1, 3, true).await.unwrap();
    let titles: Vec<_> = page.data.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Lisbon", "Faro"]);
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.meta.total_pages, 4);

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("published"), "{query}");
}

#[tokio::test]
async fn test_blog_missing_is_extraction_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blogs/b9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"message": "nothing here"}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None);
    let err = client.blog("b9").await.unwrap_err();
    match err {
        ClientError::Extraction { body, .. } => assert!(body.contains("nothing here")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_update_user_status_sends_canonical_status() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1/status"))
        .and(body_json(json!({"status": "INACTIVE"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "u1", "status": "INACTIVE", "isActive": true}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("admin"));
    let user = client.update_user_status("u1", UserStatus::Inactive).await.unwrap();
    assert!(!user.data.is_active());
}

#[tokio::test]
async fn test_delete_returns_ack_from_outermost_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/images/i1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "timestamp": "2024-05-01T10:00:00.000Z",
            "data": {"success": false}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/blogs/b1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("admin"));
    let ack = client.delete_image("i1").await.unwrap();
    assert!(ack.success);
    assert_eq!(ack.timestamp, "2024-05-01T10:00:00.000Z");

    let ack = client.delete_blog("b1").await.unwrap();
    assert!(ack.success);
}

#[tokio::test]
async fn test_upload_image_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {"data": {"imageUrl": "/uploads/lisbon.jpg"}}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("admin"));
    let upload = ImageUpload::new("lisbon.jpg", vec![0xFF, 0xD8, 0xFF]).with_mime_type("image/jpeg");
    let url = client.upload_image(upload, Some("b1")).await.unwrap();
    assert_eq!(url, "/uploads/lisbon.jpg");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("name=\"blogId\""));
}

#[tokio::test]
async fn test_set_featured_image() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/images/i2"))
        .and(body_json(json!({"isFeaturedImage": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"data": {"id": "i2", "url": "/uploads/a.jpg", "isFeaturedImage": true}}
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("admin"));
    let image = client.set_featured_image("b1", "i2").await.unwrap();
    assert!(image.data.is_featured());
}

#[tokio::test]
async fn test_update_image_sends_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/images/i3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "/uploads/b.jpg"
        })))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, Some("admin"));
    let mut metadata = BTreeMap::new();
    metadata.insert("name".to_string(), "Sunset".to_string());
    let image = client.update_image("i3", None, &metadata).await.unwrap();
    assert_eq!(image.data.url, "/uploads/b.jpg");

    let requests = server.received_requests().await.unwrap();
    assert!(String::from_utf8_lossy(&requests[0].body).contains("Sunset"));
}

#[tokio::test]
async fn test_fetch_image_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images"))
        .and(query_param("url", "http://ext.example/x.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None);
    let bytes = client.fetch_image("http://ext.example/x.jpg").await.unwrap();
    assert_eq!(bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_image_url_helpers() {
    let server = MockServer::start().await;
    let (client, _) = client_for(&server, None);
    assert_eq!(
        client.image_url(Some("http://ext.example/x.jpg")),
        format!("{}/images?url=http%3A%2F%2Fext.example%2Fx.jpg", server.uri())
    );
    assert_eq!(client.image_url(None), "/placeholder-image.jpg");
    assert_eq!(client.direct_image_url(Some("/a.jpg")), "/a.jpg");
}

#[tokio::test]
async fn test_api_status_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blogs"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server, None);
    assert_eq!(
        check_api_status(&client).await,
        ApiStatus::Offline {
            reason: "API returned status 500: db down".to_string()
        }
    );
}

#[tokio::test]
async fn test_api_status_unreachable_backend() {
    let store = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::with_store("http://127.0.0.1:9", store).unwrap();
    match check_api_status(&client).await {
        ApiStatus::Offline { reason } => {
            assert!(reason.starts_with("backend not running at http://127.0.0.1:9"), "{reason}")
        }
        ApiStatus::Online => panic!("port 9 should refuse connections"),
    }
}
