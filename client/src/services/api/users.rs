//! # User Endpoints

use reqwest::Method;

use super::client::ApiClient;
use super::normalize::{self, has_field};
use crate::core::error::Result;
use shared::dto::{
    CreateUserRequest, Envelope, PagedEnvelope, StatusUpdate, UpdateUserRequest, User, UserStatus,
};

const CONTEXT: &str = "user";

fn unwrap_user(body: &serde_json::Value) -> Result<Envelope<User>> {
    normalize::entity(body, CONTEXT, has_field("id"))
}

/// Profile of the authenticated user.
#[tracing::instrument(skip(client))]
pub async fn current_user(client: &ApiClient) -> Result<Envelope<User>> {
    let body = client.get_json("/users/me", &[]).await?;
    unwrap_user(&body)
}

/// Paginated users. An unrecognizable body degrades to an empty page.
#[tracing::instrument(skip(client))]
pub async fn users(client: &ApiClient, page: u32, limit: u32) -> Result<PagedEnvelope<User>> {
    let query = [("page", page.to_string()), ("limit", limit.to_string())];
    let body = client.get_json("/users", &query).await?;
    normalize::list_or_empty(&body, page, limit, "users")
}

#[tracing::instrument(skip(client))]
pub async fn user(client: &ApiClient, id: &str) -> Result<Envelope<User>> {
    let body = client.get_json(&format!("/users/{}", id), &[]).await?;
    unwrap_user(&body)
}

#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn create_user(client: &ApiClient, request: &CreateUserRequest) -> Result<Envelope<User>> {
    let body = client.send_json(Method::POST, "/users", request).await?;
    unwrap_user(&body)
}

#[tracing::instrument(skip(client, request))]
pub async fn update_user(
    client: &ApiClient,
    id: &str,
    request: &UpdateUserRequest,
) -> Result<Envelope<User>> {
    let body = client
        .send_json(Method::PATCH, &format!("/users/{}", id), request)
        .await?;
    unwrap_user(&body)
}

#[tracing::instrument(skip(client))]
pub async fn update_user_status(
    client: &ApiClient,
    id: &str,
    status: UserStatus,
) -> Result<Envelope<User>> {
    let request = StatusUpdate {
        status: status.as_str().to_string(),
    };
    let body = client
        .send_json(Method::PATCH, &format!("/users/{}/status", id), &request)
        .await?;
    unwrap_user(&body)
}

#[tracing::instrument(skip(client))]
pub async fn delete_user(client: &ApiClient, id: &str) -> Result<Envelope<()>> {
    let body = client.delete_json(&format!("/users/{}", id)).await?;
    Ok(normalize::ack(&body))
}
