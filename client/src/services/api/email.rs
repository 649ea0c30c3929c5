//! # Email Endpoints
//!
//! Mail failures come back as 401s on some deployments; the interceptor treats `/email`
//! as a business path so they never log the user out.

use reqwest::Method;

use super::client::ApiClient;
use super::normalize;
use crate::core::error::Result;
use shared::dto::{Envelope, NotificationRequest, SendEmailRequest};

#[tracing::instrument(skip(client, request), fields(subject = %request.subject, recipients = request.to.len()))]
pub async fn send_email(client: &ApiClient, request: &SendEmailRequest) -> Result<Envelope<()>> {
    let body = client.send_json(Method::POST, "/email/send", request).await?;
    Ok(normalize::ack(&body))
}

#[tracing::instrument(skip(client, request), fields(to = %request.to))]
pub async fn send_admin_notification(
    client: &ApiClient,
    request: &NotificationRequest,
) -> Result<Envelope<()>> {
    let body = client
        .send_json(Method::POST, "/email/admin-notification", request)
        .await?;
    Ok(normalize::ack(&body))
}

#[tracing::instrument(skip(client, request), fields(to = %request.to))]
pub async fn send_user_notification(
    client: &ApiClient,
    request: &NotificationRequest,
) -> Result<Envelope<()>> {
    let body = client
        .send_json(Method::POST, "/email/user-notification", request)
        .await?;
    Ok(normalize::ack(&body))
}
