//! # Authentication Endpoints
//!
//! Login and signup. Login and public signup persist the returned token; any failure on
//! those two paths also drops whatever token was stored before.

use reqwest::Method;

use super::client::ApiClient;
use super::normalize;
use crate::core::error::Result;
use shared::dto::{AuthResult, LoginRequest, SignupRequest};

/// Login with email and password.
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthResult> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let result = authenticate(client, "/auth/login", &request).await;

    match &result {
        Ok(_) => tracing::info!(duration_ms = start.elapsed().as_millis(), "Login successful"),
        Err(e) => tracing::warn!(error = %e, duration_ms = start.elapsed().as_millis(), "Login failed"),
    }
    result
}

/// Public signup.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn signup(client: &ApiClient, request: &SignupRequest) -> Result<AuthResult> {
    let result = authenticate(client, "/auth/signup", request).await;
    if let Err(e) = &result {
        tracing::warn!(error = %e, "Signup failed");
    }
    result
}

/// Signup on behalf of another user. Requires the caller's token, which is not replaced.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn signup_authenticated(client: &ApiClient, request: &SignupRequest) -> Result<AuthResult> {
    let path = "/auth/signup/authenticated";
    let body = client.send_json(Method::POST, path, request).await?;
    normalize::auth(&body)
}

/// Post credentials, unwrap the token and persist it. Clears the stored token on failure.
async fn authenticate<B: serde::Serialize + ?Sized>(
    client: &ApiClient,
    path: &str,
    request: &B,
) -> Result<AuthResult> {
    let result = match client.send_json(Method::POST, path, request).await {
        Ok(body) => normalize::auth(&body),
        Err(e) => Err(e),
    };

    match &result {
        Ok(auth) => client.tokens().set(&auth.data.access_token),
        Err(_) => client.tokens().clear(),
    }
    result
}
