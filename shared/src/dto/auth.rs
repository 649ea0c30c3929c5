//! # Auth DTOs
//!
//! Login and signup bodies and the normalized auth result.

use serde::{Deserialize, Serialize};

use super::envelope::Envelope;
use super::status::Role;
use super::user::User;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request, used by both public and authenticated signup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Normalized auth payload. `access_token` is never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthData {
    pub access_token: String,
    pub user: Option<User>,
}

/// Authentication result (login/signup success)
pub type AuthResult = Envelope<AuthData>;
