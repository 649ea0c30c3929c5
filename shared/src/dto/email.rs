//! # Email DTOs
//!
//! Bodies for the `/email/*` endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /email/send`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendEmailRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
}

/// Body of `POST /email/admin-notification` and `POST /email/user-notification`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    pub to: String,
    pub subject: String,
    pub message: String,
}
