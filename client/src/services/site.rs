//! # Site Helpers
//!
//! Thin page-level logic between the UI and [`ApiService`]: what the home page, blog page,
//! profile page, status badge and contact page need, without any rendering.

use std::time::Duration;

use crate::core::error::{ClientError, Result};
use crate::core::service::ApiService;
use crate::services::api::ApiClient;
use shared::dto::{Blog, SendEmailRequest, User};

/// Delay before sending a user whose profile failed to load back to login.
pub const PROFILE_ERROR_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Recipient of contact form submissions.
pub const CONTACT_RECIPIENT: &str = "info@flighttravel.com";

/// Published blogs for the home page, or nothing if the backend is slow or failing.
///
/// Never fails: a page must render even when the backend is down.
pub async fn featured_blogs(api: &dyn ApiService, count: u32, deadline: Duration) -> Vec<Blog> {
    match tokio::time::timeout(deadline, api.blogs(1, count, true)).await {
        Ok(Ok(page)) => page.data,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Failed to load featured blogs");
            Vec::new()
        }
        Err(_) => {
            let error = ClientError::Timeout(deadline);
            tracing::warn!(error = %error, "Featured blogs request abandoned");
            Vec::new()
        }
    }
}

/// A published blog by id; `None` when missing, unpublished or unreachable.
pub async fn published_blog(api: &dyn ApiService, id: &str) -> Option<Blog> {
    match api.blog(id).await {
        Ok(envelope) if envelope.data.is_published() => Some(envelope.data),
        Ok(_) => {
            tracing::debug!(id, "Blog is not published");
            None
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "Failed to load blog");
            None
        }
    }
}

/// What the profile page should do.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    Ready(User),
    /// Go to the login page after `after` has elapsed.
    RedirectToLogin { after: Duration },
}

/// Load the signed-in user's profile.
pub async fn load_profile(api: &dyn ApiService) -> ProfileView {
    if api.token().is_none() {
        return ProfileView::RedirectToLogin {
            after: Duration::ZERO,
        };
    }

    match api.current_user().await {
        Ok(envelope) => ProfileView::Ready(envelope.data),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load profile");
            ProfileView::RedirectToLogin {
                after: PROFILE_ERROR_REDIRECT_DELAY,
            }
        }
    }
}

/// Reachability of the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Online,
    Offline { reason: String },
}

impl ApiStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, ApiStatus::Online)
    }
}

/// Probe the backend with the cheapest list request it serves.
#[tracing::instrument(skip(client), fields(base_url = client.base_url()))]
pub async fn check_api_status(client: &ApiClient) -> ApiStatus {
    let query = [("page", "1".to_string()), ("limit", "1".to_string())];
    match client.get_json("/blogs", &query).await {
        Ok(_) => ApiStatus::Online,
        Err(e) => {
            let reason = offline_reason(&e, client.base_url());
            tracing::warn!(reason = %reason, "API unreachable");
            ApiStatus::Offline { reason }
        }
    }
}

fn offline_reason(error: &ClientError, base_url: &str) -> String {
    match error {
        ClientError::Transport(e) => {
            format!("backend not running at {} ({})", base_url, e)
        }
        ClientError::Http { status, message } | ClientError::Unauthorized { status, message } => {
            format!("API returned status {}: {}", status, message)
        }
        other => other.to_string(),
    }
}

/// Contact page submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Validate the form, returning the first problem as user-facing text.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Please enter your name".to_string());
        }
        if !is_plausible_email(self.email.trim()) {
            return Err("Please enter a valid email address".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("Please enter a message".to_string());
        }
        Ok(())
    }

    /// Email addressed to the site's inbox.
    pub fn into_email(self) -> SendEmailRequest {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        SendEmailRequest {
            to: vec![CONTACT_RECIPIENT.to_string()],
            subject: format!("Contact Form Submission from {}", name),
            text: format!("Name: {}\nEmail: {}\n\nMessage:\n{}", name, email, message),
            html: Some(format!(
                "<h2>New Contact Form Submission</h2>\
                 <p><strong>Name:</strong> {}</p>\
                 <p><strong>Email:</strong> {}</p>\
                 <p><strong>Message:</strong></p>\
                 <p>{}</p>",
                escape_html(name),
                escape_html(email),
                escape_html(message).replace('\n', "<br>")
            )),
            cc: Vec::new(),
            bcc: Vec::new(),
        }
    }

    /// Validate and send. Validation problems surface as [`ClientError::Http`] with status 400
    /// so pages can display them like server-side rejections.
    pub async fn submit(self, api: &dyn ApiService) -> Result<()> {
        self.validate().map_err(|message| ClientError::Http {
            status: 400,
            message,
        })?;
        api.send_email(&self.into_email()).await?;
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
