//! # Service Traits
//!
//! Traits for dependency injection. Page-level helpers in [`crate::services::site`] take an
//! `&dyn ApiService` so they can be driven by in-process fakes in tests.

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::error::Result;
use crate::services::api::ImageUpload;
use shared::dto::{
    AuthResult, Blog, BlogStatus, CreateBlogRequest, CreateUserRequest, Envelope, Image,
    NotificationRequest, PagedEnvelope, SendEmailRequest, SignupRequest, UpdateBlogRequest,
    UpdateUserRequest, User, UserStatus,
};

/// Backend API operations.
///
/// Every JSON operation returns the canonical envelope regardless of how deeply the backend
/// nested its payload.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Login with email and password; persists the token on success.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResult>;

    /// Public signup; persists the token on success.
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResult>;

    /// Signup performed by an already authenticated user (admin creating an account).
    /// The caller's token is left untouched.
    async fn signup_authenticated(&self, request: &SignupRequest) -> Result<AuthResult>;

    /// Forget the stored token.
    fn logout(&self);

    /// Currently stored token.
    fn token(&self) -> Option<String>;

    async fn current_user(&self) -> Result<Envelope<User>>;
    async fn users(&self, page: u32, limit: u32) -> Result<PagedEnvelope<User>>;
    async fn user(&self, id: &str) -> Result<Envelope<User>>;
    async fn create_user(&self, request: &CreateUserRequest) -> Result<Envelope<User>>;
    async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<Envelope<User>>;
    async fn update_user_status(&self, id: &str, status: UserStatus) -> Result<Envelope<User>>;
    async fn delete_user(&self, id: &str) -> Result<Envelope<()>>;

    /// Paginated blogs. With `published`, only published blogs are kept and `meta.total`
    /// reflects the filtered count.
    async fn blogs(&self, page: u32, limit: u32, published: bool) -> Result<PagedEnvelope<Blog>>;
    async fn blog(&self, id: &str) -> Result<Envelope<Blog>>;
    async fn blog_details(&self, id: &str) -> Result<Envelope<Blog>>;
    async fn create_blog(&self, request: &CreateBlogRequest) -> Result<Envelope<Blog>>;
    async fn update_blog(&self, id: &str, request: &UpdateBlogRequest) -> Result<Envelope<Blog>>;
    async fn update_blog_status(&self, id: &str, status: BlogStatus) -> Result<Envelope<Blog>>;
    async fn delete_blog(&self, id: &str) -> Result<Envelope<()>>;

    async fn send_email(&self, request: &SendEmailRequest) -> Result<Envelope<()>>;
    async fn send_admin_notification(&self, request: &NotificationRequest) -> Result<Envelope<()>>;
    async fn send_user_notification(&self, request: &NotificationRequest) -> Result<Envelope<()>>;

    /// Upload an image, optionally attached to a blog. Returns the stored image URL.
    async fn upload_image(&self, upload: ImageUpload, blog_id: Option<&str>) -> Result<String>;
    async fn images(&self, page: u32, limit: u32) -> Result<PagedEnvelope<Image>>;
    async fn image(&self, id: &str) -> Result<Envelope<Image>>;
    async fn delete_image(&self, id: &str) -> Result<Envelope<()>>;
    async fn set_featured_image(&self, blog_id: &str, image_id: &str) -> Result<Envelope<Image>>;
    async fn update_image(
        &self,
        id: &str,
        upload: Option<ImageUpload>,
        metadata: &BTreeMap<String, String>,
    ) -> Result<Envelope<Image>>;

    /// Raw image bytes fetched through the backend proxy.
    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>>;
}
