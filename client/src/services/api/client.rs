//! # API Client
//!
//! Main HTTP client for backend API communication.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::images::ImageUpload;
use super::{auth, blogs, email, images, interceptor, users};
use crate::config::{normalize_base_url, ClientConfig};
use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::services::token_store::{FileTokenStore, TokenStore};
use crate::utils::image_url;
use shared::dto::{
    AuthResult, Blog, BlogStatus, CreateBlogRequest, CreateUserRequest, Envelope, Image,
    NotificationRequest, PagedEnvelope, SendEmailRequest, SignupRequest, UpdateBlogRequest,
    UpdateUserRequest, User, UserStatus,
};

/// HTTP client for communicating with the backend API server.
///
/// Owns the token lifecycle: it is the only component that writes to its [`TokenStore`].
/// Cloning is cheap; clones share the connection pool and the token store.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.get().is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client from configuration, persisting the token under `config.token_dir`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_store(
            &config.api_base_url,
            Arc::new(FileTokenStore::new(&config.token_dir)),
        )
    }

    /// Create a client with an explicit token store.
    ///
    /// No request timeout is configured: callers needing a deadline wrap the call
    /// themselves (see [`crate::services::site::featured_blogs`]).
    pub fn with_store(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("flighttravel-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            tokens,
        })
    }

    /// Normalized backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    /// Currently stored bearer token.
    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }

    /// Forget the stored token. Purely local; the backend is not notified.
    pub fn logout(&self) {
        tracing::info!("Logging out");
        self.tokens.clear();
    }

    /// Image URL routed through the backend image proxy.
    pub fn image_url(&self, image_url: Option<&str>) -> String {
        image_url::proxied_image_url(&self.base_url, image_url)
    }

    /// Image URL used as-is.
    pub fn direct_image_url(&self, image_url: Option<&str>) -> String {
        image_url::direct_image_url(image_url)
    }

    /// Request builder for `path` with the bearer token attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        interceptor::authorize(builder, self.tokens())
    }

    /// Send a prepared request and decode its JSON body through the response interceptor.
    pub(crate) async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Value> {
        let start = std::time::Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::error!(path, error = %e, "Network error");
            e
        })?;

        let status = response.status().as_u16();
        let body = interceptor::intercept(response, path, self.tokens()).await?;
        tracing::debug!(
            path,
            status,
            duration_ms = start.elapsed().as_millis(),
            "Request completed"
        );
        Ok(body)
    }

    pub(crate) async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let builder = self.request(Method::GET, path).query(query);
        self.send(builder, path).await
    }

    pub(crate) async fn send_json<B: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value> {
        let builder = self.request(method, path).json(body);
        self.send(builder, path).await
    }

    pub(crate) async fn delete_json(&self, path: &str) -> Result<Value> {
        let builder = self.request(Method::DELETE, path);
        self.send(builder, path).await
    }

    /// Like [`Self::send`] but returns the raw body of a successful response.
    pub(crate) async fn send_bytes(&self, builder: RequestBuilder, path: &str) -> Result<Vec<u8>> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!(path, error = %e, "Network error");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(interceptor::failure(status, &text, path, self.tokens()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ApiService for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResult> {
        auth::login(self, email, password).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResult> {
        auth::signup(self, request).await
    }

    async fn signup_authenticated(&self, request: &SignupRequest) -> Result<AuthResult> {
        auth::signup_authenticated(self, request).await
    }

    fn logout(&self) {
        ApiClient::logout(self)
    }

    fn token(&self) -> Option<String> {
        ApiClient::token(self)
    }

    async fn current_user(&self) -> Result<Envelope<User>> {
        users::current_user(self).await
    }

    async fn users(&self, page: u32, limit: u32) -> Result<PagedEnvelope<User>> {
        users::users(self, page, limit).await
    }

    async fn user(&self, id: &str) -> Result<Envelope<User>> {
        users::user(self, id).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<Envelope<User>> {
        users::create_user(self, request).await
    }

    async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<Envelope<User>> {
        users::update_user(self, id, request).await
    }

    async fn update_user_status(&self, id: &str, status: UserStatus) -> Result<Envelope<User>> {
        users::update_user_status(self, id, status).await
    }

    async fn delete_user(&self, id: &str) -> Result<Envelope<()>> {
        users::delete_user(self, id).await
    }

    async fn blogs(&self, page: u32, limit: u32, published: bool) -> Result<PagedEnvelope<Blog>> {
        blogs::blogs(self, page, limit, published).await
    }

    async fn blog(&self, id: &str) -> Result<Envelope<Blog>> {
        blogs::blog(self, id).await
    }

    async fn blog_details(&self, id: &str) -> Result<Envelope<Blog>> {
        blogs::blog_details(self, id).await
    }

    async fn create_blog(&self, request: &CreateBlogRequest) -> Result<Envelope<Blog>> {
        blogs::create_blog(self, request).await
    }

    async fn update_blog(&self, id: &str, request: &UpdateBlogRequest) -> Result<Envelope<Blog>> {
        blogs::update_blog(self, id, request).await
    }

    async fn update_blog_status(&self, id: &str, status: BlogStatus) -> Result<Envelope<Blog>> {
        blogs::update_blog_status(self, id, status).await
    }

    async fn delete_blog(&self, id: &str) -> Result<Envelope<()>> {
        blogs::delete_blog(self, id).await
    }

    async fn send_email(&self, request: &SendEmailRequest) -> Result<Envelope<()>> {
        email::send_email(self, request).await
    }

    async fn send_admin_notification(&self, request: &NotificationRequest) -> Result<Envelope<()>> {
        email::send_admin_notification(self, request).await
    }

    async fn send_user_notification(&self, request: &NotificationRequest) -> Result<Envelope<()>> {
        email::send_user_notification(self, request).await
    }

    async fn upload_image(&self, upload: ImageUpload, blog_id: Option<&str>) -> Result<String> {
        images::upload_image(self, upload, blog_id).await
    }

    async fn images(&self, page: u32, limit: u32) -> Result<PagedEnvelope<Image>> {
        images::images(self, page, limit).await
    }

    async fn image(&self, id: &str) -> Result<Envelope<Image>> {
        images::image(self, id).await
    }

    async fn delete_image(&self, id: &str) -> Result<Envelope<()>> {
        images::delete_image(self, id).await
    }

    async fn set_featured_image(&self, blog_id: &str, image_id: &str) -> Result<Envelope<Image>> {
        images::set_featured_image(self, blog_id, image_id).await
    }

    async fn update_image(
        &self,
        id: &str,
        upload: Option<ImageUpload>,
        metadata: &BTreeMap<String, String>,
    ) -> Result<Envelope<Image>> {
        images::update_image(self, id, upload, metadata).await
    }

    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>> {
        images::fetch_image(self, image_url).await
    }
}
